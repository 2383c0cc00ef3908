//! Keys shared between the poller (writer) and the controllers (readers).

pub const POOLS: &str = "pools_all";
pub const OVERVIEW: &str = "overview_all";

pub fn pool_key(id: u64) -> String {
    format!("pool_{}", id)
}
