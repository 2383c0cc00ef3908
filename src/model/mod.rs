mod models;
mod table;

pub use models::{RP_Pool_State, SO_Order};
pub use table::Table;
