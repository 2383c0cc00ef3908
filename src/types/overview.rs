use serde::Serialize;

/// Aggregate market figures across every known pool.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_pools: u64,
    pub funded_pools: u64,
    pub total_value: String,
    pub total_raised: String,
    pub avg_senior_roi: f64,
    pub avg_junior_roi: f64,
}
