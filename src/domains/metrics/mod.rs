pub mod engine;
pub mod types;

pub use engine::compute_metrics;
pub use types::{DashboardMetrics, FirstTimeDonors, StatusBreakdown, StatusSlice};
