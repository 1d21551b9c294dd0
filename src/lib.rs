// Public modules
pub mod domains;
pub mod errors;
pub mod validation;

pub use domains::dashboard::{DashboardService, DashboardServiceImpl, DashboardSnapshot};
pub use domains::dataset::{DatasetRepository, JsonDatasetRepository, StaticDatasetRepository};
pub use domains::donation::{AttributionSource, DonationStatus, LineItem, RawDonation};
pub use domains::donor::{DonationEntry, DonorItemRollup, DonorProfile};
pub use domains::metrics::DashboardMetrics;
pub use domains::window::{DateRangeInput, DateWindow};

/// Initialize the logging facade from the environment (`RUST_LOG`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
