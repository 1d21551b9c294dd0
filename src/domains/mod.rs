pub mod dashboard;
pub mod dataset;
pub mod donation;
pub mod donor;
pub mod export;
pub mod metrics;
pub mod window;

pub use dashboard::{DashboardService, DashboardServiceImpl};
pub use donor::DonorProfile;
