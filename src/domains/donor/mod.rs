pub mod aggregator;
pub mod types;

pub use aggregator::aggregate;
pub use types::{DonationEntry, DonorItemRollup, DonorProfile};
