pub mod attribution;
pub mod types;

pub use attribution::{classify, AttributionSource};
pub use types::{DonationStatus, LineItem, RawDonation};
