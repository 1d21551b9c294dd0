pub mod filter;
pub mod types;

pub use filter::{baseline_before, select_window};
pub use types::{DateRangeInput, DateWindow};
