use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Count of donors whose email first appears inside the active window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstTimeDonors {
    pub count: usize,
}

/// Count and summed value for one side of the status partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub count: usize,
    pub amount: Decimal,
}

/// Successful vs declined transactions over the active window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub successful: StatusSlice,
    pub declined: StatusSlice,
}

/// Window-level metrics, derived strictly from the active record set plus the
/// pre-window baseline. Ephemeral: fully recomputed on every window change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_donated: Decimal,
    /// Distinct emails in the window minus the first-time-donor count, i.e.
    /// the returning-donor count. Kept for display compatibility with the
    /// upstream dashboard even though the name suggests total distinct
    /// donors.
    pub unique_donors: usize,
    pub avg_donation: Decimal,
    pub transaction_count: usize,
    pub first_time_donors: FirstTimeDonors,
    /// The 2-decimal amount occurring most often in the window.
    pub most_frequent_amount: Decimal,
    pub transaction_status: StatusBreakdown,
}
