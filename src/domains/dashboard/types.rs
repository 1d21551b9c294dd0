use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domains::donor::DonorProfile;
use crate::domains::metrics::DashboardMetrics;
use crate::domains::window::DateWindow;

/// Orchestrator state: either the full dataset or a date-bounded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterState {
    Unfiltered,
    Filtered(DateWindow),
}

impl FilterState {
    pub fn window(&self) -> Option<DateWindow> {
        match self {
            FilterState::Unfiltered => None,
            FilterState::Filtered(window) => Some(*window),
        }
    }

    /// Window start, the first-time-donor baseline cutoff. `None` in the
    /// unfiltered state, which makes the baseline empty.
    pub fn start(&self) -> Option<NaiveDate> {
        self.window().map(|w| w.start)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterState::Unfiltered => "unfiltered",
            FilterState::Filtered(_) => "filtered",
        }
    }
}

/// One consistently published unit: the donor list, metrics, and window
/// bounds, all derived from the same active window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub donors: Vec<DonorProfile>,
    pub metrics: DashboardMetrics,
    pub window: Option<DateWindow>,
}
