use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::validation::{Validate, ValidationBuilder, DATE_FORMAT};

/// The currently selected date-bounded view of the historical dataset.
/// Both bounds are inclusive and compared by calendar date only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window from already-parsed bounds. `start > end` is rejected;
    /// the window never reorders bounds on the caller's behalf.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::Validation(ValidationError::custom(
                "Start date cannot be after end date",
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Unvalidated date-range input, as collaborators submit it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeInput {
    pub start_date: String,
    pub end_date: String,
}

impl DateRangeInput {
    pub fn new(start_date: &str, end_date: &str) -> Self {
        Self {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// Validate and parse into a [`DateWindow`].
    pub fn to_window(&self) -> DomainResult<DateWindow> {
        self.validate()?;

        let start = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
            .map_err(|_| DomainError::Validation(ValidationError::format(
                "start_date",
                "Invalid date format. Expected YYYY-MM-DD",
            )))?;
        let end = NaiveDate::parse_from_str(&self.end_date, DATE_FORMAT)
            .map_err(|_| DomainError::Validation(ValidationError::format(
                "end_date",
                "Invalid date format. Expected YYYY-MM-DD",
            )))?;

        DateWindow::new(start, end)
    }
}

impl Validate for DateRangeInput {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("start_date", Some(self.start_date.clone()))
            .required()
            .calendar_date()
            .validate()?;

        ValidationBuilder::new("end_date", Some(self.end_date.clone()))
            .required()
            .calendar_date()
            .validate()?;

        Ok(())
    }
}
