use chrono::NaiveDate;

use crate::domains::donor::DonorProfile;
use crate::validation::DATE_FORMAT;

/// Trait for types that can be exported to CSV
pub trait CsvRecord {
    /// Get CSV headers for this type
    fn headers() -> Vec<&'static str>;

    /// Convert to CSV row
    fn to_csv(&self) -> Vec<String>;
}

// Helper for optional values
pub fn csv_optional_to_string(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// Helper for calendar date formatting; empty when the date never parsed
pub fn csv_date_to_string(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

impl CsvRecord for DonorProfile {
    fn headers() -> Vec<&'static str> {
        vec![
            "Name",
            "Email",
            "Phone",
            "Country",
            "City",
            "State",
            "Postcode",
            "Total Donated",
            "Number of Donations",
            "First Donation",
            "Last Donation",
            "Payment Methods",
            "Sources",
        ]
    }

    fn to_csv(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            csv_optional_to_string(&self.phone),
            csv_optional_to_string(&self.country),
            csv_optional_to_string(&self.city),
            csv_optional_to_string(&self.state),
            csv_optional_to_string(&self.postcode),
            self.total_donated.to_string(),
            self.donation_count.to_string(),
            csv_date_to_string(&self.first_donation),
            csv_date_to_string(&self.last_donation),
            self.payment_methods.join(", "),
            self.sources
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ]
    }
}
