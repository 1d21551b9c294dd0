use log::debug;

use super::csv_record::CsvRecord;
use crate::domains::donor::DonorProfile;
use crate::errors::{DomainError, ServiceError, ServiceResult};

/// Render the donor roster as a CSV document.
///
/// Pure serialization of already-aggregated output; writing the result to a
/// file or download is the caller's concern.
pub fn render_donors_csv(donors: &[DonorProfile]) -> ServiceResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());

    wtr.write_record(DonorProfile::headers())
        .map_err(|e| ServiceError::Domain(DomainError::Internal(format!("CSV write error: {}", e))))?;

    for donor in donors {
        wtr.write_record(donor.to_csv())
            .map_err(|e| ServiceError::Domain(DomainError::Internal(format!("CSV write error: {}", e))))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ServiceError::Domain(DomainError::Internal(format!("CSV flush error: {}", e))))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| ServiceError::Domain(DomainError::Internal(format!("CSV encoding error: {}", e))))?;

    debug!("Rendered {} donors to CSV", donors.len());
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::donation::RawDonation;
    use crate::domains::donor::aggregate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_donors_csv() {
        let records = vec![
            RawDonation {
                name: Some("Jane Smith".to_string()),
                email: Some("jane@x.com".to_string()),
                country: Some("Canada".to_string()),
                value: dec!(75.00),
                entry_date: Some("2024-01-20".to_string()),
                payment_method: Some("PayPal".to_string()),
                fbclid: Some("fb-1".to_string()),
                ..Default::default()
            },
            RawDonation {
                name: Some("John Doe".to_string()),
                email: Some("john@x.com".to_string()),
                value: dec!(50.00),
                entry_date: Some("2024-01-15".to_string()),
                payment_method: Some("Credit Card".to_string()),
                ..Default::default()
            },
        ];
        let donors = aggregate(&records);

        let csv = render_donors_csv(&donors).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Name,Email,Phone,Country"));
        assert!(header.ends_with("Payment Methods,Sources"));

        // Donor order follows the aggregate display ordering
        let first = lines.next().unwrap();
        assert!(first.contains("jane@x.com"));
        assert!(first.contains("75.00"));
        assert!(first.contains("2024-01-20"));
        assert!(first.contains("Facebook"));

        let second = lines.next().unwrap();
        assert!(second.contains("john@x.com"));
        assert!(second.contains("Other"));

        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_empty_roster() {
        let csv = render_donors_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let records = vec![
            RawDonation {
                email: Some("a@x.com".to_string()),
                value: dec!(10),
                entry_date: Some("2024-01-01".to_string()),
                payment_method: Some("Credit Card".to_string()),
                ..Default::default()
            },
            RawDonation {
                email: Some("a@x.com".to_string()),
                value: dec!(10),
                entry_date: Some("2024-01-02".to_string()),
                payment_method: Some("PayPal".to_string()),
                ..Default::default()
            },
        ];
        let donors = aggregate(&records);

        let csv = render_donors_csv(&donors).unwrap();
        assert!(csv.contains("\"Credit Card, PayPal\""));
    }
}
