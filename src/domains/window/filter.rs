use chrono::NaiveDate;

use super::types::DateWindow;
use crate::domains::donation::RawDonation;

/// Select the active window: every record whose entry date falls inside the
/// window, both bounds inclusive. Records with unparseable dates are excluded.
pub fn select_window<'a>(records: &'a [RawDonation], window: &DateWindow) -> Vec<&'a RawDonation> {
    records
        .iter()
        .filter(|record| record.entry_date().is_some_and(|date| window.contains(date)))
        .collect()
}

/// The pre-window baseline: every record dated strictly before `start`, used
/// for first-time-donor detection. Records with unparseable dates are excluded.
pub fn baseline_before(records: &[RawDonation], start: NaiveDate) -> Vec<&RawDonation> {
    records
        .iter()
        .filter(|record| record.entry_date().is_some_and(|date| date < start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated_record(email: &str, entry_date: &str) -> RawDonation {
        RawDonation {
            email: Some(email.to_string()),
            entry_date: Some(entry_date.to_string()),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_is_inclusive_on_both_bounds() {
        let records = vec![
            dated_record("a@x.com", "2024-01-09"),
            dated_record("b@x.com", "2024-01-10"),
            dated_record("c@x.com", "2024-01-20"),
            dated_record("d@x.com", "2024-01-31"),
            dated_record("e@x.com", "2024-02-01"),
        ];
        let window = DateWindow::new(date(2024, 1, 10), date(2024, 1, 31)).unwrap();

        let selected = select_window(&records, &window);
        let emails: Vec<&str> = selected.iter().map(|r| r.email()).collect();
        assert_eq!(emails, vec!["b@x.com", "c@x.com", "d@x.com"]);
    }

    #[test]
    fn test_baseline_is_strictly_before_start() {
        let records = vec![
            dated_record("a@x.com", "2024-01-09"),
            dated_record("b@x.com", "2024-01-10"),
            dated_record("c@x.com", "2024-01-11"),
        ];

        let baseline = baseline_before(&records, date(2024, 1, 10));
        let emails: Vec<&str> = baseline.iter().map(|r| r.email()).collect();
        assert_eq!(emails, vec!["a@x.com"]);
    }

    #[test]
    fn test_invalid_dates_excluded_from_both() {
        let records = vec![
            dated_record("a@x.com", "not-a-date"),
            RawDonation {
                email: Some("b@x.com".to_string()),
                ..Default::default()
            },
            dated_record("c@x.com", "2024-01-15"),
        ];
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        let selected = select_window(&records, &window);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].email(), "c@x.com");

        let baseline = baseline_before(&records, date(2024, 2, 1));
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline[0].email(), "c@x.com");
    }

    #[test]
    fn test_empty_input() {
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(select_window(&[], &window).is_empty());
        assert!(baseline_before(&[], date(2024, 1, 1)).is_empty());
    }
}
