use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{DashboardMetrics, FirstTimeDonors, StatusBreakdown};
use crate::domains::donation::RawDonation;
use crate::domains::window;

/// Compute window-level metrics.
///
/// `active` is the currently selected window's record set; `history` is the
/// full historical superset, consulted only to build the pre-window baseline
/// for first-time-donor detection. With no `window_start` (unfiltered state)
/// the baseline is empty and every active donor counts as first-time. Pure
/// function of its inputs.
pub fn compute_metrics(
    active: &[RawDonation],
    history: &[RawDonation],
    window_start: Option<NaiveDate>,
) -> DashboardMetrics {
    let total_donated: Decimal = active.iter().map(|r| r.value()).sum();
    let transaction_count = active.len();

    let avg_donation = if transaction_count > 0 {
        total_donated / Decimal::from(transaction_count as u64)
    } else {
        Decimal::ZERO
    };

    let period_emails: HashSet<&str> = active.iter().map(|r| r.email()).collect();
    let baseline_emails: HashSet<&str> = match window_start {
        Some(start) => window::baseline_before(history, start)
            .into_iter()
            .map(|r| r.email())
            .collect(),
        None => HashSet::new(),
    };

    let first_time_count = period_emails
        .iter()
        .filter(|email| !baseline_emails.contains(*email))
        .count();

    // Distinct minus first-time: the returning-donor count, reproduced from
    // the upstream dashboard's displayed "unique donors" figure.
    let unique_donors = period_emails.len() - first_time_count;

    DashboardMetrics {
        total_donated,
        unique_donors,
        avg_donation,
        transaction_count,
        first_time_donors: FirstTimeDonors {
            count: first_time_count,
        },
        most_frequent_amount: most_frequent_amount(active),
        transaction_status: status_breakdown(active),
    }
}

/// The rounded amount with the highest occurrence count; ties keep the
/// first-seen amount. Zero for an empty window.
fn most_frequent_amount(active: &[RawDonation]) -> Decimal {
    // Insertion order of first occurrence is the tie-break, so counts live in
    // a Vec rather than a map.
    let mut counts: Vec<(Decimal, u64)> = Vec::new();

    for record in active {
        let amount = record
            .value()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        match counts.iter_mut().find(|(seen, _)| *seen == amount) {
            Some((_, count)) => *count += 1,
            None => counts.push((amount, 1)),
        }
    }

    let mut winner: Option<(Decimal, u64)> = None;
    for (amount, count) in counts {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((amount, count)),
        }
    }

    winner.map(|(amount, _)| amount).unwrap_or(Decimal::ZERO)
}

fn status_breakdown(active: &[RawDonation]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();

    for record in active {
        let slice = if record.status().is_declined() {
            &mut breakdown.declined
        } else {
            &mut breakdown.successful
        };
        slice.count += 1;
        slice.amount += record.value();
    }

    breakdown
}
