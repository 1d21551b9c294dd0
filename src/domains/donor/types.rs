use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domains::donation::{AttributionSource, DonationStatus};

/// One constituent transaction inside a donor profile, kept in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationEntry {
    /// Calendar date of the transaction; `None` when the source date was
    /// unparseable. Such entries still count toward totals.
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: DonationStatus,
    pub source: AttributionSource,
    pub device: String,
}

/// Rollup of a donor's line items keyed by (item name, item category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorItemRollup {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub total: Decimal,
}

/// Donor aggregate - summarizes all transactions for one email.
///
/// Rebuilt from scratch on every aggregation pass, never incrementally
/// mutated across passes. Identity and contact fields come from the donor's
/// first-seen record; later records only extend the donation history and
/// rollups. Invariants: `total_donated` equals the sum of `donations`
/// amounts, `donation_count` equals `donations.len()`, and `first_donation
/// <= last_donation` whenever both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorProfile {
    pub name: String,
    /// Identity key. Case-sensitive, exact match.
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub donations: Vec<DonationEntry>,
    pub total_donated: Decimal,
    pub donation_count: usize,
    pub first_donation: Option<NaiveDate>,
    pub last_donation: Option<NaiveDate>,
    /// Distinct payment methods in first-seen order.
    pub payment_methods: Vec<String>,
    /// Distinct attribution sources in first-seen order.
    pub sources: Vec<AttributionSource>,
    pub items: Vec<DonorItemRollup>,
    /// Donations per day between first and last donation; `None` when the
    /// donor's history spans less than a full day.
    pub frequency: Option<f64>,
}

impl DonorProfile {
    /// Whole days between the first and last donation, when both are dated.
    pub fn days_active(&self) -> Option<i64> {
        match (self.first_donation, self.last_donation) {
            (Some(first), Some(last)) => Some((last - first).num_days()),
            _ => None,
        }
    }
}
