use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{DonationEntry, DonorItemRollup, DonorProfile};
use crate::domains::donation::{attribution, AttributionSource, RawDonation};

/// Group raw transactions into donor profiles.
///
/// Records are folded in input order; the first record seen for an email
/// supplies the donor's identity fields. The output is sorted by last
/// donation date descending, ties broken by total donated descending, and
/// remaining ties keep first-seen-email order (stable sort). Donors with no
/// parseable dates order after dated donors. Pure: re-running on the same
/// input yields identical output.
pub fn aggregate(records: &[RawDonation]) -> Vec<DonorProfile> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accumulators: Vec<DonorAccumulator> = Vec::new();

    for record in records {
        let slot = match index.get(record.email()) {
            Some(slot) => *slot,
            None => {
                index.insert(record.email().to_string(), accumulators.len());
                accumulators.push(DonorAccumulator::open(record));
                accumulators.len() - 1
            }
        };
        accumulators[slot].fold(record);
    }

    let mut donors: Vec<DonorProfile> = accumulators
        .into_iter()
        .map(DonorAccumulator::finish)
        .collect();

    donors.sort_by(|a, b| {
        b.last_donation
            .cmp(&a.last_donation)
            .then_with(|| b.total_donated.cmp(&a.total_donated))
    });

    donors
}

/// In-progress donor aggregate while a pass walks the record set.
struct DonorAccumulator {
    name: String,
    email: String,
    phone: Option<String>,
    country: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    donations: Vec<DonationEntry>,
    total_donated: Decimal,
    first_donation: Option<NaiveDate>,
    last_donation: Option<NaiveDate>,
    payment_methods: Vec<String>,
    sources: Vec<AttributionSource>,
    items: Vec<DonorItemRollup>,
}

impl DonorAccumulator {
    /// Open an accumulator with identity fields from the first-seen record.
    fn open(record: &RawDonation) -> Self {
        Self {
            name: record.donor_name().to_string(),
            email: record.email().to_string(),
            phone: record.phone.clone(),
            country: record.country.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            postcode: record.postcode.clone(),
            donations: Vec::new(),
            total_donated: Decimal::ZERO,
            first_donation: None,
            last_donation: None,
            payment_methods: Vec::new(),
            sources: Vec::new(),
            items: Vec::new(),
        }
    }

    fn fold(&mut self, record: &RawDonation) {
        let date = record.entry_date();
        let source = attribution::classify(record);

        self.donations.push(DonationEntry {
            date,
            amount: record.value(),
            payment_method: record.payment_method().to_string(),
            status: record.status(),
            source,
            device: record.device().to_string(),
        });

        self.total_donated += record.value();

        let method = record.payment_method();
        if !method.is_empty() && !self.payment_methods.iter().any(|m| m == method) {
            self.payment_methods.push(method.to_string());
        }

        if !self.sources.contains(&source) {
            self.sources.push(source);
        }

        for item in &record.items {
            let slot = match self
                .items
                .iter()
                .position(|r| r.name == item.name() && r.category == item.category())
            {
                Some(slot) => slot,
                None => {
                    self.items.push(DonorItemRollup {
                        name: item.name().to_string(),
                        category: item.category().to_string(),
                        quantity: 0,
                        total: Decimal::ZERO,
                    });
                    self.items.len() - 1
                }
            };
            self.items[slot].quantity += item.quantity;
            self.items[slot].total += item.line_total();
        }

        // Invalid dates stay out of the first/last tracking
        if let Some(date) = date {
            if self.first_donation.map_or(true, |first| date < first) {
                self.first_donation = Some(date);
            }
            if self.last_donation.map_or(true, |last| date > last) {
                self.last_donation = Some(date);
            }
        }
    }

    fn finish(self) -> DonorProfile {
        let donation_count = self.donations.len();
        let frequency = match (self.first_donation, self.last_donation) {
            (Some(first), Some(last)) => {
                let days = (last - first).num_days();
                if days > 0 {
                    Some(donation_count as f64 / days as f64)
                } else {
                    None
                }
            }
            _ => None,
        };

        DonorProfile {
            name: self.name,
            email: self.email,
            phone: self.phone,
            country: self.country,
            city: self.city,
            state: self.state,
            postcode: self.postcode,
            donations: self.donations,
            total_donated: self.total_donated,
            donation_count,
            first_donation: self.first_donation,
            last_donation: self.last_donation,
            payment_methods: self.payment_methods,
            sources: self.sources,
            items: self.items,
            frequency,
        }
    }
}
