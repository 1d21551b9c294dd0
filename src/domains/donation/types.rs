use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::validation::DATE_FORMAT;

/// Donation status enum
///
/// Only the exact label "Declined" counts as a declined transaction; every
/// other label (including missing) is treated as successful by the metrics
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationStatus {
    Completed,
    Declined,
    Other(String),
}

impl DonationStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Completed" => DonationStatus::Completed,
            "Declined" => DonationStatus::Declined,
            other => DonationStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DonationStatus::Completed => "Completed",
            DonationStatus::Declined => "Declined",
            DonationStatus::Other(label) => label,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, DonationStatus::Declined)
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line item nested in a donation transaction.
///
/// Price and quantity arrive from the source as either numbers or numeric
/// strings; malformed values default to 0 rather than failing the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(rename = "item_name", deserialize_with = "de_lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "item_category", deserialize_with = "de_lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "de_lenient_decimal")]
    pub price: Decimal,
    #[serde(deserialize_with = "de_lenient_integer")]
    pub quantity: i64,
}

impl LineItem {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Total contribution of this line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Raw donation transaction as it arrives from the external dataset.
///
/// Field names mirror the source payload. Every field is tolerated as
/// missing or malformed: strings coerce, numerics default to 0, and an
/// unparseable entry date surfaces as `None` from [`RawDonation::entry_date`]
/// rather than an error. The Facebook and TikTok click ids each accept the
/// alternate casing seen in older exports as a serde alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDonation {
    #[serde(rename = "Name", deserialize_with = "de_lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Email", deserialize_with = "de_lenient_string")]
    pub email: Option<String>,
    #[serde(rename = "Phone Number", deserialize_with = "de_lenient_string")]
    pub phone: Option<String>,
    #[serde(rename = "Country", deserialize_with = "de_lenient_string")]
    pub country: Option<String>,
    #[serde(rename = "City", deserialize_with = "de_lenient_string")]
    pub city: Option<String>,
    #[serde(rename = "State", deserialize_with = "de_lenient_string")]
    pub state: Option<String>,
    #[serde(rename = "Postcode", deserialize_with = "de_lenient_string")]
    pub postcode: Option<String>,
    #[serde(rename = "Value", deserialize_with = "de_lenient_decimal")]
    pub value: Decimal,
    #[serde(rename = "Entry Date", deserialize_with = "de_lenient_string")]
    pub entry_date: Option<String>,
    #[serde(rename = "Payment Method", deserialize_with = "de_lenient_string")]
    pub payment_method: Option<String>,
    #[serde(rename = "Donation Status", deserialize_with = "de_lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "Device", deserialize_with = "de_lenient_string")]
    pub device: Option<String>,
    #[serde(rename = "Gclid", deserialize_with = "de_lenient_string")]
    pub gclid: Option<String>,
    #[serde(rename = "Fbclid", alias = "Fbc", deserialize_with = "de_lenient_string")]
    pub fbclid: Option<String>,
    #[serde(rename = "Ttclid", alias = "TTclid", deserialize_with = "de_lenient_string")]
    pub ttclid: Option<String>,
    #[serde(rename = "Ttp", deserialize_with = "de_lenient_string")]
    pub ttp: Option<String>,
    #[serde(rename = "Items", deserialize_with = "de_items")]
    pub items: Vec<LineItem>,
}

impl RawDonation {
    pub fn donor_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Donor identity key. Case-sensitive, exact match.
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Entry date parsed as a calendar date.
    ///
    /// `None` is the invalid-date marker: the record stays in totals but is
    /// excluded from date-ordering comparisons, window selection, and the
    /// first-time-donor baseline.
    pub fn entry_date(&self) -> Option<NaiveDate> {
        let raw = self.entry_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    pub fn payment_method(&self) -> &str {
        self.payment_method.as_deref().unwrap_or("")
    }

    pub fn status(&self) -> DonationStatus {
        DonationStatus::from_label(self.status.as_deref().unwrap_or(""))
    }

    pub fn device(&self) -> &str {
        self.device.as_deref().unwrap_or("")
    }
}

fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn de_lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| coerce_decimal(&value)).unwrap_or_default())
}

fn de_lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| coerce_integer(&value)).unwrap_or_default())
}

fn de_items<'de, D>(deserializer: D) -> Result<Vec<LineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let items: Vec<LineItem> = match raw {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect(),
        // Anything that is not an array carries no line items
        _ => Vec::new(),
    };
    Ok(items)
}

fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or_default(),
        Value::String(s) => Decimal::from_str(s.trim()).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

fn coerce_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}
