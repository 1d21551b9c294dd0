use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::RawDonation;

/// Traffic source a donation is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributionSource {
    Google,
    Facebook,
    TikTok,
    Other,
}

impl AttributionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionSource::Google => "Google",
            AttributionSource::Facebook => "Facebook",
            AttributionSource::TikTok => "TikTok",
            AttributionSource::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Google" => Some(AttributionSource::Google),
            "Facebook" => Some(AttributionSource::Facebook),
            "TikTok" => Some(AttributionSource::TikTok),
            "Other" => Some(AttributionSource::Other),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["Google", "Facebook", "TikTok", "Other"]
    }
}

impl fmt::Display for AttributionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a donation into exactly one traffic source.
///
/// Precedence, first match wins: Google click id, then Facebook, then TikTok,
/// then Other. An identifier counts as present only when it is a non-empty
/// string. Pure and total.
pub fn classify(donation: &RawDonation) -> AttributionSource {
    if has_id(&donation.gclid) {
        AttributionSource::Google
    } else if has_id(&donation.fbclid) {
        AttributionSource::Facebook
    } else if has_id(&donation.ttclid) {
        AttributionSource::TikTok
    } else {
        AttributionSource::Other
    }
}

fn has_id(id: &Option<String>) -> bool {
    id.as_deref().is_some_and(|s| !s.is_empty())
}
