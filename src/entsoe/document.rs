//! Typed view of an ENTSO-E `Publication_MarketDocument`
//!
//! Repeated elements (`TimeSeries`, `Period`, `Point`) may appear once or many
//! times; serde collects either shape into a `Vec`, so nothing downstream needs
//! to care. Leaf values are kept as raw strings and interpreted leniently by the
//! normalizer.

use crate::error::Result;
use serde::Deserialize;

/// Root of a day-ahead price publication.
///
/// The service answers "no data" with an `Acknowledgement_MarketDocument`; that
/// shape deserializes into this type with no series and a populated `reasons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationDocument {
    #[serde(rename = "TimeSeries", default)]
    pub time_series: Vec<TimeSeries>,

    #[serde(rename = "Reason", default)]
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "mRID", default)]
    pub mrid: Option<String>,

    #[serde(rename = "Period", default)]
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Period {
    #[serde(rename = "timeInterval", default)]
    pub time_interval: Option<TimeInterval>,

    #[serde(default)]
    pub resolution: Option<String>,

    #[serde(rename = "Point", default)]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeInterval {
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub position: Option<String>,

    #[serde(rename = "price.amount", default)]
    pub price_amount: Option<String>,
}

/// Explanation attached to acknowledgement documents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reason {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub text: Option<String>,
}

impl PublicationDocument {
    /// Parse an XML response body
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Human-readable summary of any acknowledgement reasons
    pub fn reason_text(&self) -> Option<String> {
        let parts: Vec<String> = self
            .reasons
            .iter()
            .filter_map(|r| match (r.code.as_deref(), r.text.as_deref()) {
                (Some(code), Some(text)) => Some(format!("{}: {}", code, text.trim())),
                (None, Some(text)) => Some(text.trim().to_string()),
                (Some(code), None) => Some(code.to_string()),
                (None, None) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
