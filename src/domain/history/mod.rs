//! History domain: per-range sample points, dataset shaping, caching.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod source;
pub mod state;
pub mod wire;

use crate::domain::chart::{SeriesId, SeriesPayload};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use source::HistorySource;
pub use state::HistoryCache;

// ─── RawTimestamp ────────────────────────────────────────────────────────────

/// Largest magnitude accepted for numeric timestamps (±100,000,000 days).
pub const MAX_EPOCH_MS: f64 = 8.64e15;

/// A timestamp as the backend sent it: text, epoch milliseconds, or nothing.
///
/// Deserialization never fails. Values of any other JSON type become
/// `Missing`, so one malformed sample does not sink the whole response.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Millis(f64),
    #[default]
    Missing,
}

impl RawTimestamp {
    /// Epoch milliseconds, or `None` if the value does not parse.
    pub fn epoch_ms(&self) -> Option<i64> {
        match self {
            RawTimestamp::Text(s) => parse_timestamp_ms(s),
            RawTimestamp::Millis(ms) if ms.abs() <= MAX_EPOCH_MS => Some(ms.trunc() as i64),
            _ => None,
        }
    }

    /// Axis label for this timestamp.
    pub fn category(&self) -> String {
        match self {
            RawTimestamp::Text(s) => s.clone(),
            RawTimestamp::Millis(_) => self
                .epoch_ms()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default(),
            RawTimestamp::Missing => String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for RawTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => RawTimestamp::Text(s),
            Value::Number(n) => n.as_f64().map(RawTimestamp::Millis).unwrap_or_default(),
            _ => RawTimestamp::Missing,
        })
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        RawTimestamp::Text(s.to_string())
    }
}

impl From<i64> for RawTimestamp {
    fn from(ms: i64) -> Self {
        RawTimestamp::Millis(ms as f64)
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        RawTimestamp::Text(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Parses ISO-8601-ish text into epoch milliseconds. Naive forms are read as UTC.
pub fn parse_timestamp_ms(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

// ─── HistoryPoint ────────────────────────────────────────────────────────────

/// One historical sample. Numeric fields are `None` when absent or non-finite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: RawTimestamp,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume: Option<f64>,
}

impl HistoryPoint {
    /// A point is valid when its timestamp parses.
    pub fn is_valid(&self) -> bool {
        self.timestamp.epoch_ms().is_some()
    }

    pub fn value(&self, series: SeriesId) -> Option<f64> {
        match series {
            SeriesId::Price => self.price,
            SeriesId::Market => self.market_cap,
            SeriesId::Volume => self.volume,
        }
    }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// Column-oriented view of a point list. All arrays share index alignment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub categories: Vec<String>,
    pub price: Vec<Option<f64>>,
    pub market_cap: Vec<Option<f64>>,
    pub volume: Vec<Option<f64>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn values(&self, series: SeriesId) -> &[Option<f64>] {
        match series {
            SeriesId::Price => &self.price,
            SeriesId::Market => &self.market_cap,
            SeriesId::Volume => &self.volume,
        }
    }

    /// The `{ name, categories, data }` triple for one chart.
    pub fn series(&self, series: SeriesId) -> SeriesPayload {
        SeriesPayload {
            series,
            name: series.display_name().to_string(),
            categories: self.categories.clone(),
            data: self.values(series).to_vec(),
        }
    }
}

/// Shapes an ordered point list into per-series arrays. Never fails.
pub fn build_historical_dataset(points: &[HistoryPoint]) -> Dataset {
    let mut dataset = Dataset {
        categories: Vec::with_capacity(points.len()),
        price: Vec::with_capacity(points.len()),
        market_cap: Vec::with_capacity(points.len()),
        volume: Vec::with_capacity(points.len()),
    };
    for point in points {
        dataset.categories.push(point.timestamp.category());
        dataset.price.push(finite(point.price));
        dataset.market_cap.push(finite(point.market_cap));
        dataset.volume.push(finite(point.volume));
    }
    dataset
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
