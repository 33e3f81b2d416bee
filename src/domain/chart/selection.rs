//! Hover/selection event normalization.
//!
//! The charting library reports cursor position in several shapes. Everything
//! is reduced to a single `Option<usize>` here so the sync coordinator never
//! has to look at raw payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A hover or selection event as emitted by a chart.
///
/// Each field is read on its own; a field with an unexpected shape is treated
/// as absent instead of failing the whole event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    /// Explicit point index; negative means "no point".
    #[serde(
        default,
        alias = "pointIndex",
        alias = "data_point_index",
        deserialize_with = "lenient"
    )]
    pub data_point_index: Option<i64>,
    /// Selected indices per series, in recording order.
    #[serde(
        default,
        alias = "selected_data_points",
        deserialize_with = "lenient_series"
    )]
    pub selected_data_points: Option<Vec<Option<Vec<i64>>>>,
}

impl SelectionEvent {
    pub fn at(index: usize) -> Self {
        Self {
            data_point_index: Some(index as i64),
            ..Default::default()
        }
    }

    /// Parse an arbitrary event payload. Shapes that do not match yield an
    /// event with no resolvable index.
    pub fn from_value(value: &Value) -> Self {
        match Self::deserialize(value) {
            Ok(event) => event,
            Err(e) => {
                tracing::trace!(error = %e, "unrecognized selection payload");
                Self::default()
            }
        }
    }

    pub fn point_index(&self) -> Option<usize> {
        resolve_point_index(self)
    }
}

/// Resolve the cursor index of `event`.
///
/// An explicit non-negative point index wins. Otherwise the last recorded index
/// of the first non-empty series in `selected_data_points` is used.
pub fn resolve_point_index(event: &SelectionEvent) -> Option<usize> {
    if let Some(index) = event.data_point_index.and_then(non_negative) {
        return Some(index);
    }

    event
        .selected_data_points
        .iter()
        .flatten()
        .flatten()
        .find(|points| !points.is_empty())
        .and_then(|points| points.last().copied())
        .and_then(non_negative)
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like [`lenient`], but per series: one malformed series becomes `None`.
fn lenient_series<'de, D>(deserializer: D) -> Result<Option<Vec<Option<Vec<i64>>>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(series)) => Ok(Some(
            series
                .into_iter()
                .map(|s| serde_json::from_value(s).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn non_negative(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}
