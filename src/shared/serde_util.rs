//! Custom serde helpers for backend wire formats.

/// Deserializes a loosely-typed numeric field into `Option<f64>`.
///
/// The history endpoint sends numbers, numeric strings, `null`, or garbage
/// depending on the upstream provider. Anything that is not a finite number
/// becomes `None`; it is never coerced to zero.
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(to_finite))
    }

    /// Converts a JSON value into a finite `f64`, if it represents one.
    pub fn to_finite(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }
}
