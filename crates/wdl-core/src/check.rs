//! Field-level range validators used by the serde derives.
//!
//! Deserialization of the canonical form must reject out-of-range numeric
//! values with a structured error rather than silently accepting them, so
//! constrained fields carry a `deserialize_with` pointing at one of these.

use serde::{Deserialize, Deserializer, de::Error};

/// Deserialize an `f32` constrained to `[0, 1]`.
pub(crate) fn unit_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("{value} is outside [0, 1]")))
    }
}

/// Deserialize an `f32` constrained to `>= 0`.
pub(crate) fn non_negative_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("{value} is negative")))
    }
}

/// Deserialize an `f64` constrained to `>= 0`.
pub(crate) fn non_negative_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("{value} is negative")))
    }
}

/// Deserialize an hour-of-day in `[0, 23]`.
pub(crate) fn hour<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value <= 23 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("hour {value} is outside [0, 23]")))
    }
}

/// Deserialize a minute-of-hour in `[0, 59]`.
pub(crate) fn minute<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value <= 59 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!(
            "minute {value} is outside [0, 59]"
        )))
    }
}
