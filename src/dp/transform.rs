//! Value transforms applied to data points before they reach an attribute.
//!
//! Transforms are pure: the same raw value always produces the same
//! attribute value, and nothing outside the returned value is touched.

use super::RawValue;
use crate::error::TransformError;
use crate::zcl::ias_zone::zone_status;
use crate::zcl::{AttributeValue, CustomTemperature};

/// Conversion from a raw data point to an attribute value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueTransform {
    /// `raw * k`, for numeric data points
    Scale(f64),
    /// Numeric pass-through
    Identity,
    /// Active-low alarm: a zero/false reading raises `ALARM_1` in the zone
    /// status bitmap, anything else clears it.
    InvertedAlarm,
    /// Decode a packed [`CustomTemperature`]
    TemperatureStruct,
}

impl ValueTransform {
    pub fn name(&self) -> &'static str {
        match self {
            ValueTransform::Scale(_) => "scale",
            ValueTransform::Identity => "identity",
            ValueTransform::InvertedAlarm => "inverted_alarm",
            ValueTransform::TemperatureStruct => "temperature_struct",
        }
    }

    /// Apply the transform to a raw value.
    pub fn apply(&self, raw: &RawValue) -> Result<AttributeValue, TransformError> {
        match *self {
            ValueTransform::Scale(k) => self
                .number(raw)
                .map(|n| AttributeValue::Number(n * k)),
            ValueTransform::Identity => self.number(raw).map(AttributeValue::Number),
            ValueTransform::InvertedAlarm => {
                let active = raw.as_bool().ok_or_else(|| self.unexpected(raw))?;
                let bits = if !active { zone_status::ALARM_1 } else { 0 };
                Ok(AttributeValue::Bitmap16(bits))
            }
            ValueTransform::TemperatureStruct => {
                let decoded = match raw {
                    RawValue::Raw(bytes) => CustomTemperature::from_bytes(bytes)?,
                    // A value-typed DP carries the struct in its 4 big-endian bytes
                    RawValue::Value(v) => CustomTemperature::from_bytes(&v.to_be_bytes())?,
                    _ => return Err(self.unexpected(raw)),
                };
                Ok(AttributeValue::Temperature(decoded))
            }
        }
    }

    fn number(&self, raw: &RawValue) -> Result<f64, TransformError> {
        raw.as_number().ok_or_else(|| self.unexpected(raw))
    }

    fn unexpected(&self, raw: &RawValue) -> TransformError {
        TransformError::UnexpectedKind {
            transform: self.name(),
            kind: raw.kind(),
        }
    }
}
