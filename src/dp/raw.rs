//! Decoded Tuya data point values.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// A data point value as decoded by the transport layer.
///
/// The variant is fixed per DP id and mirrors the Tuya DP type byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RawValue {
    /// Opaque byte sequence (DP type 0x00)
    Raw(Vec<u8>),
    /// DP type 0x01
    Bool(bool),
    /// 4-byte signed integer (DP type 0x02)
    Value(i32),
    /// DP type 0x03
    String(String),
    /// DP type 0x04
    Enum(u8),
    /// DP type 0x05
    Bitmap(u32),
}

impl RawValue {
    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Numeric reading of integer-like kinds.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            RawValue::Value(v) => Some(v.into()),
            RawValue::Enum(e) => Some(e.into()),
            RawValue::Bitmap(b) => Some(b.into()),
            _ => None,
        }
    }

    /// Truthiness of boolean and integer-like kinds.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            RawValue::Bool(b) => Some(b),
            RawValue::Value(v) => Some(v != 0),
            RawValue::Enum(e) => Some(e != 0),
            RawValue::Bitmap(b) => Some(b != 0),
            _ => None,
        }
    }
}

/// One decoded data point report for a device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpEvent {
    /// Endpoint the report arrived on; the device's data point endpoint if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<u8>,
    pub dp: u8,
    pub value: RawValue,
}
