//! ZCL cluster schemas for the attributes this bridge publishes.
//!
//! Each submodule declares one standardized cluster: its id, the
//! `ep_attribute` name the framework addresses it by, and its attribute
//! table. Schemas are static data. Attribute state lives in
//! [`crate::device::ClusterState`].

pub mod concentration;
pub mod general;
pub mod ias_zone;
pub mod relative_humidity;
pub mod temperature;

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

pub use temperature::CustomTemperature;

/// Declared wire type of an attribute slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
    Bool,
    Uint8,
    Uint16,
    Int16,
    /// IEEE 754 single precision
    Single,
    Bitmap16,
    Enum8,
    Enum16,
    /// Packed `{field_1, temperature}` struct, see [`CustomTemperature`]
    CustomTemperature,
}

/// One attribute of a cluster schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeDef {
    pub id: u16,
    pub name: &'static str,
    pub data_type: DataType,
}

impl AttributeDef {
    pub const fn new(id: u16, name: &'static str, data_type: DataType) -> Self {
        Self {
            id,
            name,
            data_type,
        }
    }
}

/// Static description of a ZCL cluster.
#[derive(Debug, PartialEq, Eq)]
pub struct ClusterSchema {
    /// ZCL cluster id
    pub id: u16,
    /// Human readable cluster name
    pub name: &'static str,
    /// Name the framework uses to address the cluster on an endpoint
    pub ep_attribute: &'static str,
    pub attributes: &'static [AttributeDef],
}

impl ClusterSchema {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Look up an attribute by id.
    pub fn attribute_by_id(&self, id: u16) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|attr| attr.id == id)
    }
}

/// A value held in (or headed for) an attribute slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Bool(bool),
    Uint(u64),
    Int(i64),
    Single(f32),
    Bitmap16(u16),
    Enum(u16),
    Temperature(CustomTemperature),
    /// Untyped numeric produced by a transform, coerced before it is stored.
    Number(f64),
}

/// Reason a value could not be stored in a slot of a given [`DataType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoerceError {
    /// Enumeration value outside the type's range
    OutOfRange,
    /// Value kind cannot be represented by the type at all
    Mismatch,
}

impl AttributeValue {
    /// Convert the value into the representation stored for `data_type`.
    ///
    /// Numeric conversion is total: integer targets round to the nearest
    /// integer and saturate at the type's bounds, `Single` rounds to the
    /// nearest `f32`. Only kind mismatches and out-of-range enumerations
    /// fail.
    pub fn coerce(self, data_type: DataType) -> Result<AttributeValue, CoerceError> {
        use AttributeValue::*;

        match (data_type, self) {
            (DataType::Bool, Bool(b)) => Ok(Bool(b)),
            (DataType::Single, value) => value
                .as_f64()
                .map(|n| Single(n as f32))
                .ok_or(CoerceError::Mismatch),
            (DataType::Uint8, value) => value
                .saturate(0, u8::MAX.into())
                .map(|n| Uint(n as u64)),
            (DataType::Uint16, value) => value
                .saturate(0, u16::MAX.into())
                .map(|n| Uint(n as u64)),
            (DataType::Int16, value) => value
                .saturate(i16::MIN.into(), i16::MAX.into())
                .map(|n| Int(n as i64)),
            (DataType::Bitmap16, Bitmap16(bits)) => Ok(Bitmap16(bits)),
            (DataType::Enum8, Enum(e)) if e <= u8::MAX.into() => Ok(Enum(e)),
            (DataType::Enum8, Enum(_)) => Err(CoerceError::OutOfRange),
            (DataType::Enum16, Enum(e)) => Ok(Enum(e)),
            (DataType::CustomTemperature, Temperature(t)) => Ok(Temperature(t)),
            _ => Err(CoerceError::Mismatch),
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            AttributeValue::Uint(u) => Some(u as f64),
            AttributeValue::Int(i) => Some(i as f64),
            AttributeValue::Single(f) => Some(f as f64),
            AttributeValue::Number(n) => Some(n),
            _ => None,
        }
    }

    fn saturate(self, min: i128, max: i128) -> Result<i128, CoerceError> {
        let n = match self {
            AttributeValue::Uint(u) => u as i128,
            AttributeValue::Int(i) => i as i128,
            // Float to int casts saturate, NaN becomes 0
            AttributeValue::Number(n) => n.round() as i128,
            _ => return Err(CoerceError::Mismatch),
        };
        Ok(n.clamp(min, max))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Uint(u) => write!(f, "{u}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
            AttributeValue::Single(s) => write!(f, "{s}"),
            AttributeValue::Bitmap16(bits) => write!(f, "0x{bits:04X}"),
            AttributeValue::Enum(e) => write!(f, "0x{e:02X}"),
            AttributeValue::Temperature(t) => write!(
                f,
                "{{field_1: {}, temperature: {}}}",
                t.field_1, t.temperature
            ),
            AttributeValue::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_integral_number_to_uint16() {
        let value = AttributeValue::Number(550.0).coerce(DataType::Uint16);
        assert_eq!(value, Ok(AttributeValue::Uint(550)));
    }

    #[test]
    fn test_coerce_integers_round_and_saturate() {
        assert_eq!(
            AttributeValue::Number(1.5).coerce(DataType::Uint16),
            Ok(AttributeValue::Uint(2))
        );
        assert_eq!(
            AttributeValue::Number(70_000.0).coerce(DataType::Uint16),
            Ok(AttributeValue::Uint(u16::MAX.into()))
        );
        assert_eq!(
            AttributeValue::Number(-10.0).coerce(DataType::Uint16),
            Ok(AttributeValue::Uint(0))
        );
        assert_eq!(
            AttributeValue::Int(40_000).coerce(DataType::Int16),
            Ok(AttributeValue::Int(i16::MAX.into()))
        );
        assert_eq!(
            AttributeValue::Int(-40_000).coerce(DataType::Int16),
            Ok(AttributeValue::Int(i16::MIN.into()))
        );
        assert_eq!(
            AttributeValue::Number(f64::NAN).coerce(DataType::Uint8),
            Ok(AttributeValue::Uint(0))
        );
    }

    #[test]
    fn test_coerce_enum8_range() {
        assert_eq!(
            AttributeValue::Enum(0x2B).coerce(DataType::Enum8),
            Ok(AttributeValue::Enum(0x2B))
        );
        assert_eq!(
            AttributeValue::Enum(0x100).coerce(DataType::Enum8),
            Err(CoerceError::OutOfRange)
        );
    }

    #[test]
    fn test_coerce_single_rounds_to_f32() {
        let value = AttributeValue::Number(400_000.0 * 1e-6).coerce(DataType::Single);
        assert_eq!(value, Ok(AttributeValue::Single(0.4)));
    }

    #[test]
    fn test_coerce_kind_mismatch() {
        assert_eq!(
            AttributeValue::Bool(true).coerce(DataType::Single),
            Err(CoerceError::Mismatch)
        );
        assert_eq!(
            AttributeValue::Bitmap16(1).coerce(DataType::Enum16),
            Err(CoerceError::Mismatch)
        );
    }

    #[test]
    fn test_schema_lookup() {
        let schema = &temperature::CLUSTER;
        let attr = schema.attribute("custom_temperature").unwrap();
        assert_eq!(attr.id, temperature::CUSTOM_TEMPERATURE);
        assert_eq!(attr.data_type, DataType::CustomTemperature);
        assert_eq!(schema.attribute_by_id(0x0000).unwrap().name, "measured_value");
        assert!(schema.attribute("zone_status").is_none());
    }
}
