//! TemperatureMeasurement cluster schema.
//!
//! The TemperatureMeasurement cluster (0x0402) represents a temperature sensor.
//! Temperature is reported in centidegrees Celsius (value * 100).
//!
//! For example: 21.5°C is reported as 2150.
//!
//! Tuya air boxes do not report `measured_value` directly. They send a packed
//! struct that lands on the manufacturer-specific `custom_temperature`
//! attribute, and the device republishes `measured_value` from it.

use super::{AttributeDef, ClusterSchema, DataType};
use crate::error::TransformError;
use serde::{Deserialize, Serialize};

/// ZCL Cluster ID for TemperatureMeasurement
pub const CLUSTER_ID: u16 = 0x0402;

/// Measured temperature in centidegrees Celsius
pub const MEASURED_VALUE: u16 = 0x0000;
pub const MIN_MEASURED_VALUE: u16 = 0x0001;
pub const MAX_MEASURED_VALUE: u16 = 0x0002;
pub const TOLERANCE: u16 = 0x0003;
/// Manufacturer-specific slot holding the raw [`CustomTemperature`] struct
pub const CUSTOM_TEMPERATURE: u16 = 0xEF12;

/// Cluster metadata definition
pub const CLUSTER: ClusterSchema = ClusterSchema {
    id: CLUSTER_ID,
    name: "Temperature Measurement",
    ep_attribute: "temperature",
    attributes: &[
        AttributeDef::new(MEASURED_VALUE, "measured_value", DataType::Int16),
        AttributeDef::new(MIN_MEASURED_VALUE, "min_measured_value", DataType::Int16),
        AttributeDef::new(MAX_MEASURED_VALUE, "max_measured_value", DataType::Int16),
        AttributeDef::new(TOLERANCE, "tolerance", DataType::Uint16),
        AttributeDef::new(
            CUSTOM_TEMPERATURE,
            "custom_temperature",
            DataType::CustomTemperature,
        ),
    ],
};

/// Packed temperature reading sent by Tuya air boxes.
///
/// Two big-endian signed 16-bit fields. `temperature` is in tenths of a
/// degree Celsius; the meaning of `field_1` is not documented by the vendor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomTemperature {
    pub field_1: i16,
    pub temperature: i16,
}

impl CustomTemperature {
    /// Encoded width in bytes.
    pub const SIZE: usize = 4;

    pub fn new(field_1: i16, temperature: i16) -> Self {
        Self {
            field_1,
            temperature,
        }
    }

    /// Decode from exactly [`Self::SIZE`] big-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransformError> {
        let bytes: [u8; Self::SIZE] = bytes.try_into().map_err(|_| TransformError::Length {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self {
            field_1: i16::from_be_bytes([bytes[0], bytes[1]]),
            temperature: i16::from_be_bytes([bytes[2], bytes[3]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let [a, b] = self.field_1.to_be_bytes();
        let [c, d] = self.temperature.to_be_bytes();
        [a, b, c, d]
    }

    /// Temperature converted to the cluster's centidegree unit.
    pub fn centidegrees(&self) -> i64 {
        i64::from(self.temperature) * 10
    }
}
