//! RelativeHumidityMeasurement cluster schema.
//!
//! The RelativeHumidityMeasurement cluster (0x0405) represents a humidity sensor.
//! Humidity is reported in centi-percent (value * 100).
//!
//! For example: 55.5% is reported as 5550.

use super::{AttributeDef, ClusterSchema, DataType};

/// ZCL Cluster ID for RelativeHumidityMeasurement
pub const CLUSTER_ID: u16 = 0x0405;

/// Measured humidity in centi-percent
pub const MEASURED_VALUE: u16 = 0x0000;
pub const MIN_MEASURED_VALUE: u16 = 0x0001;
pub const MAX_MEASURED_VALUE: u16 = 0x0002;
pub const TOLERANCE: u16 = 0x0003;

/// Cluster metadata definition
pub const CLUSTER: ClusterSchema = ClusterSchema {
    id: CLUSTER_ID,
    name: "Relative Humidity Measurement",
    ep_attribute: "humidity",
    attributes: &[
        AttributeDef::new(MEASURED_VALUE, "measured_value", DataType::Uint16),
        AttributeDef::new(MIN_MEASURED_VALUE, "min_measured_value", DataType::Uint16),
        AttributeDef::new(MAX_MEASURED_VALUE, "max_measured_value", DataType::Uint16),
        AttributeDef::new(TOLERANCE, "tolerance", DataType::Uint16),
    ],
};
