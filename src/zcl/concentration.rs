//! Concentration measurement cluster schemas.
//!
//! ZCL concentration clusters share one attribute layout: `measured_value`,
//! its bounds and a tolerance, all single precision floats expressed as a
//! fraction of one (1 ppm = 1e-6). PM2.5 uses the same layout in µg/m³.
//!
//! The VOC cluster (0x042E) is not part of the ZCL; it is the id Tuya air
//! boxes are exposed under.

use super::{AttributeDef, ClusterSchema, DataType};

pub const MEASURED_VALUE: u16 = 0x0000;
pub const MIN_MEASURED_VALUE: u16 = 0x0001;
pub const MAX_MEASURED_VALUE: u16 = 0x0002;
pub const TOLERANCE: u16 = 0x0003;

const ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(MEASURED_VALUE, "measured_value", DataType::Single),
    AttributeDef::new(MIN_MEASURED_VALUE, "min_measured_value", DataType::Single),
    AttributeDef::new(MAX_MEASURED_VALUE, "max_measured_value", DataType::Single),
    AttributeDef::new(TOLERANCE, "tolerance", DataType::Single),
];

pub const CARBON_MONOXIDE: ClusterSchema = ClusterSchema {
    id: 0x040C,
    name: "Carbon Monoxide (CO) Concentration",
    ep_attribute: "carbon_monoxide_concentration",
    attributes: ATTRIBUTES,
};

pub const CARBON_DIOXIDE: ClusterSchema = ClusterSchema {
    id: 0x040D,
    name: "Carbon Dioxide (CO₂) Concentration",
    ep_attribute: "carbon_dioxide_concentration",
    attributes: ATTRIBUTES,
};

pub const PM25: ClusterSchema = ClusterSchema {
    id: 0x042A,
    name: "PM2.5",
    ep_attribute: "pm25",
    attributes: ATTRIBUTES,
};

pub const FORMALDEHYDE: ClusterSchema = ClusterSchema {
    id: 0x042B,
    name: "Formaldehyde Concentration",
    ep_attribute: "formaldehyde_concentration",
    attributes: ATTRIBUTES,
};

pub const VOC_LEVEL: ClusterSchema = ClusterSchema {
    id: 0x042E,
    name: "VOC Level",
    ep_attribute: "voc_level",
    attributes: ATTRIBUTES,
};
