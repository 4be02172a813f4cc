//! IAS Zone cluster schema.
//!
//! The IAS Zone cluster (0x0500) carries the discrete hazard state of a
//! security sensor. `zone_status` is a bitmap; `zone_type` identifies what
//! kind of hazard the zone reports and is fixed per device.

use super::{AttributeDef, ClusterSchema, DataType};
use strum::{Display, FromRepr};

/// ZCL Cluster ID for IAS Zone
pub const CLUSTER_ID: u16 = 0x0500;

pub const ZONE_STATE: u16 = 0x0000;
pub const ZONE_TYPE: u16 = 0x0001;
pub const ZONE_STATUS: u16 = 0x0002;
pub const ZONE_ID: u16 = 0x0011;

/// Cluster metadata definition
pub const CLUSTER: ClusterSchema = ClusterSchema {
    id: CLUSTER_ID,
    name: "IAS Zone",
    ep_attribute: "ias_zone",
    attributes: &[
        AttributeDef::new(ZONE_STATE, "zone_state", DataType::Enum8),
        AttributeDef::new(ZONE_TYPE, "zone_type", DataType::Enum16),
        AttributeDef::new(ZONE_STATUS, "zone_status", DataType::Bitmap16),
        AttributeDef::new(ZONE_ID, "zone_id", DataType::Uint8),
    ],
};

/// Bits of the `zone_status` bitmap.
pub mod zone_status {
    pub const ALARM_1: u16 = 0x0001;
}

/// Values of the `zone_type` attribute used by the supported devices.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, FromRepr)]
#[repr(u16)]
pub enum ZoneType {
    StandardCie = 0x0000,
    MotionSensor = 0x000D,
    ContactSwitch = 0x0015,
    FireSensor = 0x0028,
    WaterSensor = 0x002A,
    CarbonMonoxideSensor = 0x002B,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_type_from_repr() {
        assert_eq!(ZoneType::from_repr(0x002B), Some(ZoneType::CarbonMonoxideSensor));
        assert_eq!(ZoneType::from_repr(0x0BAD), None);
        assert_eq!(ZoneType::CarbonMonoxideSensor.to_string(), "CarbonMonoxideSensor");
    }
}
