//! General and manufacturer clusters present on Tuya devices.
//!
//! These clusters are mirrored from the network: their attributes are read
//! from the device itself, so the bridge only needs to know their ids to
//! describe the topology.

use super::ClusterSchema;

pub const BASIC: ClusterSchema = ClusterSchema {
    id: 0x0000,
    name: "Basic",
    ep_attribute: "basic",
    attributes: &[],
};

pub const GROUPS: ClusterSchema = ClusterSchema {
    id: 0x0004,
    name: "Groups",
    ep_attribute: "groups",
    attributes: &[],
};

pub const SCENES: ClusterSchema = ClusterSchema {
    id: 0x0005,
    name: "Scenes",
    ep_attribute: "scenes",
    attributes: &[],
};

/// Tuya manufacturer cluster. Data points arrive on the endpoint carrying it.
pub const TUYA_MANUFACTURER: ClusterSchema = ClusterSchema {
    id: 0xEF00,
    name: "Tuya Manufacturer Specific",
    ep_attribute: "tuya_manufacturer",
    attributes: &[],
};

// Client (output) clusters, addressed by id only
pub const TIME_CLUSTER_ID: u16 = 0x000A;
pub const OTA_CLUSTER_ID: u16 = 0x0019;
pub const GREEN_POWER_CLUSTER_ID: u16 = 0x0021;
