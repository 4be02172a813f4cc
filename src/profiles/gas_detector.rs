//! Tuya gas and carbon monoxide detector (`_TZE200_iuk8kupi`).
//!
//! Endpoint 1 carries both concentration readings and the CO alarm zone.
//! The methane alarm is exposed as a separate IAS zone on endpoint 2, so
//! data point 1 is routed away from the endpoint it arrives on.
//!
//! Both alarm data points are active-low: the device reports 0 while the
//! alarm is raised. Methane is published through the CO2 concentration
//! cluster, which is how the vendor firmware is commonly exposed.

use super::{DeviceProfile, ProfileKind};
use crate::device::device_types::{
    GREEN_POWER_PROFILE_ID, GREEN_POWER_PROXY_BASIC, HA_PROFILE_ID, IAS_ZONE, SMART_PLUG,
};
use crate::device::topology::{ClusterConfig, EndpointDescriptor, Topology};
use crate::dp::{AttributeTarget, MappingTable, ValueTransform};
use crate::error::Result;
use crate::zcl::ias_zone::{self, ZoneType};
use crate::zcl::{AttributeValue, concentration, general};

pub const MODELS: &[(&str, &str)] = &[("_TZE200_iuk8kupi", "TS0601")];

pub const DP_METHANE_ALARM: u8 = 1;
pub const DP_METHANE: u8 = 2;
pub const DP_CO_ALARM: u8 = 18;
pub const DP_CO: u8 = 19;

/// Endpoint hosting the methane alarm zone.
pub const METHANE_ZONE_ENDPOINT: u8 = 2;

fn co_alarm_zone() -> ClusterConfig {
    ClusterConfig::local(&ias_zone::CLUSTER).with_constant(
        ias_zone::ZONE_TYPE,
        AttributeValue::Enum(ZoneType::CarbonMonoxideSensor as u16),
    )
}

pub fn topology() -> Topology {
    Topology::new()
        .with_endpoint(
            EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
                .with_input(ClusterConfig::mirrored(&general::BASIC))
                .with_input(ClusterConfig::mirrored(&general::GROUPS))
                .with_input(ClusterConfig::mirrored(&general::SCENES))
                .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
                .with_input(ClusterConfig::local(&concentration::CARBON_MONOXIDE))
                .with_input(co_alarm_zone())
                .with_input(ClusterConfig::local(&concentration::CARBON_DIOXIDE))
                .with_output(general::TIME_CLUSTER_ID)
                .with_output(general::OTA_CLUSTER_ID),
        )
        .with_endpoint(
            // Same zone type as the CO zone, matching other Tuya gas sensors
            EndpointDescriptor::new(METHANE_ZONE_ENDPOINT, HA_PROFILE_ID, IAS_ZONE)
                .with_input(co_alarm_zone()),
        )
        .with_endpoint(
            EndpointDescriptor::new(242, GREEN_POWER_PROFILE_ID, GREEN_POWER_PROXY_BASIC)
                .with_output(general::GREEN_POWER_CLUSTER_ID),
        )
}

pub fn mapping() -> Result<MappingTable> {
    let zone_status = AttributeTarget::new(ias_zone::CLUSTER.ep_attribute, "zone_status");

    MappingTable::builder()
        .map(
            DP_METHANE_ALARM,
            zone_status.on_endpoint(METHANE_ZONE_ENDPOINT),
            ValueTransform::InvertedAlarm,
        )
        .map(
            DP_METHANE,
            AttributeTarget::new(concentration::CARBON_DIOXIDE.ep_attribute, "measured_value"),
            ValueTransform::Scale(1e-5),
        )
        .map(DP_CO_ALARM, zone_status, ValueTransform::InvertedAlarm)
        .map(
            DP_CO,
            AttributeTarget::new(concentration::CARBON_MONOXIDE.ep_attribute, "measured_value"),
            ValueTransform::Scale(1e-8),
        )
        .build()
}

pub fn profile() -> Result<DeviceProfile> {
    DeviceProfile::new(ProfileKind::Methane, MODELS, topology(), mapping()?)
}
