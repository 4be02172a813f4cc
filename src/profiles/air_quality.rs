//! Tuya air quality box.
//!
//! A single endpoint reporting CO2, VOC, formaldehyde, PM2.5, temperature
//! and humidity through the Tuya manufacturer cluster. Temperature arrives
//! as a packed struct and is republished as `measured_value`.

use super::{DeviceProfile, ProfileKind};
use crate::device::device_types::{HA_PROFILE_ID, SMART_PLUG};
use crate::device::hooks::TemperatureRecompute;
use crate::device::topology::{ClusterConfig, EndpointDescriptor, Topology};
use crate::dp::{AttributeTarget, MappingTable, ValueTransform};
use crate::error::Result;
use crate::zcl::{ClusterSchema, concentration, general, relative_humidity, temperature};
use std::sync::Arc;

pub const MODELS: &[(&str, &str)] = &[
    ("_TZE200_8ygsuhe1", "TS0601"),
    ("_TZE200_yvx5lh6k", "TS0601"),
];

pub const DP_CO2: u8 = 2;
pub const DP_TEMPERATURE: u8 = 18;
pub const DP_HUMIDITY: u8 = 19;
pub const DP_PM25: u8 = 20;
pub const DP_VOC: u8 = 21;
pub const DP_FORMALDEHYDE: u8 = 22;

pub fn topology() -> Topology {
    Topology::new().with_endpoint(
        EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
            .with_input(ClusterConfig::mirrored(&general::BASIC))
            .with_input(ClusterConfig::mirrored(&general::GROUPS))
            .with_input(ClusterConfig::mirrored(&general::SCENES))
            .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
            .with_input(ClusterConfig::local(&concentration::CARBON_DIOXIDE))
            .with_input(
                ClusterConfig::local(&temperature::CLUSTER)
                    .with_hook(temperature::CUSTOM_TEMPERATURE, Arc::new(TemperatureRecompute)),
            )
            .with_input(ClusterConfig::local(&relative_humidity::CLUSTER))
            .with_input(ClusterConfig::local(&concentration::PM25))
            .with_input(ClusterConfig::local(&concentration::VOC_LEVEL))
            .with_input(ClusterConfig::local(&concentration::FORMALDEHYDE))
            .with_output(general::TIME_CLUSTER_ID)
            .with_output(general::OTA_CLUSTER_ID),
    )
}

pub fn mapping() -> Result<MappingTable> {
    let measured = |schema: &'static ClusterSchema| {
        AttributeTarget::new(schema.ep_attribute, "measured_value")
    };

    MappingTable::builder()
        // ppm -> fraction of one
        .map(
            DP_CO2,
            measured(&concentration::CARBON_DIOXIDE),
            ValueTransform::Scale(1e-6),
        )
        .map(
            DP_TEMPERATURE,
            AttributeTarget::new(temperature::CLUSTER.ep_attribute, "custom_temperature"),
            ValueTransform::TemperatureStruct,
        )
        .map(
            DP_HUMIDITY,
            measured(&relative_humidity::CLUSTER),
            ValueTransform::Scale(10.0),
        )
        .map(DP_PM25, measured(&concentration::PM25), ValueTransform::Identity)
        .map(
            DP_VOC,
            measured(&concentration::VOC_LEVEL),
            ValueTransform::Scale(1e-6),
        )
        .map(
            DP_FORMALDEHYDE,
            measured(&concentration::FORMALDEHYDE),
            ValueTransform::Scale(1e-6),
        )
        .build()
}

pub fn profile() -> Result<DeviceProfile> {
    DeviceProfile::new(ProfileKind::Co2, MODELS, topology(), mapping()?)
}
