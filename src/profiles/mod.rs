//! Device profiles: topology plus data point mapping for one device family.
//!
//! Profiles are built once at startup and shared by every device instance
//! using them. Construction validates that each mapped data point lands on
//! an attribute the topology actually serves.

pub mod air_quality;
pub mod gas_detector;

use crate::device::topology::Topology;
use crate::dp::MappingTable;
use crate::error::{BridgeError, Result};
use crate::zcl::general;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Supported device profiles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Air quality box: CO2, VOC, formaldehyde, PM2.5, temperature, humidity
    Co2,
    /// Gas and carbon monoxide detector with two alarm zones
    Methane,
}

impl ProfileKind {
    /// Parse a profile name, as used in configuration.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| BridgeError::UnknownProfile(name.to_string()))
    }

    /// Build and validate the profile.
    pub fn build(self) -> Result<DeviceProfile> {
        match self {
            ProfileKind::Co2 => air_quality::profile(),
            ProfileKind::Methane => gas_detector::profile(),
        }
    }
}

/// Topology and mapping table of one device family.
#[derive(Debug)]
pub struct DeviceProfile {
    kind: ProfileKind,
    models: &'static [(&'static str, &'static str)],
    topology: Topology,
    mapping: MappingTable,
    dp_endpoint: u8,
}

impl DeviceProfile {
    /// Assemble a profile and validate every mapping target.
    ///
    /// # Arguments
    /// * `models` - `(manufacturer, model)` pairs reported by matching devices
    pub fn new(
        kind: ProfileKind,
        models: &'static [(&'static str, &'static str)],
        topology: Topology,
        mapping: MappingTable,
    ) -> Result<Self> {
        let dp_endpoint = topology
            .endpoint_with_cluster(general::TUYA_MANUFACTURER.id)
            .map(|ep| ep.id)
            .ok_or_else(|| {
                BridgeError::InvalidProfile(format!(
                    "{kind} has no endpoint serving the Tuya manufacturer cluster"
                ))
            })?;

        let profile = Self {
            kind,
            models,
            topology,
            mapping,
            dp_endpoint,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check that every mapped target resolves to a local attribute.
    pub fn validate(&self) -> Result<()> {
        for (_, mapping) in self.mapping.iter() {
            let target = &mapping.target;
            let endpoint_id = target.resolve_endpoint(self.dp_endpoint);
            if self
                .topology
                .resolve_local(endpoint_id, target.cluster(), target.attribute())
                .is_none()
            {
                return Err(BridgeError::TargetAttributeUnresolved {
                    endpoint_id,
                    cluster: target.cluster().to_string(),
                    attribute: target.attribute().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn models(&self) -> &'static [(&'static str, &'static str)] {
        self.models
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    /// Endpoint data points are reported on.
    pub fn dp_endpoint(&self) -> u8 {
        self.dp_endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::device_types::{HA_PROFILE_ID, SMART_PLUG};
    use crate::device::topology::{ClusterConfig, EndpointDescriptor};
    use crate::dp::{AttributeTarget, ValueTransform};
    use crate::zcl::relative_humidity;

    fn humidity_mapping(target: AttributeTarget) -> MappingTable {
        MappingTable::builder()
            .map(19, target, ValueTransform::Scale(10.0))
            .build()
            .unwrap()
    }

    fn endpoint_one() -> EndpointDescriptor {
        EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
            .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
            .with_input(ClusterConfig::local(&relative_humidity::CLUSTER))
    }

    #[test]
    fn test_profile_kind_names() {
        assert_eq!(ProfileKind::from_name("co2").unwrap(), ProfileKind::Co2);
        assert_eq!(ProfileKind::from_name(" Methane ").unwrap(), ProfileKind::Methane);
        assert!(matches!(
            ProfileKind::from_name("radon"),
            Err(BridgeError::UnknownProfile(_))
        ));
        assert_eq!(ProfileKind::Methane.to_string(), "methane");
        assert_eq!(ProfileKind::VARIANTS, &["co2", "methane"]);
    }

    #[test]
    fn test_builtin_profiles_validate() {
        for kind in [ProfileKind::Co2, ProfileKind::Methane] {
            let profile = kind.build().unwrap();
            assert_eq!(profile.kind(), kind);
            assert_eq!(profile.dp_endpoint(), 1);
            assert!(!profile.models().is_empty());
        }
    }

    #[test]
    fn test_valid_custom_profile() {
        let profile = DeviceProfile::new(
            ProfileKind::Co2,
            &[],
            Topology::new().with_endpoint(endpoint_one()),
            humidity_mapping(AttributeTarget::new("humidity", "measured_value")),
        )
        .unwrap();
        assert_eq!(profile.mapping().len(), 1);
    }

    #[test]
    fn test_unresolved_target_is_rejected() {
        let result = DeviceProfile::new(
            ProfileKind::Co2,
            &[],
            Topology::new().with_endpoint(endpoint_one()),
            humidity_mapping(AttributeTarget::new("humidity", "measured_value").on_endpoint(2)),
        );
        assert!(matches!(
            result,
            Err(BridgeError::TargetAttributeUnresolved { endpoint_id: 2, .. })
        ));

        let result = DeviceProfile::new(
            ProfileKind::Co2,
            &[],
            Topology::new().with_endpoint(endpoint_one()),
            humidity_mapping(AttributeTarget::new("humidity", "measured_humidity")),
        );
        assert!(matches!(
            result,
            Err(BridgeError::TargetAttributeUnresolved { .. })
        ));
    }

    #[test]
    fn test_mirrored_target_is_rejected() {
        let result = DeviceProfile::new(
            ProfileKind::Co2,
            &[],
            Topology::new().with_endpoint(
                EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
                    .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
                    .with_input(ClusterConfig::mirrored(&relative_humidity::CLUSTER)),
            ),
            humidity_mapping(AttributeTarget::new("humidity", "measured_value")),
        );
        assert!(matches!(
            result,
            Err(BridgeError::TargetAttributeUnresolved { .. })
        ));
    }

    #[test]
    fn test_profile_without_dp_endpoint_is_rejected() {
        let result = DeviceProfile::new(
            ProfileKind::Co2,
            &[],
            Topology::new().with_endpoint(
                EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
                    .with_input(ClusterConfig::local(&relative_humidity::CLUSTER)),
            ),
            humidity_mapping(AttributeTarget::new("humidity", "measured_value")),
        );
        assert!(matches!(result, Err(BridgeError::InvalidProfile(_))));
    }
}
