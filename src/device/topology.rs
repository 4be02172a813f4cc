//! Device topology descriptors.
//!
//! A topology lists the logical endpoints of one physical device, the
//! clusters each endpoint serves and how their attribute state is kept.
//! It is declared once per device profile and instantiated into
//! [`super::Endpoint`]s for every device using that profile.

use super::hooks::PostWriteHook;
use crate::zcl::{AttributeDef, AttributeValue, ClusterSchema};
use std::fmt;
use std::sync::Arc;

/// Where a cluster's attribute state comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePolicy {
    /// State is held by the bridge and written by data point dispatch
    Local,
    /// State lives on the device and is read over the network
    Mirrored,
}

/// Configuration for one server cluster on an endpoint.
#[derive(Clone)]
pub struct ClusterConfig {
    pub schema: &'static ClusterSchema,
    pub storage: StoragePolicy,
    /// Attributes with a fixed value, served on reads
    pub constants: Vec<(u16, AttributeValue)>,
    /// Post-write hooks keyed by attribute id
    pub hooks: Vec<(u16, Arc<dyn PostWriteHook>)>,
}

impl ClusterConfig {
    /// A cluster whose state is held by the bridge.
    pub fn local(schema: &'static ClusterSchema) -> Self {
        Self {
            schema,
            storage: StoragePolicy::Local,
            constants: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// A cluster whose state is read from the device.
    pub fn mirrored(schema: &'static ClusterSchema) -> Self {
        Self {
            storage: StoragePolicy::Mirrored,
            ..Self::local(schema)
        }
    }

    /// Pin an attribute to a constant value.
    pub fn with_constant(mut self, attribute_id: u16, value: AttributeValue) -> Self {
        self.constants.push((attribute_id, value));
        self
    }

    /// Register a post-write hook on a composite attribute.
    pub fn with_hook(mut self, attribute_id: u16, hook: Arc<dyn PostWriteHook>) -> Self {
        self.hooks.push((attribute_id, hook));
        self
    }
}

impl fmt::Debug for ClusterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("cluster", &self.schema.ep_attribute)
            .field("storage", &self.storage)
            .field("constants", &self.constants)
            .field("hooks", &self.hooks.iter().map(|(id, _)| id).collect::<Vec<_>>())
            .finish()
    }
}

/// Static description of one logical endpoint.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub id: u8,
    pub profile_id: u16,
    pub device_type: u16,
    pub input_clusters: Vec<ClusterConfig>,
    pub output_clusters: Vec<u16>,
}

impl EndpointDescriptor {
    pub fn new(id: u8, profile_id: u16, device_type: u16) -> Self {
        Self {
            id,
            profile_id,
            device_type,
            input_clusters: Vec::new(),
            output_clusters: Vec::new(),
        }
    }

    /// Add a server cluster. Returns self for method chaining.
    pub fn with_input(mut self, cluster: ClusterConfig) -> Self {
        self.input_clusters.push(cluster);
        self
    }

    /// Add a client cluster id.
    pub fn with_output(mut self, cluster_id: u16) -> Self {
        self.output_clusters.push(cluster_id);
        self
    }

    /// Find a server cluster by its `ep_attribute` name.
    pub fn cluster(&self, ep_attribute: &str) -> Option<&ClusterConfig> {
        self.input_clusters
            .iter()
            .find(|c| c.schema.ep_attribute == ep_attribute)
    }
}

/// All endpoints of a device.
///
/// # Example
/// ```ignore
/// let topology = Topology::new()
///     .with_endpoint(
///         EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
///             .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
///             .with_input(ClusterConfig::local(&relative_humidity::CLUSTER)),
///     );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Topology {
    endpoints: Vec<EndpointDescriptor>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn endpoint(&self, id: u8) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|ep| ep.id == id)
    }

    /// First endpoint serving the cluster with the given id.
    pub fn endpoint_with_cluster(&self, cluster_id: u16) -> Option<&EndpointDescriptor> {
        self.endpoints
            .iter()
            .find(|ep| ep.input_clusters.iter().any(|c| c.schema.id == cluster_id))
    }

    /// Resolve a writable (local) attribute slot.
    pub fn resolve_local(
        &self,
        endpoint_id: u8,
        cluster: &str,
        attribute: &str,
    ) -> Option<&'static AttributeDef> {
        let config = self.endpoint(endpoint_id)?.cluster(cluster)?;
        if config.storage != StoragePolicy::Local {
            return None;
        }
        config.schema.attribute(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::device_types::{HA_PROFILE_ID, IAS_ZONE, SMART_PLUG};
    use crate::zcl::{general, ias_zone, relative_humidity};

    fn topology() -> Topology {
        Topology::new()
            .with_endpoint(
                EndpointDescriptor::new(1, HA_PROFILE_ID, SMART_PLUG)
                    .with_input(ClusterConfig::mirrored(&general::TUYA_MANUFACTURER))
                    .with_input(ClusterConfig::local(&relative_humidity::CLUSTER)),
            )
            .with_endpoint(
                EndpointDescriptor::new(2, HA_PROFILE_ID, IAS_ZONE)
                    .with_input(ClusterConfig::local(&ias_zone::CLUSTER)),
            )
    }

    #[test]
    fn test_resolve_local_attribute() {
        let topology = topology();
        let attr = topology.resolve_local(1, "humidity", "measured_value").unwrap();
        assert_eq!(attr.id, relative_humidity::MEASURED_VALUE);
        assert!(topology.resolve_local(2, "ias_zone", "zone_status").is_some());
    }

    #[test]
    fn test_resolve_rejects_missing_or_mirrored() {
        let topology = topology();
        assert!(topology.resolve_local(2, "humidity", "measured_value").is_none());
        assert!(topology.resolve_local(1, "humidity", "bogus").is_none());
        assert!(topology.resolve_local(3, "humidity", "measured_value").is_none());
        assert!(topology.resolve_local(1, "tuya_manufacturer", "anything").is_none());
    }

    #[test]
    fn test_endpoint_with_cluster() {
        let topology = topology();
        let ep = topology.endpoint_with_cluster(general::TUYA_MANUFACTURER.id).unwrap();
        assert_eq!(ep.id, 1);
        assert!(topology.endpoint_with_cluster(0x1234).is_none());
    }
}
