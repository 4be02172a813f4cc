//! Logical endpoint of an instantiated device.

use super::cluster::ClusterState;
use super::topology::EndpointDescriptor;

/// An independently addressable facet of a physical device.
pub struct Endpoint {
    id: u8,
    profile_id: u16,
    device_type: u16,
    clusters: Vec<ClusterState>,
    output_clusters: Vec<u16>,
}

impl Endpoint {
    pub fn from_descriptor(descriptor: &EndpointDescriptor) -> Self {
        Self {
            id: descriptor.id,
            profile_id: descriptor.profile_id,
            device_type: descriptor.device_type,
            clusters: descriptor
                .input_clusters
                .iter()
                .map(ClusterState::from_config)
                .collect(),
            output_clusters: descriptor.output_clusters.clone(),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn profile_id(&self) -> u16 {
        self.profile_id
    }

    pub fn device_type(&self) -> u16 {
        self.device_type
    }

    pub fn clusters(&self) -> &[ClusterState] {
        &self.clusters
    }

    pub fn output_clusters(&self) -> &[u16] {
        &self.output_clusters
    }

    /// Find a cluster by its `ep_attribute` name.
    pub fn cluster(&self, ep_attribute: &str) -> Option<&ClusterState> {
        self.clusters
            .iter()
            .find(|c| c.schema().ep_attribute == ep_attribute)
    }

    pub(crate) fn cluster_mut(&mut self, ep_attribute: &str) -> Option<&mut ClusterState> {
        self.clusters
            .iter_mut()
            .find(|c| c.schema().ep_attribute == ep_attribute)
    }
}
