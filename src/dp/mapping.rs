//! Data point mapping tables.
//!
//! A [`MappingTable`] is built once per device profile and is read-only
//! afterwards. Each entry names the attribute a data point is written to
//! and the [`ValueTransform`] applied on the way.

use super::ValueTransform;
use crate::error::{BridgeError, Result};
use std::collections::BTreeMap;

/// Attribute slot receiving a transformed data point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeTarget {
    endpoint_id: Option<u8>,
    cluster: &'static str,
    attribute: &'static str,
}

impl AttributeTarget {
    /// Target an attribute on the endpoint the data point arrived on.
    ///
    /// # Arguments
    /// * `cluster` - `ep_attribute` name of the cluster (e.g. `"humidity"`)
    /// * `attribute` - attribute name within the cluster
    pub const fn new(cluster: &'static str, attribute: &'static str) -> Self {
        Self {
            endpoint_id: None,
            cluster,
            attribute,
        }
    }

    /// Route to a fixed endpoint instead of the arrival endpoint.
    pub const fn on_endpoint(mut self, endpoint_id: u8) -> Self {
        self.endpoint_id = Some(endpoint_id);
        self
    }

    pub fn endpoint_id(&self) -> Option<u8> {
        self.endpoint_id
    }

    /// Endpoint the write lands on for a data point received on `arrival`.
    pub fn resolve_endpoint(&self, arrival: u8) -> u8 {
        self.endpoint_id.unwrap_or(arrival)
    }

    pub fn cluster(&self) -> &'static str {
        self.cluster
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

/// One entry of a mapping table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPointMapping {
    pub target: AttributeTarget,
    pub transform: ValueTransform,
}

/// Immutable map from data point id to its attribute mapping.
#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    entries: BTreeMap<u8, DataPointMapping>,
}

impl MappingTable {
    pub fn builder() -> MappingTableBuilder {
        MappingTableBuilder::default()
    }

    pub fn get(&self, dp_id: u8) -> Option<&DataPointMapping> {
        self.entries.get(&dp_id)
    }

    pub fn contains(&self, dp_id: u8) -> bool {
        self.entries.contains_key(&dp_id)
    }

    /// Entries in ascending data point order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &DataPointMapping)> {
        self.entries.iter().map(|(dp, mapping)| (*dp, mapping))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`MappingTable`]. Rejects a data point mapped twice.
#[derive(Default)]
pub struct MappingTableBuilder {
    entries: BTreeMap<u8, DataPointMapping>,
    duplicate: Option<u8>,
}

impl MappingTableBuilder {
    pub fn map(mut self, dp_id: u8, target: AttributeTarget, transform: ValueTransform) -> Self {
        let mapping = DataPointMapping { target, transform };
        if self.entries.insert(dp_id, mapping).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(dp_id);
        }
        self
    }

    pub fn build(self) -> Result<MappingTable> {
        if let Some(dp_id) = self.duplicate {
            return Err(BridgeError::DuplicateDataPoint(dp_id));
        }
        Ok(MappingTable {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_arrival_endpoint() {
        let target = AttributeTarget::new("ias_zone", "zone_status");
        assert_eq!(target.endpoint_id(), None);
        assert_eq!(target.resolve_endpoint(1), 1);

        let routed = target.on_endpoint(2);
        assert_eq!(routed.resolve_endpoint(1), 2);
        assert_eq!(routed.cluster(), "ias_zone");
        assert_eq!(routed.attribute(), "zone_status");
    }

    #[test]
    fn test_builder_and_lookup() {
        let table = MappingTable::builder()
            .map(
                19,
                AttributeTarget::new("humidity", "measured_value"),
                ValueTransform::Scale(10.0),
            )
            .map(
                2,
                AttributeTarget::new("carbon_dioxide_concentration", "measured_value"),
                ValueTransform::Scale(1e-6),
            )
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains(19));
        assert!(table.get(20).is_none());
        assert_eq!(table.get(19).unwrap().transform, ValueTransform::Scale(10.0));
        let order: Vec<u8> = table.iter().map(|(dp, _)| dp).collect();
        assert_eq!(order, vec![2, 19]);
    }

    #[test]
    fn test_builder_rejects_duplicate_dp() {
        let result = MappingTable::builder()
            .map(
                1,
                AttributeTarget::new("ias_zone", "zone_status"),
                ValueTransform::InvertedAlarm,
            )
            .map(
                1,
                AttributeTarget::new("pm25", "measured_value"),
                ValueTransform::Identity,
            )
            .build();

        assert!(matches!(result, Err(BridgeError::DuplicateDataPoint(1))));
    }
}
