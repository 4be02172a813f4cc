//! Attribute container for one cluster on one endpoint.

use super::hooks::PostWriteHook;
use super::topology::{ClusterConfig, StoragePolicy};
use crate::error::{BridgeError, Result};
use crate::zcl::{AttributeDef, AttributeValue, ClusterSchema, CoerceError};
use log::warn;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Attribute state of a cluster, composed from a schema and a storage policy.
pub struct ClusterState {
    schema: &'static ClusterSchema,
    storage: StoragePolicy,
    constants: BTreeMap<u16, AttributeValue>,
    values: BTreeMap<u16, AttributeValue>,
    hooks: BTreeMap<u16, Arc<dyn PostWriteHook>>,
}

impl ClusterState {
    pub fn new(schema: &'static ClusterSchema, storage: StoragePolicy) -> Self {
        Self {
            schema,
            storage,
            constants: BTreeMap::new(),
            values: BTreeMap::new(),
            hooks: BTreeMap::new(),
        }
    }

    /// Instantiate from a topology cluster configuration.
    pub fn from_config(config: &ClusterConfig) -> Self {
        let mut state = Self::new(config.schema, config.storage);
        state.constants.extend(config.constants.iter().copied());
        state.hooks.extend(
            config
                .hooks
                .iter()
                .map(|(id, hook)| (*id, Arc::clone(hook))),
        );
        state
    }

    pub fn schema(&self) -> &'static ClusterSchema {
        self.schema
    }

    pub fn storage(&self) -> StoragePolicy {
        self.storage
    }

    pub fn is_local(&self) -> bool {
        self.storage == StoragePolicy::Local
    }

    /// Current value of an attribute. Constants take precedence.
    ///
    /// Mirrored clusters never hold state here and always return `None`.
    pub fn get(&self, attribute_id: u16) -> Option<AttributeValue> {
        if !self.is_local() {
            return None;
        }
        self.constants
            .get(&attribute_id)
            .or_else(|| self.values.get(&attribute_id))
            .copied()
    }

    /// Writes derived by the hook registered on `attribute`, if any.
    ///
    /// A derived write naming an attribute the schema lacks, or holding a
    /// value its slot cannot take, is logged and skipped.
    pub(crate) fn derive(
        &self,
        endpoint_id: u8,
        attribute: &'static AttributeDef,
        value: &AttributeValue,
    ) -> Vec<(&'static AttributeDef, AttributeValue)> {
        let Some(hook) = self.hooks.get(&attribute.id) else {
            return Vec::new();
        };

        let mut writes = Vec::new();
        for derived in hook.derive(value) {
            let Some(target) = self.schema.attribute(derived.attribute) else {
                warn!(
                    "[Cluster] ep{} {}: hook on {} derived unknown attribute {}",
                    endpoint_id, self.schema.ep_attribute, attribute.name, derived.attribute
                );
                continue;
            };
            match self.prepare(target, derived.value) {
                Ok(value) => writes.push((target, value)),
                Err(e) => warn!("[Cluster] ep{} skipping derived write: {}", endpoint_id, e),
            }
        }
        writes
    }

    /// Store a prepared value. Does not run hooks.
    pub(crate) fn commit(&mut self, attribute_id: u16, value: AttributeValue) {
        self.values.insert(attribute_id, value);
    }

    /// Coerce `value` into the representation stored for `attribute`.
    ///
    /// Nothing is committed here, so a failure leaves the state untouched.
    pub(crate) fn prepare(
        &self,
        attribute: &AttributeDef,
        value: AttributeValue,
    ) -> Result<AttributeValue> {
        value
            .coerce(attribute.data_type)
            .map_err(|err| match err {
                CoerceError::OutOfRange => BridgeError::ValueOutOfRange {
                    cluster: self.schema.ep_attribute,
                    attribute: attribute.name,
                    value: value.to_string(),
                },
                CoerceError::Mismatch => BridgeError::TypeMismatch {
                    cluster: self.schema.ep_attribute,
                    attribute: attribute.name,
                    expected: attribute.data_type,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::hooks::{DerivedWrite, TemperatureRecompute};
    use crate::zcl::{CustomTemperature, general, ias_zone, temperature};

    fn temperature_state() -> ClusterState {
        ClusterState::from_config(
            &ClusterConfig::local(&temperature::CLUSTER)
                .with_hook(temperature::CUSTOM_TEMPERATURE, Arc::new(TemperatureRecompute)),
        )
    }

    #[test]
    fn test_derive_composite_value() {
        let state = temperature_state();
        let attr = temperature::CLUSTER.attribute("custom_temperature").unwrap();
        let raw = AttributeValue::Temperature(CustomTemperature::new(0, 215));

        let primary = state.prepare(attr, raw).unwrap();
        assert_eq!(primary, raw);
        let writes = state.derive(1, attr, &primary);
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.name, "measured_value");
        assert_eq!(writes[0].1, AttributeValue::Int(2150));
    }

    #[test]
    fn test_prepare_does_not_commit() {
        let state = temperature_state();
        let attr = temperature::CLUSTER.attribute("measured_value").unwrap();
        state.prepare(attr, AttributeValue::Int(2150)).unwrap();
        assert!(state.derive(1, attr, &AttributeValue::Int(2150)).is_empty());
        assert_eq!(state.get(temperature::MEASURED_VALUE), None);
    }

    #[test]
    fn test_derived_value_saturates_at_slot_bounds() {
        let state = temperature_state();
        let attr = temperature::CLUSTER.attribute("custom_temperature").unwrap();

        let hot = AttributeValue::Temperature(CustomTemperature::new(0, 4000));
        assert_eq!(
            state.derive(1, attr, &hot),
            vec![(
                temperature::CLUSTER.attribute("measured_value").unwrap(),
                AttributeValue::Int(i16::MAX.into())
            )]
        );

        let cold = AttributeValue::Temperature(CustomTemperature::new(0, i16::MIN));
        assert_eq!(state.derive(1, attr, &cold)[0].1, AttributeValue::Int(i16::MIN.into()));
    }

    #[test]
    fn test_hook_targeting_unknown_attribute_is_skipped() {
        struct Broken;
        impl PostWriteHook for Broken {
            fn derive(&self, _value: &AttributeValue) -> Vec<DerivedWrite> {
                vec![
                    DerivedWrite {
                        attribute: "no_such_attribute",
                        value: AttributeValue::Int(1),
                    },
                    DerivedWrite {
                        attribute: "tolerance",
                        value: AttributeValue::Bool(true),
                    },
                    DerivedWrite {
                        attribute: "min_measured_value",
                        value: AttributeValue::Int(-400),
                    },
                ]
            }
        }

        let state = ClusterState::from_config(
            &ClusterConfig::local(&temperature::CLUSTER)
                .with_hook(temperature::MEASURED_VALUE, Arc::new(Broken)),
        );
        let attr = temperature::CLUSTER.attribute("measured_value").unwrap();
        let writes = state.derive(1, attr, &AttributeValue::Int(1));
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.name, "min_measured_value");
    }

    #[test]
    fn test_constants_take_precedence() {
        let mut state = ClusterState::from_config(
            &ClusterConfig::local(&ias_zone::CLUSTER).with_constant(
                ias_zone::ZONE_TYPE,
                AttributeValue::Enum(ias_zone::ZoneType::CarbonMonoxideSensor as u16),
            ),
        );
        state.commit(ias_zone::ZONE_TYPE, AttributeValue::Enum(0));
        assert_eq!(
            state.get(ias_zone::ZONE_TYPE),
            Some(AttributeValue::Enum(0x002B))
        );
        assert_eq!(state.get(ias_zone::ZONE_STATUS), None);
    }

    #[test]
    fn test_mirrored_cluster_holds_no_state() {
        let mut state = ClusterState::new(&general::BASIC, StoragePolicy::Mirrored);
        state.commit(0x0004, AttributeValue::Int(1));
        assert!(!state.is_local());
        assert_eq!(state.get(0x0004), None);
    }

    #[test]
    fn test_coerce_error_kinds() {
        let state = ClusterState::new(&ias_zone::CLUSTER, StoragePolicy::Local);
        let attr = ias_zone::CLUSTER.attribute("zone_status").unwrap();
        assert!(matches!(
            state.prepare(attr, AttributeValue::Number(1.0)),
            Err(BridgeError::TypeMismatch {
                cluster: "ias_zone",
                ..
            })
        ));
    }
}
