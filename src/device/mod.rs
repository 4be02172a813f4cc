//! Device instances and data point dispatch.
//!
//! A [`Device`] is one physical device instantiated from a
//! [`DeviceProfile`]. It owns the attribute state of every logical endpoint
//! and routes decoded data points into it:
//!
//! 1. look the DP id up in the profile's mapping table (unknown ids are ignored)
//! 2. apply the value transform
//! 3. coerce the result to the target attribute's type and commit it
//! 4. commit any writes derived by a composite hook, reporting each write to
//!    the registered listeners in order
//!
//! Dispatch takes `&mut self`, so events for one device are processed one
//! at a time, each to completion.

pub mod cluster;
pub mod device_types;
pub mod endpoint;
pub mod hooks;
pub mod notifier;
pub mod topology;

pub use cluster::ClusterState;
pub use endpoint::Endpoint;
pub use hooks::{DerivedWrite, PostWriteHook, TemperatureRecompute};
pub use notifier::{AttributeListener, AttributeReport, ReportLog};
pub use topology::{ClusterConfig, EndpointDescriptor, StoragePolicy, Topology};

use crate::dp::{DpEvent, RawValue};
use crate::error::{BridgeError, Result};
use crate::profiles::DeviceProfile;
use crate::zcl::AttributeValue;
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;

fn notify(listeners: &[Arc<dyn AttributeListener>], report: &AttributeReport) {
    debug!("[Dispatch] {}", report);
    for listener in listeners {
        listener.attribute_updated(report);
    }
}

/// Result of dispatching one data point.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The data point is not mapped by the profile; nothing changed.
    Ignored,
    /// Attribute writes committed, in order.
    Applied(Vec<AttributeReport>),
}

/// An instantiated device: endpoints, attribute state and listeners.
pub struct Device {
    profile: Arc<DeviceProfile>,
    endpoints: BTreeMap<u8, Endpoint>,
    listeners: Vec<Arc<dyn AttributeListener>>,
}

impl Device {
    /// Instantiate the profile's topology with empty attribute state.
    pub fn new(profile: Arc<DeviceProfile>) -> Self {
        let endpoints: BTreeMap<u8, Endpoint> = profile
            .topology()
            .endpoints()
            .iter()
            .map(|descriptor| (descriptor.id, Endpoint::from_descriptor(descriptor)))
            .collect();

        info!(
            "[Device] {} profile instantiated with {} endpoint(s), {} data point(s)",
            profile.kind(),
            endpoints.len(),
            profile.mapping().len()
        );
        for endpoint in endpoints.values() {
            debug!(
                "[Device]   ep{}: profile 0x{:04X}, device type 0x{:04X}, {} input / {} output cluster(s)",
                endpoint.id(),
                endpoint.profile_id(),
                endpoint.device_type(),
                endpoint.clusters().len(),
                endpoint.output_clusters().len()
            );
        }

        Self {
            profile,
            endpoints,
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Returns self for method chaining.
    pub fn with_listener(mut self, listener: Arc<dyn AttributeListener>) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn AttributeListener>) {
        self.listeners.push(listener);
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn endpoint(&self, id: u8) -> Option<&Endpoint> {
        self.endpoints.get(&id)
    }

    /// Endpoints in ascending id order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    /// Dispatch a decoded event. Events without an endpoint are taken to
    /// arrive on the profile's data point endpoint.
    pub fn dispatch_event(&mut self, event: &DpEvent) -> Result<DispatchOutcome> {
        let arrival = event.endpoint.unwrap_or_else(|| self.profile.dp_endpoint());
        self.dispatch(arrival, event.dp, &event.value)
    }

    /// Route one data point received on `arrival_endpoint`.
    ///
    /// Unknown DP ids are ignored. A raw value the transform cannot decode
    /// fails with [`BridgeError::TransformDecode`] and leaves all state
    /// unchanged.
    pub fn dispatch(
        &mut self,
        arrival_endpoint: u8,
        dp_id: u8,
        raw: &RawValue,
    ) -> Result<DispatchOutcome> {
        let profile = Arc::clone(&self.profile);
        let Some(mapping) = profile.mapping().get(dp_id) else {
            debug!(
                "[Dispatch] {}: ignoring unmapped data point {} ({})",
                profile.kind(),
                dp_id,
                raw.kind()
            );
            return Ok(DispatchOutcome::Ignored);
        };

        let value = mapping
            .transform
            .apply(raw)
            .map_err(|source| BridgeError::TransformDecode { dp_id, source })?;

        let target = mapping.target;
        let reports = self.update_attribute(
            target.resolve_endpoint(arrival_endpoint),
            target.cluster(),
            target.attribute(),
            value,
        )?;
        Ok(DispatchOutcome::Applied(reports))
    }

    /// Write an attribute on a local cluster, running its post-write hook.
    ///
    /// The primary value is coerced first; if that fails nothing changes.
    /// It is then committed and reported before any derived write is
    /// computed, so a composite value is stored even when its derivation
    /// yields nothing usable.
    pub fn update_attribute(
        &mut self,
        endpoint_id: u8,
        cluster: &str,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<Vec<AttributeReport>> {
        let unresolved = || BridgeError::TargetAttributeUnresolved {
            endpoint_id,
            cluster: cluster.to_string(),
            attribute: attribute.to_string(),
        };

        let state = self
            .endpoints
            .get_mut(&endpoint_id)
            .and_then(|ep| ep.cluster_mut(cluster))
            .filter(|state| state.is_local())
            .ok_or_else(unresolved)?;
        let def = state.schema().attribute(attribute).ok_or_else(unresolved)?;
        let primary = state.prepare(def, value)?;

        let mut reports = Vec::with_capacity(2);
        state.commit(def.id, primary);
        reports.push(AttributeReport::new(endpoint_id, state.schema(), def, primary));
        notify(&self.listeners, &reports[0]);

        for (attr, value) in state.derive(endpoint_id, def, &primary) {
            state.commit(attr.id, value);
            let report = AttributeReport::new(endpoint_id, state.schema(), attr, value);
            notify(&self.listeners, &report);
            reports.push(report);
        }
        Ok(reports)
    }

    /// Current value of an attribute.
    ///
    /// Returns `None` for unknown slots, slots never written, and clusters
    /// mirrored from the network.
    pub fn read_attribute(
        &self,
        endpoint_id: u8,
        cluster: &str,
        attribute: &str,
    ) -> Option<AttributeValue> {
        let state = self.endpoints.get(&endpoint_id)?.cluster(cluster)?;
        let def = state.schema().attribute(attribute)?;
        state.get(def.id)
    }

    /// Every stored attribute value, keyed by endpoint, cluster and attribute.
    pub fn snapshot(&self) -> BTreeMap<(u8, &'static str, &'static str), AttributeValue> {
        let mut snapshot = BTreeMap::new();
        for endpoint in self.endpoints.values() {
            for state in endpoint.clusters() {
                let schema = state.schema();
                for attr in schema.attributes {
                    if let Some(value) = state.get(attr.id) {
                        snapshot.insert((endpoint.id(), schema.ep_attribute, attr.name), value);
                    }
                }
            }
        }
        snapshot
    }
}
