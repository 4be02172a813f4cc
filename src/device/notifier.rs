//! Attribute change notifications.
//!
//! Every committed attribute write is published as an [`AttributeReport`]
//! to the listeners registered on the device, in commit order. This is the
//! hand-off point to the framework's reporting layer.

use crate::zcl::{AttributeDef, AttributeValue, ClusterSchema};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

/// One committed attribute write.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeReport {
    pub endpoint_id: u8,
    pub cluster_id: u16,
    pub cluster: &'static str,
    pub attribute_id: u16,
    pub attribute: &'static str,
    pub value: AttributeValue,
}

impl AttributeReport {
    pub fn new(
        endpoint_id: u8,
        schema: &ClusterSchema,
        attribute: &AttributeDef,
        value: AttributeValue,
    ) -> Self {
        Self {
            endpoint_id,
            cluster_id: schema.id,
            cluster: schema.ep_attribute,
            attribute_id: attribute.id,
            attribute: attribute.name,
            value,
        }
    }
}

impl fmt::Display for AttributeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ep{} {}.{} = {}",
            self.endpoint_id, self.cluster, self.attribute, self.value
        )
    }
}

/// Receives attribute writes as they are committed.
///
/// Called synchronously from the dispatch path, so implementations should
/// return quickly.
pub trait AttributeListener: Send + Sync {
    fn attribute_updated(&self, report: &AttributeReport);
}

/// Listener that keeps every report it receives.
///
/// # Example
/// ```ignore
/// let log = Arc::new(ReportLog::default());
/// device.add_listener(log.clone());
/// device.dispatch(1, 2, &RawValue::Value(400_000))?;
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Default)]
pub struct ReportLog {
    reports: Mutex<Vec<AttributeReport>>,
}

impl ReportLog {
    /// Snapshot of the reports received so far.
    pub fn reports(&self) -> Vec<AttributeReport> {
        self.reports.lock().clone()
    }

    /// Remove and return the reports received so far.
    pub fn take(&self) -> Vec<AttributeReport> {
        std::mem::take(&mut *self.reports.lock())
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl AttributeListener for ReportLog {
    fn attribute_updated(&self, report: &AttributeReport) {
        self.reports.lock().push(report.clone());
    }
}
