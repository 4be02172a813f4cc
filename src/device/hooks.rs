//! Post-write hooks for composite attributes.
//!
//! A hook is registered on one attribute of a cluster. After a value is
//! committed to that attribute, the hook derives further writes on the same
//! cluster. Derived writes are committed without consulting any hook, so a
//! hook never observes its own output.

use crate::zcl::AttributeValue;

/// A write produced by a [`PostWriteHook`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedWrite {
    pub attribute: &'static str,
    pub value: AttributeValue,
}

/// Derives follow-up writes from a committed composite value.
pub trait PostWriteHook: Send + Sync {
    /// Compute the writes implied by `value`.
    ///
    /// Must be pure. An empty result means nothing to republish.
    fn derive(&self, value: &AttributeValue) -> Vec<DerivedWrite>;
}

/// Republishes `measured_value` from a `custom_temperature` struct.
///
/// The device reports tenths of a degree; the cluster expects centidegrees.
pub struct TemperatureRecompute;

impl PostWriteHook for TemperatureRecompute {
    fn derive(&self, value: &AttributeValue) -> Vec<DerivedWrite> {
        match value {
            AttributeValue::Temperature(t) => vec![DerivedWrite {
                attribute: "measured_value",
                value: AttributeValue::Int(t.centidegrees()),
            }],
            _ => Vec::new(),
        }
    }
}
