//! Tuya data points: decoded values, transforms and mapping tables.

pub mod mapping;
pub mod raw;
pub mod transform;

pub use mapping::{AttributeTarget, DataPointMapping, MappingTable};
pub use raw::{DpEvent, RawValue};
pub use transform::ValueTransform;
