//! Tuya air quality bridge library.
//!
//! Maps Tuya data points reported by air quality and gas sensors onto
//! Zigbee Cluster Library attributes: device profiles declare the endpoint
//! topology and a data point mapping table, and [`device::Device`] routes
//! decoded data points through value transforms into attribute state.

pub mod config;
pub mod device;
pub mod dp;
pub mod error;
pub mod input;
pub mod profiles;
pub mod zcl;

pub use error::{BridgeError, Result, TransformError};
