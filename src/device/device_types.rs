//! Profile and device type identifiers used in device topologies.
//!
//! Values follow the Zigbee Home Automation and Green Power profiles.

/// Zigbee Home Automation profile
///
/// Profile ID: 0x0104 (260 decimal)
pub const HA_PROFILE_ID: u16 = 0x0104;

/// Zigbee Green Power profile
///
/// Profile ID: 0xA1E0 (41440 decimal)
pub const GREEN_POWER_PROFILE_ID: u16 = 0xA1E0;

/// HA Smart Plug device type
///
/// Device Type ID: 0x0051 (81 decimal)
///
/// Tuya MCU devices announce their primary endpoint with this type
/// regardless of what they measure.
pub const SMART_PLUG: u16 = 0x0051;

/// HA IAS Zone device type
///
/// Device Type ID: 0x0402 (1026 decimal)
///
/// Required clusters:
/// - IAS Zone (0x0500)
pub const IAS_ZONE: u16 = 0x0402;

/// Green Power proxy basic device type
///
/// Device Type ID: 0x0061 (97 decimal)
pub const GREEN_POWER_PROXY_BASIC: u16 = 0x0061;
