//! Replay of recorded data point events.
//!
//! Events are read one JSON object per line:
//!
//! ```text
//! {"dp": 2, "value": {"type": "value", "data": 400000}}
//! {"endpoint": 1, "dp": 18, "value": {"type": "raw", "data": [0, 0, 0, 215]}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::config::ReplayConfig;
use crate::device::{Device, DispatchOutcome};
use crate::dp::DpEvent;
use crate::error::Result;
use log::{info, warn};
use serde::Serialize;
use std::io::BufRead;

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Parse one input line. Returns `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<DpEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Dispatch every event read from `reader` into `device`.
///
/// Lines that fail to parse or dispatch are logged and counted. With
/// `stop_on_error` set, the first failure is returned instead.
pub fn replay<R: BufRead>(
    device: &mut Device,
    reader: R,
    config: &ReplayConfig,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let result = parse_line(&line?).and_then(|event| match event {
            Some(mut event) => {
                if event.endpoint.is_none() {
                    event.endpoint = config.arrival_endpoint;
                }
                device.dispatch_event(&event).map(Some)
            }
            None => Ok(None),
        });

        match result {
            Ok(Some(DispatchOutcome::Applied(_))) => summary.applied += 1,
            Ok(Some(DispatchOutcome::Ignored)) => summary.ignored += 1,
            Ok(None) => {}
            Err(e) => {
                warn!("[Replay] line {}: {}", line_no, e);
                if config.stop_on_error {
                    return Err(e);
                }
                summary.failed += 1;
            }
        }
    }

    info!(
        "[Replay] {} applied, {} ignored, {} failed",
        summary.applied, summary.ignored, summary.failed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ReportLog;
    use crate::dp::RawValue;
    use crate::error::BridgeError;
    use crate::profiles::ProfileKind;
    use crate::zcl::AttributeValue;
    use std::io::Cursor;
    use std::sync::Arc;

    const SESSION: &str = r#"
# air quality box, one reading of each kind
{"dp": 2, "value": {"type": "value", "data": 400000}}
{"dp": 18, "value": {"type": "raw", "data": [0, 0, 0, 215]}}
{"dp": 19, "value": {"type": "value", "data": 55}}
{"dp": 101, "value": {"type": "bool", "data": true}}
{"dp": 18, "value": {"type": "raw", "data": [0, 215]}}
"#;

    fn device(kind: ProfileKind) -> (Device, Arc<ReportLog>) {
        let log = Arc::new(ReportLog::default());
        let device = Device::new(Arc::new(kind.build().unwrap())).with_listener(log.clone());
        (device, log)
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("  # note").unwrap(), None);

        let event = parse_line(r#"{"endpoint": 1, "dp": 1, "value": {"type": "bool", "data": false}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(event.endpoint, Some(1));
        assert_eq!(event.dp, 1);
        assert_eq!(event.value, RawValue::Bool(false));

        assert!(matches!(
            parse_line("{\"dp\": 1}"),
            Err(BridgeError::SerdeJsonError(_))
        ));
    }

    #[test]
    fn test_replay_counts_outcomes() {
        let (mut device, log) = device(ProfileKind::Co2);
        let summary = replay(&mut device, Cursor::new(SESSION), &ReplayConfig::default()).unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                applied: 3,
                ignored: 1,
                failed: 1,
            }
        );
        // dp 18 reports two writes
        assert_eq!(log.len(), 4);
        assert_eq!(
            device.read_attribute(1, "temperature", "measured_value"),
            Some(AttributeValue::Int(2150))
        );
    }

    #[test]
    fn test_replay_stops_on_error() {
        let (mut device, _) = device(ProfileKind::Co2);
        let config = ReplayConfig {
            stop_on_error: true,
            ..ReplayConfig::default()
        };
        let err = replay(&mut device, Cursor::new(SESSION), &config).unwrap_err();
        assert!(matches!(err, BridgeError::TransformDecode { dp_id: 18, .. }));
    }

    #[test]
    fn test_replay_uses_configured_arrival_endpoint() {
        let (mut device, _) = device(ProfileKind::Methane);
        let config = ReplayConfig {
            profile: ProfileKind::Methane,
            arrival_endpoint: Some(1),
            stop_on_error: true,
        };
        let input = "{\"dp\": 18, \"value\": {\"type\": \"bool\", \"data\": false}}\n";
        replay(&mut device, Cursor::new(input), &config).unwrap();

        assert_eq!(
            device.read_attribute(1, "ias_zone", "zone_status"),
            Some(AttributeValue::Bitmap16(1))
        );
    }
}
