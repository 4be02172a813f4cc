use crate::error::{BridgeError, Result};
use crate::profiles::ProfileKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (key, value) in parse_dotenv(&content) {
        // Only set if not already set (env vars take precedence)
        if std::env::var(key).is_err() {
            // SAFETY: called once at startup, before any other thread exists
            unsafe { std::env::set_var(key, value) };
        }
    }
}

fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    let mut vars = Vec::new();
    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Find the first '=' and split there
        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            // Remove surrounding quotes if present
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }

            vars.push((key, value));
        }
    }
    vars
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Device profile events are dispatched against
    pub profile: ProfileKind,
    /// Endpoint events arrive on when they don't name one.
    /// `None` uses the profile's data point endpoint.
    pub arrival_endpoint: Option<u8>,
    /// Abort on the first event that fails to dispatch
    pub stop_on_error: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            profile: ProfileKind::Co2,
            arrival_endpoint: None,
            stop_on_error: false,
        }
    }
}

impl Config {
    /// Build the configuration from `AIR_*` environment variables.
    ///
    /// An unknown `AIR_PROFILE` is an error; malformed numeric or boolean
    /// values are ignored and the default kept.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(profile) = lookup("AIR_PROFILE") {
            config.replay.profile = ProfileKind::from_name(&profile)?;
        }
        if let Some(endpoint) = lookup("AIR_ARRIVAL_ENDPOINT")
            && let Ok(ep) = endpoint.trim().parse()
        {
            config.replay.arrival_endpoint = Some(ep);
        }
        if let Some(stop) = lookup("AIR_STOP_ON_ERROR")
            && let Some(flag) = parse_flag(&stop)
        {
            config.replay.stop_on_error = flag;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.arrival_endpoint == Some(0) {
            return Err(BridgeError::InvalidConfig(
                "endpoint 0 is reserved for the device object".to_string(),
            ));
        }
        Ok(())
    }
}
