//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Change monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Platform probe configuration
    #[serde(default)]
    pub probe: ProbeSection,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval in seconds
    pub poll_interval: Option<u64>,

    /// Ignore platform change notifications
    #[serde(default)]
    pub poll_only: bool,
}

/// Probe configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSection {
    /// Ask NetworkManager for the metered flag
    pub network_manager: Option<bool>,

    /// Path to the nmcli executable
    pub nmcli_path: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# net-advisor configuration file

[monitor]
# Safety-net polling interval in seconds while watching (default: 30)
poll_interval = 30

# Ignore platform change notifications and rely on polling only
# poll_only = false

[probe]
# Ask NetworkManager for the metered flag (Linux, default: true)
# Without it, only cellular links are known to be metered and every
# other link is conservatively reported as metered.
network_manager = true

# Path to the nmcli executable (default: "nmcli" from PATH)
# nmcli_path = "/usr/bin/nmcli"
"#
    .to_string()
}
