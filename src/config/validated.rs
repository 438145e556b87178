//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config,
/// or [`ValidatedConfig::load`] to also locate and read the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Safety-net polling interval while watching
    pub poll_interval: Duration,

    /// Whether to ignore platform change notifications
    pub poll_only: bool,

    /// Whether to ask NetworkManager for the metered flag
    pub network_manager: bool,

    /// The nmcli executable
    pub nmcli_path: PathBuf,

    /// Emit JSON output
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,

    /// Config file that was loaded, if any
    pub source: Option<PathBuf>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source_str = self
            .source
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ poll_interval: {}s, poll_only: {}, network_manager: {}, nmcli: {}, \
             config_file: {} }}",
            self.poll_interval.as_secs(),
            self.poll_only,
            self.network_manager,
            self.nmcli_path.display(),
            source_str,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The poll interval is zero or larger than a day
    /// - The nmcli path is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;

        // Flags only enable: true in either source wins
        let poll_only = cli.poll_only || toml.is_some_and(|t| t.monitor.poll_only);

        let network_manager = !cli.no_network_manager
            && toml
                .and_then(|t| t.probe.network_manager)
                .unwrap_or(defaults::NETWORK_MANAGER);

        let nmcli_path = Self::resolve_nmcli_path(cli, toml)?;

        Ok(Self {
            poll_interval,
            poll_only,
            network_manager,
            nmcli_path,
            json: cli.json,
            verbose: cli.verbose,
            source: None,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// Uses `cli.config` when set (the file must exist); otherwise the
    /// per-user default location is used if a file is present there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_default(cli, default_config_path().as_deref())
    }

    /// Like [`Self::load`], with an explicit fallback location.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_default(cli: &Cli, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| fallback.filter(|p| p.is_file()).map(Path::to_path_buf));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.source = path;
        Ok(config)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        if seconds > defaults::MAX_POLL_INTERVAL_SECS {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: format!(
                    "must not exceed {} seconds",
                    defaults::MAX_POLL_INTERVAL_SECS
                ),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_nmcli_path(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let path = cli
            .nmcli_path
            .clone()
            .or_else(|| toml.and_then(|t| t.probe.nmcli_path.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::NMCLI));

        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidNmcliPath {
                reason: "must not be empty".to_string(),
            });
        }

        Ok(path)
    }
}

/// Returns the per-user config file location, e.g. `~/.config/net-advisor/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR).join(defaults::CONFIG_FILE))
}

/// Writes the default configuration template to `path`.
///
/// # Errors
///
/// Returns an error if `path` already exists or cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
