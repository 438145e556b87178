//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default safety-net polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Largest accepted polling interval in seconds (one day).
pub const MAX_POLL_INTERVAL_SECS: u64 = 86_400;

/// Default `nmcli` executable, resolved through `PATH`.
pub const NMCLI: &str = "nmcli";

/// Whether NetworkManager is consulted for the metered flag by default.
pub const NETWORK_MANAGER: bool = true;

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "net-advisor";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}
