//! Configuration layer for net-advisor.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** - `--config`, or the per-user default location
//! 3. **Built-in defaults**
//!
//! # Boolean Flag Semantics
//!
//! `--poll-only` uses OR semantics with `monitor.poll_only`: once enabled in
//! either source it stays enabled. `--no-network-manager` always disables
//! NetworkManager regardless of `probe.network_manager`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};
