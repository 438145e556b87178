//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Network metering advisor
///
/// Reports whether the active network connection is metered, watches for
/// connectivity transitions, and serves a line-delimited JSON method channel.
#[derive(Debug, Parser)]
#[command(name = "net-advisor")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run (default: query)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Safety-net polling interval in seconds while watching
    #[arg(long = "poll-interval", global = true)]
    pub poll_interval: Option<u64>,

    /// Ignore platform change notifications, rely on polling only
    #[arg(long = "poll-only", global = true)]
    pub poll_only: bool,

    /// Do not ask NetworkManager for the metered flag (Linux)
    #[arg(long = "no-network-manager", global = true)]
    pub no_network_manager: bool,

    /// Path to the nmcli executable (Linux)
    #[arg(long = "nmcli-path", global = true)]
    pub nmcli_path: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for net-advisor
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current network classification once
    Query,
    /// Print every connectivity transition until interrupted
    Watch,
    /// Answer method-channel requests from stdin, one JSON object per line
    Serve,
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "net-advisor.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the subcommand, defaulting to [`Command::Query`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Query)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
