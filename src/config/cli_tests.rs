//! Tests for CLI argument parsing.

use super::cli::{Cli, Command};
use std::path::PathBuf;

mod parsing {
    use super::*;

    #[test]
    fn no_args_defaults_to_query() {
        let cli = Cli::parse_from_iter(["net-advisor"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Command::Query);
        assert!(!cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_subcommands() {
        let watch = Cli::parse_from_iter(["net-advisor", "watch"]);
        assert_eq!(watch.command(), Command::Watch);

        let serve = Cli::parse_from_iter(["net-advisor", "serve"]);
        assert_eq!(serve.command(), Command::Serve);

        let query = Cli::parse_from_iter(["net-advisor", "query", "--json"]);
        assert_eq!(query.command(), Command::Query);
        assert!(query.json);
    }

    #[test]
    fn global_options_work_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "net-advisor",
            "watch",
            "--poll-interval",
            "5",
            "--poll-only",
            "--no-network-manager",
            "-v",
        ]);

        assert_eq!(cli.poll_interval, Some(5));
        assert!(cli.poll_only);
        assert!(cli.no_network_manager);
        assert!(cli.verbose);
    }

    #[test]
    fn parses_paths() {
        let cli = Cli::parse_from_iter([
            "net-advisor",
            "--config",
            "/etc/net-advisor.toml",
            "--nmcli-path",
            "/usr/bin/nmcli",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/net-advisor.toml")));
        assert_eq!(cli.nmcli_path, Some(PathBuf::from("/usr/bin/nmcli")));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = Cli::parse_from_iter(["net-advisor", "init"]);

        assert!(cli.is_init());
        assert_eq!(
            cli.command,
            Some(Command::Init {
                output: PathBuf::from("net-advisor.toml")
            })
        );
    }

    #[test]
    fn init_accepts_custom_output() {
        let cli = Cli::parse_from_iter(["net-advisor", "init", "-o", "custom.toml"]);

        assert_eq!(
            cli.command,
            Some(Command::Init {
                output: PathBuf::from("custom.toml")
            })
        );
    }

    #[test]
    fn other_commands_are_not_init() {
        assert!(!Cli::parse_from_iter(["net-advisor", "serve"]).is_init());
        assert!(!Cli::parse_from_iter(["net-advisor"]).is_init());
    }
}

mod rejection {
    use super::*;
    use clap::Parser;

    #[test]
    fn unknown_subcommand_is_rejected() {
        let result = Cli::try_parse_from(["net-advisor", "isActiveNetworkFast"]);
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let result = Cli::try_parse_from(["net-advisor", "--poll-interval", "soon"]);
        assert!(result.is_err());
    }
}
