use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gtrace` binary.
#[derive(Debug, Parser)]
#[command(name = "gtrace", version, about = "GhostTrace - grounded OSINT dossiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep history in memory only and never contact the backend
    #[arg(long, global = true)]
    pub offline: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            offline: self.offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{AuthCommands, KeyCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_format_is_table() {
        let cli = Cli::try_parse_from(["gtrace", "manual"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.offline);
    }

    #[test]
    fn trace_takes_query_and_exports() {
        let cli = Cli::try_parse_from([
            "gtrace",
            "trace",
            "Nestlé",
            "--html",
            "out.html",
            "--svg",
            "graph.svg",
            "--offline",
        ])
        .expect("cli should parse");
        assert!(cli.offline);
        match cli.command {
            Commands::Trace(args) => {
                assert_eq!(args.query, "Nestlé");
                assert_eq!(args.export.html.as_deref(), Some(std::path::Path::new("out.html")));
                assert!(args.export.save.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["gtrace", "history", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from(["gtrace", "auth", "login", "--email", "a@b.c"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Auth { action: AuthCommands::Login(_) }));

        let cli = Cli::try_parse_from(["gtrace", "key", "set", "AIza-test"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Key { action: KeyCommands::Set { .. } }));
    }

    #[test]
    fn chat_requires_report() {
        assert!(Cli::try_parse_from(["gtrace", "chat"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["gtrace", "--format", "xml", "status"]).is_err());
    }
}
