use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, KeyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate a dossier for a person, company, or URL.
    Trace(TraceArgs),
    /// List suggested targets, or trace one of them.
    Suggestions(SuggestionsArgs),
    /// Show past investigations, newest first.
    History(HistoryArgs),
    /// Ask follow-up questions about a saved dossier.
    Chat(ChatArgs),
    /// Write a saved dossier as printable HTML.
    Export(ExportArgs),
    /// Account management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Gemini API key storage.
    Key {
        #[command(subcommand)]
        action: KeyCommands,
    },
    /// Connectivity, session, and key status.
    Status,
    /// Show the field manual.
    Manual,
}

#[derive(Clone, Debug, Args)]
pub struct ExportFlags {
    /// Save the dossier as JSON.
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
    /// Write a printable HTML dossier.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,
    /// Write the relationship graph as SVG.
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,
    /// Open written HTML/SVG files in the browser.
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TraceArgs {
    /// Target name or URL.
    pub query: String,
    #[command(flatten)]
    pub export: ExportFlags,
}

#[derive(Clone, Debug, Args)]
pub struct SuggestionsArgs {
    /// Trace the suggestion at this position (1-based).
    #[arg(long, value_name = "N")]
    pub run: Option<usize>,
    #[command(flatten)]
    pub export: ExportFlags,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Re-run the entry at this position (1-based, newest first).
    #[arg(long, value_name = "N")]
    pub rerun: Option<usize>,
    #[command(flatten)]
    pub export: ExportFlags,
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// Dossier JSON written by `gtrace trace --save`.
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,
    /// Write the transcript as HTML on exit.
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Dossier JSON written by `gtrace trace --save`.
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,
    /// Output HTML file.
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,
    /// Open the file in the browser.
    #[arg(long)]
    pub open: bool,
}
