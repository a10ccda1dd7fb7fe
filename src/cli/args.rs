//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Meeting summaries and action items from transcripts
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a transcript and extract its action items
    Process {
        /// Transcript file ('-' reads stdin)
        file: Option<PathBuf>,

        /// Transcript text pasted inline
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Output format printed to stdout
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write meeting_summary.txt and action_items.txt into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Write the artifact files into the configured output directory
        #[arg(short, long, conflicts_with = "output_dir")]
        save: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and action items
    Text,
    /// JSON run report
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
