//! Command-line interface for questvox
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Spoken quest announcements from a game memory reader
#[derive(Parser, Debug)]
#[command(
    name = "questvox",
    version,
    about = "Spoken quest announcements from a game memory reader"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: skipped-line diagnostics + run summary)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the game memory reader executable
    #[arg(long, value_name = "PATH")]
    pub reader: Option<PathBuf>,

    /// Language code for speech synthesis (e.g. en, de, fr)
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Google Translate top-level domain (e.g. com, de)
    #[arg(long, value_name = "TLD")]
    pub tld: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize and play a single phrase, bypassing the reader
    Say {
        /// Text to speak
        text: String,
    },

    /// Check reader executable, audio output, and artifact directory
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
