//! Command-line interface for lectern
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Turn lecture recordings into summarized PDF notes
#[derive(Parser, Debug)]
#[command(
    name = "lectern",
    version,
    about = "Turn lecture recordings into summarized PDF notes"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Lecture audio file (mp3, wav, or m4a)
    #[arg(value_name = "AUDIO")]
    pub audio: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: stage progress, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Whisper model (default: tiny). Use tiny.en for English-only optimized
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de, es
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Also generate practice questions and study tips
    #[arg(long)]
    pub questions: bool,

    /// Output PDF path (default: LectureNotes.pdf)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Prevent automatic model download if configured model is missing
    #[arg(long)]
    pub no_download: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Whisper models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Check model installation, API key, and GPU support
    Check,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., stt.model)
    Get {
        /// Dotted key path (e.g., stt.model, summary.chunk_chars)
        key: String,
    },
    /// Set a configuration value by key
    Set {
        /// Dotted key path (e.g., stt.model, summary.chunk_chars)
        key: String,
        /// Value to set
        value: String,
    },
    /// List current configuration values
    List,
    /// Print the configuration file path
    Path,
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List available models
    List,
    /// Download and install a model
    Install {
        /// Model name (e.g., tiny, base.en, small)
        name: String,
    },
    /// Set the default transcription model
    Use {
        /// Model name (e.g., tiny, base.en, large-v3)
        name: String,
    },
}
