//! Command-line grammar.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "phud",
    version,
    about = "Winamax hand history reader",
    long_about = "Reads the hand histories the Winamax client writes and reports their games, hands and players."
)]
pub struct PhudCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load every hand history of a Winamax data root
    Load {
        /// Data root (the directory holding `history` and `data`)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Worker threads, overrides the configuration
        #[arg(long)]
        workers: Option<usize>,
        /// Skip the data root layout checks
        #[arg(long)]
        no_validate: bool,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse one hand history file
    File {
        #[arg(long)]
        path: PathBuf,
        /// Print the whole parsed site as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the hands of one history file as JSON lines
    Hands {
        #[arg(long)]
        path: PathBuf,
        /// Only hands where this player acted
        #[arg(long)]
        player: Option<String>,
    },
    /// Check that a directory is a Winamax data root
    Validate {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["load", "file", "hands", "validate", "cfg"];
}
