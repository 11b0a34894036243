//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::services::OutputFormat;
use crate::config::BuildMode;

/// Build and draw binary trees from list literals: level-order or AVL-balanced
#[derive(Parser, Debug)]
#[command(name = "treeviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log to stderr, repeat for more detail (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the tree encoded breadth-first, e.g. "[1, 2, 3, None, None, 4, 5]"
    LevelOrder {
        /// Level-order values, None marks an absent node
        values: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
    },

    /// Insert keys one by one into an AVL tree, e.g. "[10, 20, 30]"
    Balanced {
        /// Keys in insertion order, None entries are skipped
        keys: String,
        /// Treat keys as text instead of integers
        #[arg(long)]
        text: bool,
        /// Show the stored height next to each key
        #[arg(long)]
        heights: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
    },

    /// Build with the configured mode (or --mode)
    Show {
        /// List literal
        input: String,
        /// Builder to use (default: from config)
        #[arg(short, long, value_enum)]
        mode: Option<BuildMode>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
