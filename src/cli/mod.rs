//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Domekeeper using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Domekeeper - botanical dome inventory ingestion and reconciliation
#[derive(Parser, Debug)]
#[command(name = "domekeeper")]
#[command(version, about, long_about = None)]
#[command(author = "Domekeeper Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "domekeeper.toml", env = "DOMEKEEPER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOMEKEEPER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a workbook and print its domes and counts
    Load(commands::load::LoadArgs),

    /// List the plants of one dome
    List(commands::list::ListArgs),

    /// Show one plant by its sheet row
    Show(commands::show::ShowArgs),

    /// Search a dome by common or scientific name
    Search(commands::search::SearchArgs),

    /// Reconcile a workbook against the configured store
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
