//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Conversational Premier League information agent.
#[derive(Debug, Parser)]
#[command(name = "pitchside", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every player position present in the current squads
    Positions,
}
