//! Command-line surface for the posemetric demo harness.

pub mod session;

use clap::{Parser, Subcommand};

/// posemetric command-line tool.
#[derive(Parser)]
#[command(name = "posemetric", version, about = "Biomechanical pose-analysis demo harness")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a synthetic capture session and print per-frame biomarkers
    Session(session::SessionArgs),
    /// Print version information
    Version,
}
