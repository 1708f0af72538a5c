//! posemetric CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use posemetric_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Session(args) => {
            posemetric_cli::session::execute(args).await?;
        }
        Commands::Version => {
            println!("posemetric {}", env!("CARGO_PKG_VERSION"));
            println!("core module version: {}", posemetric_core::VERSION);
        }
    }

    Ok(())
}
