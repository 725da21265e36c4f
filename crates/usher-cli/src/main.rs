use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::serve::ServeOverrides;

#[derive(Parser, Debug)]
#[command(name = "usher", version, about = "Approve user accounts waiting for database access")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the approval dashboard.
    Serve {
        /// Path to the configuration file.
        #[arg(short, long, default_value = "usher.yaml", env = "USHER_CONFIG")]
        config: PathBuf,

        /// Override dashboard.host.
        #[arg(long)]
        host: Option<String>,

        /// Override dashboard.port.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate a configuration file.
    Check {
        /// Path to the configuration file.
        #[arg(short, long, default_value = "usher.yaml", env = "USHER_CONFIG")]
        config: PathBuf,

        /// Also connect to the user store and count pending users.
        #[arg(long, default_value_t = false)]
        connect: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve { config, host, port } => {
            commands::serve::serve(config, ServeOverrides { host, port }).await?
        }
        Command::Check { config, connect } => commands::check::run(&config, connect).await?,
    }

    Ok(())
}
