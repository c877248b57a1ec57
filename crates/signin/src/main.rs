mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// signin - Sign in with Google or GitHub from the terminal
#[derive(Parser, Debug)]
#[command(name = "signin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// File that keeps the session between invocations
    #[arg(
        long,
        global = true,
        default_value = ".signin-session.json",
        env = "SIGNIN_SESSION_FILE"
    )]
    session_file: PathBuf,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signin=info,signin_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::run(cli.command, cli.session_file).await
}
