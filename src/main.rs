use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use posts_proxy::config;
use posts_proxy::lifecycle;

/// Passthrough proxy for an upstream blog posts REST API.
#[derive(Parser)]
#[command(name = "posts-proxy", version)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("posts-proxy: {e}");
            return ExitCode::FAILURE;
        }
    };

    match lifecycle::start(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "posts-proxy failed");
            eprintln!("posts-proxy: {e}");
            ExitCode::FAILURE
        }
    }
}
