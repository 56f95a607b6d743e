//! `docfetch-mcp` binary: resolves configuration and serves MCP over stdio.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docfetch_core::Config;
use docfetch_mcp::logging::initialize_logging;

/// Serve documentation pages to MCP clients over stdio
#[derive(Parser, Debug)]
#[command(name = "docfetch-mcp")]
#[command(version)]
#[command(about = "MCP server for cached documentation pages", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Also via `DOCFETCH_CONFIG`.
    #[arg(long, value_name = "FILE", env = "DOCFETCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    Ok(base.with_env_overrides()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.verbose)?;

    let config = load_config(&cli)?;
    docfetch_mcp::serve_stdio(&config).await?;
    Ok(())
}
