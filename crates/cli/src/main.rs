use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// sitestack - declare and ship a static website hosting stack
#[derive(Parser)]
#[command(name = "sitestack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Render the resource template for a site configuration
  Synth {
    /// Path to the configuration file
    #[arg(default_value = "site.toml")]
    config: PathBuf,

    /// Directory the template is written to
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
  },

  /// Stage site assets and produce the deploy manifest
  Deploy {
    /// Path to the configuration file
    #[arg(default_value = "site.toml")]
    config: PathBuf,

    /// Directory the deploy manifest is written to
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
  },

  /// Check a configuration without writing anything
  Validate {
    /// Path to the configuration file
    #[arg(default_value = "site.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short = 'o', long, default_value = "text")]
    format: output::OutputFormat,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Synth { config, out } => cmd::cmd_synth(&config, &out),
    Commands::Deploy { config, out } => cmd::cmd_deploy(&config, &out),
    Commands::Validate { config, format } => cmd::cmd_validate(&config, format),
  }
}
