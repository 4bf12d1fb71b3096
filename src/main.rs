mod auth;
mod cache;
mod commands;
mod config;
mod display;
mod event;
mod gist;
mod logging;
mod property;
mod store;
mod sync;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "terrenos")]
#[command(about = "Land plot listings kept in a GitHub Gist, with an offline cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/terrenos/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Write logs to this file instead of stderr
  #[arg(long, global = true)]
  log_file: Option<PathBuf>,

  /// Debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Keep the guard alive so buffered log lines are flushed on exit
  let _log_guard = logging::init(args.log_file.as_deref(), args.verbose)?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  commands::execute(config, args.command).await
}
