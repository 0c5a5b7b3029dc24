mod cmd;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sysprobe_lib::PlatformRecord;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cmd::{DirKind, cmd_dirs, cmd_info};
use output::{OutputFormat, print_error};

/// sysprobe - report where this machine keeps config, data and cache, and who is running
#[derive(Parser)]
#[command(name = "sysprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the detected system, user and search directories
  Info {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Print a search list, one directory per line
  Dirs {
    #[arg(value_enum)]
    kind: DirKind,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let record = PlatformRecord::detect();
  debug!(exe = record.exe_path(), "platform record ready");

  match cli.command {
    Commands::Info { format } => cmd_info(&record, format)?,
    Commands::Dirs { kind } => cmd_dirs(&record, kind),
  }

  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
