//! Dirs command implementation.
//!
//! Prints one search directory per line, most-preferred first, for use in scripts.

use clap::ValueEnum;
use sysprobe_lib::PlatformRecord;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirKind {
  Config,
  Data,
  Cache,
}

pub fn cmd_dirs(record: &PlatformRecord, kind: DirKind) {
  match kind {
    DirKind::Config => record.config_dirs().iter().for_each(|dir| println!("{}", dir)),
    DirKind::Data => record.data_dirs().iter().for_each(|dir| println!("{}", dir)),
    DirKind::Cache => println!("{}", record.cache_dir()),
  }
}
