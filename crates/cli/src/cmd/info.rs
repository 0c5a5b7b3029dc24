//! Info command implementation.
//!
//! Displays the detected user, machine and search directories.

use anyhow::Result;
use sysprobe_lib::PlatformRecord;

use crate::output::{
  OutputFormat, UNKNOWN, format_bytes, or_unknown, print_heading, print_json, print_list_item, print_stat,
};

pub fn cmd_info(record: &PlatformRecord, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    return print_json(record);
  }

  print_heading("System:");
  print_stat("Name", or_unknown(record.system_name()));
  print_stat("Release", or_unknown(record.system_release()));
  print_stat("Version", or_unknown(record.system_version()));
  print_stat("Architecture", or_unknown(record.system_architecture()));
  print_stat("Host", or_unknown(record.host_name()));
  let page_size = match record.page_size() {
    0 => UNKNOWN.to_string(),
    size => format_bytes(u64::from(size)),
  };
  print_stat("Page size", &page_size);
  println!();

  print_heading("User:");
  print_stat("Name", or_unknown(record.user_name()));
  print_stat("Shell", or_unknown(record.user_shell()));
  print_stat("Home", record.home_dir());
  print_stat("Cache", record.cache_dir());
  print_stat("Executable", or_unknown(record.exe_path()));
  println!();

  print_heading("Config directories:");
  for dir in record.config_dirs() {
    print_list_item(dir);
  }
  println!();

  print_heading("Data directories:");
  for dir in record.data_dirs() {
    print_list_item(dir);
  }

  Ok(())
}
