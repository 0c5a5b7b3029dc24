//! The platform record and the one-shot builder that fills it.

use serde::Serialize;
use tracing::debug;

use super::env::{Environment, ProcessEnv};
use super::os::PlatformTraits;
use super::path_list::PathList;
use super::probe::{HostProbe, NativeProbe};
use super::resolve::{self, SystemDirs};

/// Locations and identity facts about the current user and machine.
///
/// Every non-empty directory value ends with exactly one `/`. Search lists are
/// ordered most-preferred first and always end with the compiled-in system
/// directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformRecord {
  exe_path: String,
  home_dir: String,
  cache_dir: String,
  config_dirs: PathList,
  data_dirs: PathList,
  user_name: String,
  host_name: String,
  user_shell: String,
  system_name: String,
  system_release: String,
  system_version: String,
  system_architecture: String,
  system_display_version: String,
  page_size: u32,
}

impl PlatformRecord {
  /// Detect the platform of the running process
  pub fn detect() -> Self {
    PlatformBuilder::new(&ProcessEnv, &NativeProbe).build()
  }

  /// Absolute path of the running executable, empty if it could not be determined.
  pub fn exe_path(&self) -> &str {
    &self.exe_path
  }

  pub fn home_dir(&self) -> &str {
    &self.home_dir
  }

  pub fn cache_dir(&self) -> &str {
    &self.cache_dir
  }

  pub fn config_dirs(&self) -> &PathList {
    &self.config_dirs
  }

  pub fn data_dirs(&self) -> &PathList {
    &self.data_dirs
  }

  pub fn user_name(&self) -> &str {
    &self.user_name
  }

  pub fn host_name(&self) -> &str {
    &self.host_name
  }

  pub fn user_shell(&self) -> &str {
    &self.user_shell
  }

  /// Kernel name, e.g. `Linux` or `Darwin`.
  pub fn system_name(&self) -> &str {
    &self.system_name
  }

  pub fn system_release(&self) -> &str {
    &self.system_release
  }

  pub fn system_version(&self) -> &str {
    &self.system_version
  }

  /// Machine hardware name, e.g. `x86_64` or `arm64`.
  pub fn system_architecture(&self) -> &str {
    &self.system_architecture
  }

  /// Marketing version of the OS. Always empty here; left for a distribution-aware layer.
  pub fn system_display_version(&self) -> &str {
    &self.system_display_version
  }

  /// Page size in bytes, `0` if the query failed.
  pub fn page_size(&self) -> u32 {
    self.page_size
  }
}

/// Builds a [`PlatformRecord`] from explicit sources.
///
/// `build` consumes the builder, so a record is populated exactly once.
pub struct PlatformBuilder<'a> {
  env: &'a dyn Environment,
  probe: &'a dyn HostProbe,
  traits: Option<&'a dyn PlatformTraits>,
  system_dirs: SystemDirs,
}

impl<'a> PlatformBuilder<'a> {
  /// Uses the conventions of [`HostProbe::os`] and [`SystemDirs::compiled`] unless overridden.
  pub fn new(env: &'a dyn Environment, probe: &'a dyn HostProbe) -> Self {
    Self {
      env,
      probe,
      traits: None,
      system_dirs: SystemDirs::compiled(),
    }
  }

  pub fn platform_traits(mut self, traits: &'a dyn PlatformTraits) -> Self {
    self.traits = Some(traits);
    self
  }

  pub fn system_dirs(mut self, system_dirs: SystemDirs) -> Self {
    self.system_dirs = system_dirs;
    self
  }

  pub fn build(self) -> PlatformRecord {
    let probed_os = self.probe.os();
    let traits: &dyn PlatformTraits = match self.traits {
      Some(traits) => traits,
      None => &probed_os,
    };
    let identity = self.probe.identity();
    let passwd = identity.passwd.as_ref();
    let kernel = identity.kernel;

    let exe_path = self.probe.exe_path().unwrap_or_default();
    if exe_path.is_empty() {
      debug!("executable path unavailable");
    }

    let home_dir = resolve::home_dir(self.env, passwd);
    let cache_dir = resolve::cache_dir(self.env, &home_dir);
    let config_dirs = resolve::config_dirs(self.env, &home_dir, traits, &self.system_dirs);
    let data_dirs = resolve::data_dirs(self.env, &home_dir, &exe_path, traits, &self.system_dirs);

    let user_name = resolve::user_name(self.env, passwd);
    let host_name = resolve::host_name(&kernel);
    let user_shell = resolve::user_shell(self.env, passwd);

    let page_size = self.probe.page_size().unwrap_or_else(|| {
      debug!("page size unavailable");
      0
    });

    let record = PlatformRecord {
      exe_path,
      home_dir,
      cache_dir,
      config_dirs,
      data_dirs,
      user_name,
      host_name,
      user_shell,
      system_name: kernel.sysname,
      system_release: kernel.release,
      system_version: kernel.version,
      system_architecture: kernel.machine,
      system_display_version: String::new(),
      page_size,
    };

    debug!(
      home = %record.home_dir,
      config_dirs = record.config_dirs.len(),
      data_dirs = record.data_dirs.len(),
      "platform detected"
    );

    record
  }
}
