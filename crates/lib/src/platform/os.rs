use std::fmt;

use serde::Serialize;

/// Per-OS directory conventions consulted by the config and data resolvers.
///
/// Implemented by [`Os`]; tests and embedders can substitute their own.
pub trait PlatformTraits {
  /// Home-relative config locations added after `~/.config/`.
  fn home_config_extras(&self) -> &'static [&'static str];

  /// Home-relative data locations added after the executable's `share` directory.
  fn home_data_extras(&self) -> &'static [&'static str];

  /// Whether `<etc>/xdg/` belongs in the system config search list.
  fn uses_xdg_system_config(&self) -> bool;
}

/// Operating system families with distinct directory conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  MacOs,
  FreeBsd,
  Other,
}

impl Os {
  /// The family this binary was compiled for
  pub const fn current() -> Self {
    if cfg!(any(target_os = "linux", target_os = "android")) {
      Self::Linux
    } else if cfg!(target_os = "macos") {
      Self::MacOs
    } else if cfg!(target_os = "freebsd") {
      Self::FreeBsd
    } else {
      Self::Other
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::FreeBsd => "freebsd",
      Self::Other => "other",
    }
  }
}

impl Default for Os {
  fn default() -> Self {
    Self::current()
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

const MACOS_CONFIG_EXTRAS: &[&str] = &["Library/Preferences/", "Library/Application Support/"];
const MACOS_DATA_EXTRAS: &[&str] = &["Library/Application Support/"];

impl PlatformTraits for Os {
  fn home_config_extras(&self) -> &'static [&'static str] {
    match self {
      Self::MacOs => MACOS_CONFIG_EXTRAS,
      _ => &[],
    }
  }

  fn home_data_extras(&self) -> &'static [&'static str] {
    match self {
      Self::MacOs => MACOS_DATA_EXTRAS,
      _ => &[],
    }
  }

  fn uses_xdg_system_config(&self) -> bool {
    !matches!(self, Self::MacOs)
  }
}
