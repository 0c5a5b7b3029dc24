//! Directory and identity resolvers.
//!
//! Each resolver reads only the inputs it is handed, so the full fallback chain
//! of every field can be exercised with a [`MapEnv`](super::env::MapEnv) and
//! hand-built identity records.

use tracing::debug;

use super::env::{Environment, non_empty};
use super::os::PlatformTraits;
use super::path_list::{PathList, with_trailing_separator};
use super::probe::{KernelIdentity, PasswdEntry};

/// Install directories fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemDirs {
  /// System configuration root, `/etc` by default.
  pub etc: String,
  /// Configuration directory of the install prefix.
  pub sysconf: String,
  /// Root containing `share/` and `local/share/`.
  pub usr: String,
}

impl SystemDirs {
  /// Directories baked in through the `SYSPROBE_DIR_ETC`, `SYSPROBE_DIR_SYSCONF`
  /// and `SYSPROBE_DIR_USR` build-time variables.
  pub fn compiled() -> Self {
    Self {
      etc: option_env!("SYSPROBE_DIR_ETC").unwrap_or("/etc").to_string(),
      sysconf: option_env!("SYSPROBE_DIR_SYSCONF").unwrap_or("/usr/local/etc").to_string(),
      usr: option_env!("SYSPROBE_DIR_USR").unwrap_or("/usr").to_string(),
    }
  }
}

impl Default for SystemDirs {
  fn default() -> Self {
    Self::compiled()
  }
}

/// `$HOME`, else the passwd home directory, with a trailing separator.
///
/// Empty when neither source is available. Home-relative entries are then
/// left out of every search list.
pub fn home_dir(env: &dyn Environment, passwd: Option<&PasswdEntry>) -> String {
  match non_empty(env, "HOME").or_else(|| passwd.map(|pw| pw.home_dir.clone()).filter(|dir| !dir.is_empty())) {
    Some(home) => with_trailing_separator(&home),
    None => {
      debug!("HOME is unset and no passwd entry exists, home directory left empty");
      String::new()
    }
  }
}

/// `$XDG_CACHE_HOME`, else `<home>/.cache/`, else empty.
pub fn cache_dir(env: &dyn Environment, home: &str) -> String {
  match non_empty(env, "XDG_CACHE_HOME") {
    Some(cache) => with_trailing_separator(&cache),
    None if home.is_empty() => {
      debug!("no cache directory available");
      String::new()
    }
    None => format!("{home}.cache/"),
  }
}

/// Config search list in precedence order.
pub fn config_dirs(env: &dyn Environment, home: &str, traits: &dyn PlatformTraits, system: &SystemDirs) -> PathList {
  let mut dirs = PathList::new();

  dirs.add_env(env, "XDG_CONFIG_HOME");
  dirs.add_home(home, ".config/");
  for extra in traits.home_config_extras() {
    dirs.add_home(home, extra);
  }
  dirs.add_home(home, "");
  dirs.add_env(env, "XDG_CONFIG_DIRS");

  if traits.uses_xdg_system_config() {
    dirs.add_absolute(&format!("{}/xdg/", system.etc));
  }
  dirs.add_absolute(&format!("{}/", system.etc));
  dirs.add_absolute(&format!("{}/", system.sysconf));

  dirs
}

/// Data search list in precedence order.
pub fn data_dirs(
  env: &dyn Environment,
  home: &str,
  exe_path: &str,
  traits: &dyn PlatformTraits,
  system: &SystemDirs,
) -> PathList {
  let mut dirs = PathList::new();

  dirs.add_env(env, "XDG_DATA_HOME");
  dirs.add_home(home, ".local/share/");
  if let Some(share) = exe_share_dir(exe_path) {
    dirs.add_absolute(&share);
  }
  for extra in traits.home_data_extras() {
    dirs.add_home(home, extra);
  }
  dirs.add_home(home, "");
  dirs.add_env(env, "XDG_DATA_DIRS");

  dirs.add_absolute(&format!("{}/local/share/", system.usr));
  dirs.add_absolute(&format!("{}/share/", system.usr));

  dirs
}

/// `<exe>/../../share` for relocatable installs, e.g. `/opt/app/bin/app` gives `/opt/app/share`.
///
/// Returns `None` for an empty path. A path with fewer than two separators
/// collapses to `/share`.
pub fn exe_share_dir(exe_path: &str) -> Option<String> {
  if exe_path.is_empty() {
    return None;
  }

  let mut prefix = exe_path;
  for _ in 0..2 {
    prefix = prefix.rfind('/').map_or("", |idx| &prefix[..idx]);
  }

  Some(format!("{prefix}/share"))
}

/// `$USER`, else the passwd user name, else empty.
pub fn user_name(env: &dyn Environment, passwd: Option<&PasswdEntry>) -> String {
  non_empty(env, "USER")
    .or_else(|| passwd.map(|pw| pw.name.clone()))
    .unwrap_or_else(|| {
      debug!("no user name available");
      String::new()
    })
}

/// `$SHELL`, else the passwd login shell, else empty.
pub fn user_shell(env: &dyn Environment, passwd: Option<&PasswdEntry>) -> String {
  non_empty(env, "SHELL")
    .or_else(|| passwd.map(|pw| pw.shell.clone()))
    .unwrap_or_else(|| {
      debug!("no login shell available");
      String::new()
    })
}

pub fn host_name(kernel: &KernelIdentity) -> String {
  kernel.nodename.clone()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::env::MapEnv;
  use crate::platform::os::Os;

  const HOME: &str = "/home/user/";

  fn system() -> SystemDirs {
    SystemDirs {
      etc: "/etc".to_string(),
      sysconf: "/usr/local/etc".to_string(),
      usr: "/usr".to_string(),
    }
  }

  fn passwd() -> PasswdEntry {
    PasswdEntry {
      name: "pwuser".to_string(),
      home_dir: "/var/lib/pwuser".to_string(),
      shell: "/bin/zsh".to_string(),
    }
  }

  #[test]
  fn home_prefers_environment() {
    let env: MapEnv = [("HOME", "/home/env")].into_iter().collect();
    assert_eq!(home_dir(&env, Some(&passwd())), "/home/env/");
  }

  #[test]
  fn home_falls_back_to_passwd() {
    let env: MapEnv = [("HOME", "")].into_iter().collect();
    assert_eq!(home_dir(&env, Some(&passwd())), "/var/lib/pwuser/");
  }

  #[test]
  fn home_missing_everywhere_is_empty() {
    assert_eq!(home_dir(&MapEnv::new(), None), "");
  }

  #[test]
  fn home_keeps_single_trailing_separator() {
    let env: MapEnv = [("HOME", "/home/user//")].into_iter().collect();
    assert_eq!(home_dir(&env, None), "/home/user/");
  }

  #[test]
  fn cache_override_wins() {
    let env: MapEnv = [("XDG_CACHE_HOME", "/custom/cache")].into_iter().collect();
    assert_eq!(cache_dir(&env, HOME), "/custom/cache/");
  }

  #[test]
  fn cache_without_home_is_empty() {
    assert_eq!(cache_dir(&MapEnv::new(), ""), "");
  }

  #[test]
  fn cache_defaults_under_home() {
    assert_eq!(cache_dir(&MapEnv::new(), HOME), "/home/user/.cache/");
  }

  #[test]
  fn config_dirs_linux_order() {
    let dirs = config_dirs(&MapEnv::new(), HOME, &Os::Linux, &system());
    assert_eq!(
      dirs.as_slice(),
      [
        "/home/user/.config/",
        "/home/user/",
        "/etc/xdg/",
        "/etc/",
        "/usr/local/etc/",
      ]
    );
  }

  #[test]
  fn config_dirs_macos_order() {
    let dirs = config_dirs(&MapEnv::new(), HOME, &Os::MacOs, &system());
    assert_eq!(
      dirs.as_slice(),
      [
        "/home/user/.config/",
        "/home/user/Library/Preferences/",
        "/home/user/Library/Application Support/",
        "/home/user/",
        "/etc/",
        "/usr/local/etc/",
      ]
    );
  }

  #[test]
  fn config_dirs_environment_precedence() {
    let env: MapEnv = [("XDG_CONFIG_HOME", "/x:/y/"), ("XDG_CONFIG_DIRS", "/sys/a::/sys/b")]
      .into_iter()
      .collect();
    let dirs = config_dirs(&env, HOME, &Os::Linux, &system());
    assert_eq!(
      dirs.as_slice(),
      [
        "/x/",
        "/y/",
        "/home/user/.config/",
        "/home/user/",
        "/sys/a/",
        "/sys/b/",
        "/etc/xdg/",
        "/etc/",
        "/usr/local/etc/",
      ]
    );
  }

  #[test]
  fn config_dirs_drop_duplicates() {
    let dirs = config_dirs(&MapEnv::new(), "/etc/", &Os::Linux, &system());
    assert_eq!(dirs.iter().filter(|d| *d == "/etc/").count(), 1);
    assert_eq!(dirs.as_slice()[0], "/etc/.config/");
    assert_eq!(dirs.as_slice()[1], "/etc/");
  }

  #[test]
  fn data_dirs_with_relocatable_exe() {
    let dirs = data_dirs(&MapEnv::new(), HOME, "/opt/app/bin/app", &Os::Linux, &system());
    assert_eq!(
      dirs.as_slice(),
      [
        "/home/user/.local/share/",
        "/opt/app/share/",
        "/home/user/",
        "/usr/local/share/",
        "/usr/share/",
      ]
    );
  }

  #[test]
  fn data_dirs_macos_and_env() {
    let env: MapEnv = [("XDG_DATA_HOME", "/data/home"), ("XDG_DATA_DIRS", "/d1:/d2")]
      .into_iter()
      .collect();
    let dirs = data_dirs(&env, HOME, "", &Os::MacOs, &system());
    assert_eq!(
      dirs.as_slice(),
      [
        "/data/home/",
        "/home/user/.local/share/",
        "/home/user/Library/Application Support/",
        "/home/user/",
        "/d1/",
        "/d2/",
        "/usr/local/share/",
        "/usr/share/",
      ]
    );
  }

  #[test]
  fn system_fallbacks_always_present() {
    let env = MapEnv::new();
    let config = config_dirs(&env, HOME, &Os::Other, &system());
    let data = data_dirs(&env, HOME, "", &Os::Other, &system());

    assert_eq!(config.as_slice()[config.len() - 2..], ["/etc/", "/usr/local/etc/"]);
    assert_eq!(data.as_slice()[data.len() - 2..], ["/usr/local/share/", "/usr/share/"]);
  }

  #[test]
  fn no_home_leaves_only_absolute_entries() {
    let env = MapEnv::new();
    let config = config_dirs(&env, "", &Os::MacOs, &system());
    let data = data_dirs(&env, "", "", &Os::MacOs, &system());

    assert_eq!(config.as_slice(), ["/etc/", "/usr/local/etc/"]);
    assert_eq!(data.as_slice(), ["/usr/local/share/", "/usr/share/"]);
  }

  #[test]
  fn exe_share_dir_strips_two_segments() {
    assert_eq!(exe_share_dir("/opt/app/bin/app").as_deref(), Some("/opt/app/share"));
    assert_eq!(exe_share_dir("/usr/bin/app").as_deref(), Some("/usr/share"));
  }

  #[test]
  fn exe_share_dir_short_paths() {
    assert_eq!(exe_share_dir(""), None);
    assert_eq!(exe_share_dir("app").as_deref(), Some("/share"));
    assert_eq!(exe_share_dir("/app").as_deref(), Some("/share"));
  }

  #[test]
  fn user_name_chain() {
    let env: MapEnv = [("USER", "envuser")].into_iter().collect();
    assert_eq!(user_name(&env, Some(&passwd())), "envuser");
    assert_eq!(user_name(&MapEnv::new(), Some(&passwd())), "pwuser");
    assert_eq!(user_name(&MapEnv::new(), None), "");
  }

  #[test]
  fn user_shell_chain() {
    let env: MapEnv = [("SHELL", "/usr/bin/fish")].into_iter().collect();
    assert_eq!(user_shell(&env, Some(&passwd())), "/usr/bin/fish");
    assert_eq!(user_shell(&MapEnv::new(), Some(&passwd())), "/bin/zsh");
    assert_eq!(user_shell(&MapEnv::new(), None), "");
  }

  #[test]
  #[tracing_test::traced_test]
  fn missing_identity_fields_are_logged() {
    assert_eq!(user_name(&MapEnv::new(), None), "");
    assert_eq!(user_shell(&MapEnv::new(), None), "");
    assert!(logs_contain("no user name available"));
    assert!(logs_contain("no login shell available"));
  }

  #[test]
  fn host_name_is_nodename() {
    let kernel = KernelIdentity {
      nodename: "box".to_string(),
      ..Default::default()
    };
    assert_eq!(host_name(&kernel), "box");
  }
}
