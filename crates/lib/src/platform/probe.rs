//! Identity and OS queries.
//!
//! [`NativeProbe`] talks to the running kernel. [`StaticProbe`] replays fixed
//! values so the resolvers can be exercised without touching the host.
//!
//! ## Platform Behavior
//!
//! - **Executable path**: `/proc/self/exe` on Linux, `proc_pidpath` on macOS,
//!   `sysctl(KERN_PROC_PATHNAME)` on FreeBSD, `std::env::current_exe` elsewhere
//! - **Page size**: `sysctl(HW_PAGESIZE)` on macOS and FreeBSD, `sysconf(_SC_PAGESIZE)`
//!   on other Unix systems

use tracing::debug;

use super::os::Os;

/// The fields of the current user's passwd-database entry that resolvers read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswdEntry {
  pub name: String,
  pub home_dir: String,
  pub shell: String,
}

/// Kernel identity as reported by `uname`.
///
/// The default value has every field empty, which is what a failed query yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelIdentity {
  pub sysname: String,
  pub nodename: String,
  pub release: String,
  pub version: String,
  pub machine: String,
}

/// Snapshot of the two identity sources, taken once per detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySources {
  /// `None` when the effective user has no passwd entry (common in minimal containers).
  pub passwd: Option<PasswdEntry>,
  pub kernel: KernelIdentity,
}

/// OS queries consumed by [`PlatformBuilder`](super::record::PlatformBuilder).
///
/// None of these fail: an unavailable facility is reported as `None` or an empty value.
pub trait HostProbe {
  fn identity(&self) -> IdentitySources;

  /// Absolute path of the running executable.
  fn exe_path(&self) -> Option<String>;

  /// Virtual memory page size in bytes.
  fn page_size(&self) -> Option<u32>;

  /// OS family whose directory conventions apply.
  fn os(&self) -> Os;
}

/// Queries the host this process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProbe;

impl HostProbe for NativeProbe {
  fn identity(&self) -> IdentitySources {
    IdentitySources {
      passwd: passwd_entry(),
      kernel: kernel_identity(),
    }
  }

  fn exe_path(&self) -> Option<String> {
    exe_path().filter(|path| !path.is_empty())
  }

  fn page_size(&self) -> Option<u32> {
    page_size().filter(|size| *size > 0)
  }

  fn os(&self) -> Os {
    Os::current()
  }
}

/// Fixed answers for every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
  pub identity: IdentitySources,
  pub exe_path: Option<String>,
  pub page_size: Option<u32>,
  /// Defaults to [`Os::current`].
  pub os: Os,
}

impl HostProbe for StaticProbe {
  fn identity(&self) -> IdentitySources {
    self.identity.clone()
  }

  fn exe_path(&self) -> Option<String> {
    self.exe_path.clone()
  }

  fn page_size(&self) -> Option<u32> {
    self.page_size
  }

  fn os(&self) -> Os {
    self.os
  }
}

// ============ Identity ============

#[cfg(unix)]
fn passwd_entry() -> Option<PasswdEntry> {
  use nix::unistd::{User, geteuid};

  let uid = geteuid();
  match User::from_uid(uid) {
    Ok(Some(user)) => Some(PasswdEntry {
      name: user.name,
      home_dir: user.dir.to_string_lossy().into_owned(),
      shell: user.shell.to_string_lossy().into_owned(),
    }),
    Ok(None) => {
      debug!(uid = uid.as_raw(), "no passwd entry for effective user");
      None
    }
    Err(e) => {
      debug!(uid = uid.as_raw(), error = %e, "passwd lookup failed");
      None
    }
  }
}

#[cfg(not(unix))]
fn passwd_entry() -> Option<PasswdEntry> {
  None
}

#[cfg(unix)]
fn kernel_identity() -> KernelIdentity {
  let uts = match nix::sys::utsname::uname() {
    Ok(uts) => uts,
    Err(e) => {
      debug!(error = %e, "uname failed, kernel identity left empty");
      return KernelIdentity::default();
    }
  };

  KernelIdentity {
    sysname: uts.sysname().to_string_lossy().into_owned(),
    nodename: uts.nodename().to_string_lossy().into_owned(),
    release: uts.release().to_string_lossy().into_owned(),
    version: uts.version().to_string_lossy().into_owned(),
    machine: uts.machine().to_string_lossy().into_owned(),
  }
}

#[cfg(not(unix))]
fn kernel_identity() -> KernelIdentity {
  KernelIdentity::default()
}

// ============ Executable path ============

#[cfg(any(target_os = "linux", target_os = "android"))]
fn exe_path() -> Option<String> {
  match nix::fcntl::readlink("/proc/self/exe") {
    Ok(path) => Some(path.to_string_lossy().into_owned()),
    Err(e) => {
      debug!(error = %e, "readlink(/proc/self/exe) failed");
      None
    }
  }
}

#[cfg(target_os = "macos")]
fn exe_path() -> Option<String> {
  let mut buf = vec![0u8; libc::PROC_PIDPATHINFO_MAXSIZE as usize];
  let pid = nix::unistd::getpid().as_raw();

  // SAFETY: buf is valid for writes of buf.len() bytes for the duration of the call
  let len = unsafe { libc::proc_pidpath(pid, buf.as_mut_ptr().cast(), buf.len() as u32) };
  if len <= 0 {
    debug!(pid, "proc_pidpath returned no path");
    return None;
  }

  buf.truncate(len as usize);
  Some(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(target_os = "freebsd")]
fn exe_path() -> Option<String> {
  let mut buf = vec![0u8; libc::PATH_MAX as usize];
  let mut len = buf.len();
  let pid = nix::unistd::getpid().as_raw();
  let mut mib = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_PATHNAME, pid];

  // SAFETY: mib holds mib.len() ints, buf is valid for writes of len bytes
  let rc = unsafe {
    libc::sysctl(
      mib.as_mut_ptr(),
      mib.len() as libc::c_uint,
      buf.as_mut_ptr().cast(),
      &mut len,
      std::ptr::null_mut::<libc::c_void>(),
      0,
    )
  };
  if rc != 0 || len == 0 {
    debug!(pid, "sysctl(KERN_PROC_PATHNAME) returned no path");
    return None;
  }

  buf.truncate(len);
  if let Some(nul) = buf.iter().position(|b| *b == 0) {
    buf.truncate(nul);
  }
  Some(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "freebsd")))]
fn exe_path() -> Option<String> {
  match std::env::current_exe() {
    Ok(path) => Some(path.to_string_lossy().into_owned()),
    Err(e) => {
      debug!(error = %e, "current_exe failed");
      None
    }
  }
}

// ============ Page size ============

#[cfg(any(target_os = "macos", target_os = "freebsd"))]
fn page_size() -> Option<u32> {
  let mut mib = [libc::CTL_HW, libc::HW_PAGESIZE];
  let mut value: libc::c_int = 0;
  let mut len = std::mem::size_of::<libc::c_int>();

  // SAFETY: value is a c_int and len holds its size
  let rc = unsafe {
    libc::sysctl(
      mib.as_mut_ptr(),
      mib.len() as libc::c_uint,
      (&mut value as *mut libc::c_int).cast(),
      &mut len,
      std::ptr::null_mut::<libc::c_void>(),
      0,
    )
  };
  if rc != 0 {
    debug!("sysctl(HW_PAGESIZE) failed");
    return None;
  }

  u32::try_from(value).ok()
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "freebsd"))))]
fn page_size() -> Option<u32> {
  use nix::unistd::{SysconfVar, sysconf};

  match sysconf(SysconfVar::PAGE_SIZE) {
    Ok(Some(size)) => u32::try_from(size).ok(),
    Ok(None) => None,
    Err(e) => {
      debug!(error = %e, "sysconf(_SC_PAGESIZE) failed");
      None
    }
  }
}

#[cfg(not(unix))]
fn page_size() -> Option<u32> {
  None
}
