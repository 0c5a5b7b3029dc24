//! Platform detection: search directories and user/machine identity.
//!
//! [`PlatformRecord::detect`] is the entry point. It reads the environment and
//! the host once, runs every resolver in dependency order (executable path,
//! home, cache, config dirs, data dirs, user, host, shell, kernel fields, page
//! size) and returns an immutable record.

pub mod env;
pub mod os;
pub mod path_list;
pub mod probe;
pub mod record;
pub mod resolve;

pub use env::{Environment, MapEnv, ProcessEnv};
pub use os::{Os, PlatformTraits};
pub use path_list::PathList;
pub use probe::{HostProbe, IdentitySources, KernelIdentity, NativeProbe, PasswdEntry, StaticProbe};
pub use record::{PlatformBuilder, PlatformRecord};
pub use resolve::SystemDirs;
