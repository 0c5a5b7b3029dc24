//! sysprobe-lib: platform discovery for sysprobe
//!
//! Resolves, once at startup, where the application should look for its
//! configuration, data and cache, and who and what it is running on:
//! - `PlatformRecord`: the resolved directories and identity facts
//! - `PlatformBuilder`: one-shot construction from explicit sources
//! - `PathList`: ordered, deduplicated directory search lists

pub mod platform;

pub use platform::{PlatformBuilder, PlatformRecord};
