//! Environment lookup.
//!
//! Resolvers never call `std::env` directly; they read variables through an
//! [`Environment`] so tests can supply a fixed set of values.

use std::collections::BTreeMap;

use tracing::debug;

/// Source of environment variables.
pub trait Environment {
  /// Returns the value of `name`, or `None` if it is unset.
  fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
  fn var(&self, name: &str) -> Option<String> {
    let value = std::env::var_os(name)?;
    match value.into_string() {
      Ok(value) => Some(value),
      Err(raw) => {
        debug!(var = name, value = ?raw, "ignoring non UTF-8 environment value");
        None
      }
    }
  }
}

/// A fixed, in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
  vars: BTreeMap<String, String>,
}

impl MapEnv {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets `name` to `value`, replacing any previous value.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.vars.insert(name.into(), value.into());
    self
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}

impl Environment for MapEnv {
  fn var(&self, name: &str) -> Option<String> {
    self.vars.get(name).cloned()
  }
}

/// Returns the value of `name` only when it is set and non-empty.
///
/// An empty variable is treated exactly like an unset one everywhere in this crate.
pub fn non_empty(env: &dyn Environment, name: &str) -> Option<String> {
  env.var(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn map_env_lookup() {
    let env: MapEnv = [("HOME", "/home/user")].into_iter().collect();
    assert_eq!(env.var("HOME").as_deref(), Some("/home/user"));
    assert_eq!(env.var("USER"), None);
  }

  #[test]
  fn empty_value_is_absent() {
    let mut env = MapEnv::new();
    env.set("SHELL", "").set("USER", "alice");
    assert_eq!(non_empty(&env, "SHELL"), None);
    assert_eq!(non_empty(&env, "USER").as_deref(), Some("alice"));
  }

  #[test]
  #[serial]
  fn process_env_reads_real_variables() {
    temp_env::with_vars(
      [("SYSPROBE_TEST_VAR", Some("value")), ("SYSPROBE_TEST_UNSET", None)],
      || {
        assert_eq!(ProcessEnv.var("SYSPROBE_TEST_VAR").as_deref(), Some("value"));
        assert_eq!(ProcessEnv.var("SYSPROBE_TEST_UNSET"), None);
      },
    );
  }
}
