//! Ordered, deduplicated directory search lists.

use serde::Serialize;
use tracing::trace;

use super::env::{Environment, non_empty};

/// Separator between entries of a `PATH`-style environment variable.
pub const LIST_DELIMITER: char = ':';

/// Returns `path` with all trailing separators replaced by exactly one.
///
/// `"/"` and `"///"` both normalize to `"/"`.
pub fn with_trailing_separator(path: &str) -> String {
  let mut normalized = path.trim_end_matches('/').to_string();
  normalized.push('/');
  normalized
}

/// Directory search list, most-preferred entry first.
///
/// Every entry ends with exactly one `/`. An entry that is already present is
/// not added again, so the first occurrence keeps its precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathList {
  entries: Vec<String>,
}

impl PathList {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends an absolute directory.
  ///
  /// Empty input is ignored.
  pub fn add_absolute(&mut self, path: &str) {
    if path.is_empty() {
      return;
    }

    let entry = with_trailing_separator(path);
    if self.entries.contains(&entry) {
      trace!(path = %entry, "skipping duplicate search path");
      return;
    }

    trace!(path = %entry, "adding search path");
    self.entries.push(entry);
  }

  /// Appends `home` joined with `suffix`.
  ///
  /// `home` is expected to end with a separator. An empty `suffix` adds `home` itself.
  /// Nothing is added when `home` is empty.
  pub fn add_home(&mut self, home: &str, suffix: &str) {
    if home.is_empty() {
      trace!(suffix, "no home directory, skipping home-relative path");
      return;
    }
    self.add_absolute(&format!("{home}{suffix}"));
  }

  /// Appends every non-empty segment of the colon-separated variable `name`.
  ///
  /// Does nothing when the variable is unset or empty.
  pub fn add_env(&mut self, env: &dyn Environment, name: &str) {
    let Some(value) = non_empty(env, name) else {
      return;
    };

    for segment in value.split(LIST_DELIMITER).filter(|s| !s.is_empty()) {
      self.add_absolute(segment);
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Whether `path` is present, compared in its normalized form.
  pub fn contains(&self, path: &str) -> bool {
    let path = with_trailing_separator(path);
    self.entries.contains(&path)
  }

  pub fn as_slice(&self) -> &[String] {
    &self.entries
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(String::as_str)
  }
}

impl<'a> IntoIterator for &'a PathList {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}
