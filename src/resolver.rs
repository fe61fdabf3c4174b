//! Lookup helpers turning a bundler-provided key into an optional value.
//!
//! Route patterns and asset types are both configured the same way: either a static table
//! or a callable. Both shapes are unified behind [`Resolver::resolve`], which treats an
//! empty result the same as a missing one.

use std::collections::BTreeMap;
use std::fmt;

type ResolveFn = dyn Fn(&str) -> Option<String>;

/// Static table or callable mapping a key to a value.
pub enum Resolver {
  /// Exact-match lookup table.
  Table(BTreeMap<String, String>),
  /// Caller-supplied resolution function.
  Callable(Box<ResolveFn>),
}

impl Resolver {
  /// Build a table resolver from key/value pairs.
  pub fn table<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    Self::Table(
      entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect(),
    )
  }

  /// Wrap a closure as a resolver.
  pub fn from_fn<F>(resolve: F) -> Self
  where
    F: Fn(&str) -> Option<String> + 'static,
  {
    Self::Callable(Box::new(resolve))
  }

  /// Resolve `key`, returning `None` for missing or empty results.
  pub fn resolve(&self, key: &str) -> Option<String> {
    let value = match self {
      Self::Table(table) => table.get(key).cloned(),
      Self::Callable(resolve) => resolve(key),
    };
    value.filter(|value| !value.is_empty())
  }
}

impl From<BTreeMap<String, String>> for Resolver {
  fn from(table: BTreeMap<String, String>) -> Self {
    Self::Table(table)
  }
}

impl fmt::Debug for Resolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Table(table) => f.debug_tuple("Table").field(table).finish(),
      Self::Callable(_) => f.write_str("Callable(..)"),
    }
  }
}
