//! Data structures produced while deriving a route manifest.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Route pattern holding assets shared by every route (entry and runtime chunks).
pub const WILDCARD: &str = "*";

/// An emitted file resolved to its public href and asset type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassifiedAsset {
  /// Asset type tag such as `script`, `style`, `image` or `font`.
  #[serde(rename = "type")]
  pub kind: String,
  /// Public href (`publicPath` followed by the filename).
  pub href: String,
  /// Filename inside the build output; empty for assets read back from JSON.
  #[serde(skip)]
  pub file: String,
}

impl ClassifiedAsset {
  /// Classify `file` as `kind`, served below `public_path`.
  pub fn new(file: &str, kind: impl Into<String>, public_path: &str) -> Self {
    Self {
      kind: kind.into(),
      href: format!("{public_path}{file}"),
      file: file.to_string(),
    }
  }
}

/// One HTTP response header computed for a route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderRecord {
  /// Header name.
  pub key: String,
  /// Header value.
  pub value: String,
}

impl HeaderRecord {
  /// Create a header record.
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }
}

/// Route pattern to classified files, kept in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteFileMap {
  routes: Vec<(String, Vec<ClassifiedAsset>)>,
}

impl RouteFileMap {
  /// Files registered for `pattern`.
  pub fn get(&self, pattern: &str) -> Option<&[ClassifiedAsset]> {
    self
      .routes
      .iter()
      .find(|(candidate, _)| candidate == pattern)
      .map(|(_, files)| files.as_slice())
  }

  /// Mutable file list for `pattern`, appending an empty one when it was not seen yet.
  pub fn files_mut(&mut self, pattern: &str) -> &mut Vec<ClassifiedAsset> {
    let index = match self
      .routes
      .iter()
      .position(|(candidate, _)| candidate == pattern)
    {
      Some(index) => index,
      None => {
        self.routes.push((pattern.to_string(), Vec::new()));
        self.routes.len() - 1
      }
    };
    &mut self.routes[index].1
  }

  /// Route patterns in encounter order.
  pub fn patterns(&self) -> impl Iterator<Item = &str> {
    self.routes.iter().map(|(pattern, _)| pattern.as_str())
  }

  /// Iterate over patterns and their files.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClassifiedAsset])> {
    self
      .routes
      .iter()
      .map(|(pattern, files)| (pattern.as_str(), files.as_slice()))
  }

  /// Number of route patterns.
  pub fn len(&self) -> usize {
    self.routes.len()
  }

  /// Returns `true` when no route was registered.
  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}

/// Manifest value for a single route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ManifestEntry {
  /// Plain file list, used when no headers are computed.
  Files(Vec<ClassifiedAsset>),
  /// File list paired with computed headers.
  WithHeaders {
    /// Classified files for the route.
    files: Vec<ClassifiedAsset>,
    /// Headers computed for the route.
    headers: Vec<HeaderRecord>,
  },
}

impl ManifestEntry {
  /// Files advertised for the route.
  pub fn files(&self) -> &[ClassifiedAsset] {
    match self {
      Self::Files(files) => files,
      Self::WithHeaders { files, .. } => files,
    }
  }

  /// Headers computed for the route, empty when headers are disabled.
  pub fn headers(&self) -> &[HeaderRecord] {
    match self {
      Self::Files(_) => &[],
      Self::WithHeaders { headers, .. } => headers,
    }
  }
}

/// Final route manifest, serialized as a JSON object keyed by route pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
  routes: Vec<(String, ManifestEntry)>,
}

impl Manifest {
  /// Append a route. Later inserts of the same pattern replace the earlier value in place.
  pub fn insert(&mut self, pattern: impl Into<String>, entry: ManifestEntry) {
    let pattern = pattern.into();
    match self
      .routes
      .iter_mut()
      .find(|(candidate, _)| *candidate == pattern)
    {
      Some((_, existing)) => *existing = entry,
      None => self.routes.push((pattern, entry)),
    }
  }

  /// Entry for `pattern`.
  pub fn get(&self, pattern: &str) -> Option<&ManifestEntry> {
    self
      .routes
      .iter()
      .find(|(candidate, _)| candidate == pattern)
      .map(|(_, entry)| entry)
  }

  /// Entry of the shared wildcard bucket.
  pub fn wildcard(&self) -> Option<&ManifestEntry> {
    self.get(WILDCARD)
  }

  /// Route patterns in output order.
  pub fn patterns(&self) -> impl Iterator<Item = &str> {
    self.routes.iter().map(|(pattern, _)| pattern.as_str())
  }

  /// Iterate over routes in output order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
    self
      .routes
      .iter()
      .map(|(pattern, entry)| (pattern.as_str(), entry))
  }

  /// Number of routes.
  pub fn len(&self) -> usize {
    self.routes.len()
  }

  /// Returns `true` when the manifest has no routes.
  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}

impl Serialize for Manifest {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.routes.len()))?;
    for (pattern, entry) in &self.routes {
      map.serialize_entry(pattern, entry)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for Manifest {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(ManifestVisitor)
  }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
  type Value = Manifest;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a map of route patterns to manifest entries")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
    let mut manifest = Manifest::default();
    while let Some((pattern, entry)) = access.next_entry::<String, ManifestEntry>()? {
      manifest.insert(pattern, entry);
    }
    Ok(manifest)
  }
}
