//! Options controlling manifest generation, and the JSON file they can be loaded from.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ManifestError, ManifestResult};
use crate::manifest::HeaderPolicy;
use crate::resolver::Resolver;
use crate::routes::RouteOrder;

/// Configuration file searched for by [`ManifestConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "route-manifest.json";

/// Artifact name used when no filename is configured.
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Options accepted by [`crate::RouteManifest::new`].
pub struct RouteManifestOptions {
  pub(crate) routes: Option<Resolver>,
  pub(crate) assets: Option<Resolver>,
  pub(crate) headers: Option<HeaderPolicy>,
  pub(crate) order: Option<Box<dyn RouteOrder>>,
  pub(crate) filename: String,
  pub(crate) minify: bool,
  pub(crate) sort: bool,
  pub(crate) inline: bool,
}

impl Default for RouteManifestOptions {
  fn default() -> Self {
    Self {
      routes: None,
      assets: None,
      headers: None,
      order: None,
      filename: DEFAULT_MANIFEST_FILE.into(),
      minify: false,
      sort: true,
      inline: true,
    }
  }
}

impl RouteManifestOptions {
  /// Start from the defaults.
  pub fn new() -> Self {
    Self::default()
  }

  /// Resolver mapping chunk origin requests to route patterns. Required.
  pub fn routes(mut self, routes: impl Into<Resolver>) -> Self {
    self.routes = Some(routes.into());
    self
  }

  /// Resolver mapping filenames to asset types, replacing the extension defaults.
  pub fn assets(mut self, assets: impl Into<Resolver>) -> Self {
    self.assets = Some(assets.into());
    self
  }

  /// Compute headers for every route.
  pub fn headers(mut self, headers: HeaderPolicy) -> Self {
    self.headers = Some(headers);
    self
  }

  /// Name of the manifest artifact.
  pub fn filename(mut self, filename: impl Into<String>) -> Self {
    self.filename = filename.into();
    self
  }

  /// Emit compact JSON instead of 2-space indented output.
  pub fn minify(mut self, minify: bool) -> Self {
    self.minify = minify;
    self
  }

  /// Order routes by specificity instead of encounter order.
  pub fn sort(mut self, sort: bool) -> Self {
    self.sort = sort;
    self
  }

  /// Prepend the manifest to the first shared script.
  pub fn inline(mut self, inline: bool) -> Self {
    self.inline = inline;
    self
  }

  /// Replace the built-in specificity sort used when sorting is enabled.
  pub fn order_with(mut self, order: impl RouteOrder + 'static) -> Self {
    self.order = Some(Box::new(order));
    self
  }
}

/// Value of a lookup table entry; `false` and `null` disable the key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TableValue {
  /// Resolved value.
  Value(String),
  /// Boolean placeholder, only meaningful as `false`.
  Flag(bool),
}

/// Manifest options as stored in a JSON configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
  /// Origin request to route pattern table.
  pub routes: Option<BTreeMap<String, Option<TableValue>>>,
  /// Filename to asset type table.
  pub assets: Option<BTreeMap<String, Option<TableValue>>>,
  /// Emit the built-in `Link` preload header for every route.
  pub headers: bool,
  /// Name of the manifest artifact.
  pub filename: String,
  /// Emit compact JSON.
  pub minify: bool,
  /// Sort routes by specificity.
  pub sort: bool,
  /// Inline the manifest into the first shared script.
  pub inline: bool,
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      routes: None,
      assets: None,
      headers: false,
      filename: DEFAULT_MANIFEST_FILE.into(),
      minify: false,
      sort: true,
      inline: true,
    }
  }
}

impl ManifestConfig {
  /// Load [`DEFAULT_CONFIG_FILE`] from `dir`, falling back to defaults when it is missing.
  pub fn discover(dir: &Path) -> ManifestResult<Self> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Err(ManifestError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
        Ok(Self::default())
      }
      result => result,
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> ManifestResult<Self> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Convert the configuration into transformer options.
  pub fn into_options(self) -> RouteManifestOptions {
    let mut options = RouteManifestOptions::new()
      .filename(self.filename)
      .minify(self.minify)
      .sort(self.sort)
      .inline(self.inline);

    if let Some(routes) = self.routes {
      options = options.routes(table_resolver(routes));
    }
    if let Some(assets) = self.assets {
      options = options.assets(table_resolver(assets));
    }
    if self.headers {
      options = options.headers(HeaderPolicy::Preload);
    }
    options
  }
}

fn table_resolver(table: BTreeMap<String, Option<TableValue>>) -> Resolver {
  Resolver::table(table.into_iter().filter_map(|(key, value)| match value {
    Some(TableValue::Value(value)) => Some((key, value)),
    Some(TableValue::Flag(_)) | None => None,
  }))
}
