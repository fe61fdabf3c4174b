//! Reading a previously emitted manifest back from disk.

use std::fs;
use std::path::Path;

use crate::error::{ManifestError, ManifestResult};
use crate::models::Manifest;

/// Load a route manifest, preserving its route order.
pub fn load_manifest(path: &Path) -> ManifestResult<Manifest> {
  let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
