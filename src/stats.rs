//! Bundler stats snapshot consumed by the manifest transformer.
//!
//! The records mirror the subset of a webpack-style `stats.json` that matters for route
//! grouping: chunk files, entry flags, chunk origins and the extra files emitted by
//! individual modules.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, ManifestResult};

/// Identifier of a chunk, unique within one build.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ChunkId {
  /// Numeric chunk id (the bundler default).
  Index(u64),
  /// Named chunk id.
  Name(String),
}

impl From<u64> for ChunkId {
  fn from(value: u64) -> Self {
    Self::Index(value)
  }
}

impl From<&str> for ChunkId {
  fn from(value: &str) -> Self {
    Self::Name(value.to_string())
  }
}

impl fmt::Display for ChunkId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Index(index) => write!(f, "{index}"),
      Self::Name(name) => f.write_str(name),
    }
  }
}

/// One chunk produced by the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawChunk")]
pub struct ChunkRecord {
  /// Chunk identifier.
  pub id: ChunkId,
  /// Files emitted for the chunk, in bundler order.
  pub files: Vec<String>,
  /// Whether the chunk is an entry (or runtime) chunk.
  pub entry: bool,
  /// Request string of the module that caused the chunk to be created.
  pub origin: Option<String>,
}

impl ChunkRecord {
  /// Create a chunk record.
  pub fn new(
    id: impl Into<ChunkId>,
    origin: Option<&str>,
    entry: bool,
    files: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      id: id.into(),
      files: files.into_iter().map(Into::into).collect(),
      entry,
      origin: origin.map(str::to_string),
    }
  }
}

#[derive(Deserialize)]
struct RawChunk {
  id: ChunkId,
  #[serde(default)]
  files: Vec<String>,
  #[serde(default)]
  entry: bool,
  #[serde(default)]
  origins: Vec<RawOrigin>,
}

#[derive(Deserialize)]
struct RawOrigin {
  #[serde(default)]
  request: Option<String>,
}

impl From<RawChunk> for ChunkRecord {
  fn from(raw: RawChunk) -> Self {
    let origin = raw
      .origins
      .into_iter()
      .next()
      .and_then(|origin| origin.request)
      .filter(|request| !request.is_empty());

    Self {
      id: raw.id,
      files: raw.files,
      entry: raw.entry,
      origin,
    }
  }
}

/// One input module and the extra files it emitted outside its chunk's own list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModuleRecord {
  /// Chunks the module contributes to.
  #[serde(default)]
  pub chunks: Vec<ChunkId>,
  /// Extra filenames produced by the module.
  #[serde(default)]
  pub assets: Vec<String>,
}

impl ModuleRecord {
  /// Create a module record.
  pub fn new(
    chunks: impl IntoIterator<Item = impl Into<ChunkId>>,
    assets: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      chunks: chunks.into_iter().map(Into::into).collect(),
      assets: assets.into_iter().map(Into::into).collect(),
    }
  }
}

/// Immutable snapshot of a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
  /// Public base path prefixed to every emitted filename.
  #[serde(default)]
  pub public_path: String,
  /// Chunks in bundler order.
  #[serde(default)]
  pub chunks: Vec<ChunkRecord>,
  /// Modules in bundler order.
  #[serde(default)]
  pub modules: Vec<ModuleRecord>,
}

impl BuildStats {
  /// Parse a stats document.
  pub fn from_json_str(content: &str) -> ManifestResult<Self> {
    Ok(serde_json::from_str(content)?)
  }
}

/// Load a stats document from disk.
pub fn load_stats(path: &Path) -> ManifestResult<BuildStats> {
  let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
