//! Error types surfaced by manifest generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or running the manifest transformer.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The transformer was constructed without a route resolver.
  #[error("A \"routes\" mapping is required")]
  MissingRoutes,

  /// Failed to read a file from disk.
  #[error("failed to read {}", .path.display())]
  Read {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },

  /// Failed to write an artifact to disk.
  #[error("failed to write {}", .path.display())]
  Write {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },

  /// Failed to parse a JSON document read from disk.
  #[error("failed to parse {}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },

  /// An artifact name does not stay inside the output directory.
  #[error("artifact name {0:?} is not a relative path inside the output directory")]
  InvalidArtifactName(String),

  /// Failed to encode or decode manifest JSON.
  #[error("manifest JSON error")]
  Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type ManifestResult<T> = Result<T, ManifestError>;
