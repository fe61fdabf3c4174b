//! Destinations for generated artifacts.
//!
//! The transformer never touches the filesystem directly. It hands named artifacts to an
//! [`OutputSink`], which either keeps them in memory (tests, host integrations that own
//! the write step) or writes them below a build output directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{ManifestError, ManifestResult};

/// Accepts named build artifacts and allows reading them back.
pub trait OutputSink {
  /// Register `content` under `name`, replacing any previous artifact with that name.
  fn emit(&mut self, name: &str, content: Vec<u8>) -> ManifestResult<()>;

  /// Current content of the artifact `name`, if it is part of the output.
  fn read(&self, name: &str) -> ManifestResult<Option<Vec<u8>>>;
}

/// Artifact held by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  content: Vec<u8>,
}

impl Artifact {
  /// Create an artifact from raw bytes.
  pub fn new(content: impl Into<Vec<u8>>) -> Self {
    Self {
      content: content.into(),
    }
  }

  /// Raw artifact bytes.
  pub fn content(&self) -> &[u8] {
    &self.content
  }

  /// Byte length of the artifact.
  pub fn size(&self) -> usize {
    self.content.len()
  }

  /// Artifact content as UTF-8 text, when valid.
  pub fn as_str(&self) -> Option<&str> {
    std::str::from_utf8(&self.content).ok()
  }
}

/// In-memory artifact registry.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
  artifacts: BTreeMap<String, Artifact>,
}

impl MemorySink {
  /// Create an empty sink.
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the sink with an artifact produced by the bundler.
  pub fn with_artifact(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    self.artifacts.insert(name.into(), Artifact::new(content));
    self
  }

  /// Artifact registered under `name`.
  pub fn get(&self, name: &str) -> Option<&Artifact> {
    self.artifacts.get(name)
  }

  /// Returns `true` when `name` is registered.
  pub fn contains(&self, name: &str) -> bool {
    self.artifacts.contains_key(name)
  }

  /// Registered artifact names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.artifacts.keys().map(String::as_str)
  }
}

impl OutputSink for MemorySink {
  fn emit(&mut self, name: &str, content: Vec<u8>) -> ManifestResult<()> {
    self.artifacts.insert(name.to_string(), Artifact::new(content));
    Ok(())
  }

  fn read(&self, name: &str) -> ManifestResult<Option<Vec<u8>>> {
    Ok(self.artifacts.get(name).map(|artifact| artifact.content.clone()))
  }
}

/// Sink writing artifacts below a build output directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
  root: PathBuf,
}

impl DirectorySink {
  /// Create a sink rooted at `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Output directory.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Resolve `name` below the root. A leading `/` is ignored; parent components, drive
  /// prefixes and names without a file component are rejected.
  fn artifact_path(&self, name: &str) -> ManifestResult<PathBuf> {
    let mut path = self.root.clone();
    let mut has_file = false;
    for component in Path::new(name).components() {
      match component {
        Component::Normal(part) => {
          path.push(part);
          has_file = true;
        }
        Component::RootDir | Component::CurDir => {}
        Component::ParentDir | Component::Prefix(_) => {
          return Err(ManifestError::InvalidArtifactName(name.to_string()));
        }
      }
    }
    if !has_file {
      return Err(ManifestError::InvalidArtifactName(name.to_string()));
    }
    Ok(path)
  }
}

impl OutputSink for DirectorySink {
  fn emit(&mut self, name: &str, content: Vec<u8>) -> ManifestResult<()> {
    let path = self.artifact_path(name)?;
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|source| ManifestError::Write {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    fs::write(&path, content).map_err(|source| ManifestError::Write { path, source })
  }

  fn read(&self, name: &str) -> ManifestResult<Option<Vec<u8>>> {
    let path = self.artifact_path(name)?;
    match fs::read(&path) {
      Ok(content) => Ok(Some(content)),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(ManifestError::Read { path, source }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn memory_sink_replaces_existing_artifacts() {
    let mut sink = MemorySink::new().with_artifact("main.js", "console.log(1);");
    assert_eq!(sink.get("main.js").unwrap().size(), 15);

    sink.emit("main.js", b"void 0;".to_vec()).unwrap();
    assert_eq!(sink.get("main.js").unwrap().as_str(), Some("void 0;"));
    assert_eq!(sink.read("missing.js").unwrap(), None);
    assert_eq!(sink.names().collect::<Vec<_>>(), vec!["main.js"]);
  }

  #[test]
  fn directory_sink_writes_nested_artifacts() -> ManifestResult<()> {
    let temp = tempdir().expect("failed to create temp dir");
    let mut sink = DirectorySink::new(temp.path());

    sink.emit("meta/manifest.json", b"{}".to_vec())?;
    assert!(temp.path().join("meta/manifest.json").exists());
    assert_eq!(sink.read("meta/manifest.json")?, Some(b"{}".to_vec()));

    Ok(())
  }

  #[test]
  fn directory_sink_reports_missing_files_as_absent() {
    let temp = tempdir().unwrap();
    let sink = DirectorySink::new(temp.path());
    assert_eq!(sink.read("bundle.js").unwrap(), None);
    assert_eq!(sink.root(), temp.path());
  }

  #[test]
  fn directory_sink_stays_inside_its_root() -> ManifestResult<()> {
    let temp = tempdir().expect("failed to create temp dir");
    let root = temp.path().join("dist");
    let mut sink = DirectorySink::new(&root);

    let err = sink.emit("../escaped.js", b"x".to_vec()).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidArtifactName(name) if name == "../escaped.js"));
    assert!(!temp.path().join("escaped.js").exists());

    assert!(matches!(
      sink.read("js/../../escaped.js"),
      Err(ManifestError::InvalidArtifactName(_))
    ));
    assert!(matches!(sink.read(""), Err(ManifestError::InvalidArtifactName(_))));

    sink.emit("/./js/app.js", b"x".to_vec())?;
    assert!(root.join("js/app.js").exists());
    Ok(())
  }
}
