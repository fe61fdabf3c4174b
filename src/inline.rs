//! Embedding the manifest into the shared entry script.

use tracing::debug;

use crate::error::ManifestResult;
use crate::models::{ClassifiedAsset, Manifest};
use crate::output::OutputSink;

/// Global the inlined manifest is assigned to.
pub const INLINE_GLOBAL: &str = "window.__rmanifest";

/// First script asset of the wildcard bucket.
pub fn inline_target(manifest: &Manifest) -> Option<&ClassifiedAsset> {
  manifest
    .wildcard()?
    .files()
    .iter()
    .find(|asset| asset.kind == "script")
}

/// Prepend the compact manifest to the first shared script, if it is part of the output.
///
/// The sink is read right before the rewrite so the current artifact content is used. The
/// filename is left untouched, so any content hash it carries goes stale. Returns the name
/// of the rewritten file.
///
/// Only generated manifests know the output filename of their assets. A manifest read back
/// with [`load_manifest`](crate::manifest::load_manifest) carries hrefs alone, so nothing is
/// inlined for it.
pub fn inline_manifest(
  sink: &mut dyn OutputSink,
  manifest: &Manifest,
) -> ManifestResult<Option<String>> {
  let Some(target) = inline_target(manifest) else {
    debug!("no shared script to inline the manifest into");
    return Ok(None);
  };

  if target.file.is_empty() {
    debug!(href = %target.href, "inline target has no output filename");
    return Ok(None);
  }

  let Some(original) = sink.read(&target.file)? else {
    debug!(file = %target.file, "inline target is not part of the build output");
    return Ok(None);
  };

  let json = serde_json::to_string(manifest)?;
  let mut content = format!("{INLINE_GLOBAL}={json};").into_bytes();
  content.extend_from_slice(&original);
  sink.emit(&target.file, content)?;

  Ok(Some(target.file.clone()))
}
