use crate::error::ManifestResult;
use crate::models::Manifest;

/// Serialize the manifest, compact when `minify` is set and 2-space indented otherwise.
pub fn render_manifest(manifest: &Manifest, minify: bool) -> ManifestResult<String> {
  let rendered = if minify {
    serde_json::to_string(manifest)?
  } else {
    serde_json::to_string_pretty(manifest)?
  };
  Ok(rendered)
}
