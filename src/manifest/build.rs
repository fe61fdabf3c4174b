use tracing::debug;

use super::headers::HeaderPolicy;
use crate::models::{Manifest, ManifestEntry, RouteFileMap};
use crate::routes::RouteOrder;

/// Turn classified route files into the final manifest.
///
/// Without a header policy every entry is the bare file list. Routes are emitted in
/// encounter order unless `order` is provided.
pub fn build_manifest(
  route_files: &RouteFileMap,
  headers: Option<&HeaderPolicy>,
  order: Option<&dyn RouteOrder>,
) -> Manifest {
  let patterns: Vec<String> = route_files.patterns().map(str::to_string).collect();
  let patterns = match order {
    Some(order) => order.order(patterns),
    None => patterns,
  };

  let mut manifest = Manifest::default();
  for pattern in patterns {
    let Some(files) = route_files.get(&pattern) else {
      debug!(pattern = %pattern, "route order produced an unknown pattern");
      continue;
    };

    let entry = match headers {
      Some(policy) => ManifestEntry::WithHeaders {
        files: files.to_vec(),
        headers: policy.headers_for(files, &pattern, route_files),
      },
      None => ManifestEntry::Files(files.to_vec()),
    };
    manifest.insert(pattern, entry);
  }

  manifest
}
