use std::fmt;

use crate::models::{ClassifiedAsset, HeaderRecord, RouteFileMap};

type HeaderFn = dyn Fn(&[ClassifiedAsset], &str, &RouteFileMap) -> Option<Vec<HeaderRecord>>;

/// How response headers are computed for each route.
pub enum HeaderPolicy {
  /// A single `Link` header preloading every file of the route.
  Preload,
  /// Caller-supplied computation receiving the route files, the pattern and every route's
  /// files. `None` is treated as an empty header list.
  Custom(Box<HeaderFn>),
}

impl HeaderPolicy {
  /// Wrap a closure as a custom header policy.
  pub fn custom<F>(compute: F) -> Self
  where
    F: Fn(&[ClassifiedAsset], &str, &RouteFileMap) -> Option<Vec<HeaderRecord>> + 'static,
  {
    Self::Custom(Box::new(compute))
  }

  /// Compute the headers for one route.
  pub fn headers_for(
    &self,
    files: &[ClassifiedAsset],
    pattern: &str,
    route_files: &RouteFileMap,
  ) -> Vec<HeaderRecord> {
    match self {
      Self::Preload => vec![preload_link_header(files)],
      Self::Custom(compute) => compute(files, pattern, route_files).unwrap_or_else(|| {
        tracing::debug!(pattern, "custom headers returned nothing");
        Vec::new()
      }),
    }
  }
}

impl fmt::Debug for HeaderPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Preload => f.write_str("Preload"),
      Self::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

/// Build the `Link` header advising the client to preload `files` in order.
///
/// Scripts and fonts are requested with `crossorigin=anonymous`. An empty file list still
/// produces the header, with an empty value.
pub fn preload_link_header(files: &[ClassifiedAsset]) -> HeaderRecord {
  let value = files
    .iter()
    .map(preload_fragment)
    .collect::<Vec<_>>()
    .join(", ");
  HeaderRecord::new("Link", value)
}

fn preload_fragment(asset: &ClassifiedAsset) -> String {
  let mut fragment = format!("<{}>; rel=preload; as={}", asset.href, asset.kind);
  if matches!(asset.kind.as_str(), "font" | "script") {
    fragment.push_str("; crossorigin=anonymous");
  }
  fragment
}
