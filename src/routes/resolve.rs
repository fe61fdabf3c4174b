use crate::models::WILDCARD;
use crate::resolver::Resolver;
use crate::stats::ChunkRecord;

/// Route bucket a chunk's files are grouped under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
  /// Shared bucket for entry chunks and chunks without an origin request.
  Wildcard,
  /// Caller-defined route pattern.
  Pattern(String),
}

impl RouteTarget {
  /// Manifest key for the target.
  pub fn pattern(&self) -> &str {
    match self {
      Self::Wildcard => WILDCARD,
      Self::Pattern(pattern) => pattern,
    }
  }
}

/// Resolve the route bucket for `chunk`.
///
/// Entry chunks and chunks without an origin request (absent or empty) always land in the
/// wildcard bucket and never consult `routes`. Returns `None` when `routes` yields nothing for the request, which
/// removes the chunk from the manifest entirely.
pub fn resolve_chunk_route(routes: &Resolver, chunk: &ChunkRecord) -> Option<RouteTarget> {
  match chunk.origin.as_deref().filter(|request| !request.is_empty()) {
    _ if chunk.entry => Some(RouteTarget::Wildcard),
    None => Some(RouteTarget::Wildcard),
    Some(request) => routes.resolve(request).map(RouteTarget::Pattern),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;
  use std::rc::Rc;

  fn routes() -> Resolver {
    Resolver::from_fn(|request| match request {
      "@pages/Home" => Some("/".into()),
      "@pages/Hidden" => None,
      _ => Some("/:slug".into()),
    })
  }

  #[test]
  fn entry_chunks_use_the_wildcard_bucket() {
    let chunk = ChunkRecord::new(1u64, Some("@pages/Home"), true, ["main.js"]);
    assert_eq!(resolve_chunk_route(&routes(), &chunk), Some(RouteTarget::Wildcard));
  }

  #[test]
  fn chunks_without_requests_use_the_wildcard_bucket() {
    let chunk = ChunkRecord::new(0u64, None, false, ["runtime.js"]);
    let target = resolve_chunk_route(&routes(), &chunk).unwrap();
    assert_eq!(target.pattern(), "*");
  }

  #[test]
  fn empty_requests_use_the_wildcard_bucket() {
    let table = Resolver::table([("Home", "/")]);
    let chunk = ChunkRecord::new(0u64, Some(""), false, ["runtime.js"]);
    assert_eq!(resolve_chunk_route(&table, &chunk), Some(RouteTarget::Wildcard));
  }

  #[test]
  fn wildcard_chunks_never_consult_the_resolver() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let routes = Resolver::from_fn(move |_| {
      counter.set(counter.get() + 1);
      None
    });

    resolve_chunk_route(&routes, &ChunkRecord::new(0u64, None, false, ["a.js"]));
    resolve_chunk_route(&routes, &ChunkRecord::new(1u64, Some("main.js"), true, ["b.js"]));
    resolve_chunk_route(&routes, &ChunkRecord::new(2u64, Some(""), false, ["c.js"]));
    assert_eq!(calls.get(), 0);
  }

  #[test]
  fn requests_resolve_through_the_mapping() {
    let home = ChunkRecord::new(2u64, Some("@pages/Home"), false, ["1.js"]);
    let page = ChunkRecord::new(3u64, Some("@pages/Page"), false, ["2.js"]);

    assert_eq!(
      resolve_chunk_route(&routes(), &home),
      Some(RouteTarget::Pattern("/".into()))
    );
    assert_eq!(
      resolve_chunk_route(&routes(), &page).unwrap().pattern(),
      "/:slug"
    );
  }

  #[test]
  fn unresolved_requests_exclude_the_chunk() {
    let hidden = ChunkRecord::new(4u64, Some("@pages/Hidden"), false, ["3.js"]);
    assert_eq!(resolve_chunk_route(&routes(), &hidden), None);

    let table = Resolver::table([("@pages/Home", "/")]);
    let unknown = ChunkRecord::new(5u64, Some("@pages/Other"), false, ["4.js"]);
    assert_eq!(resolve_chunk_route(&table, &unknown), None);
  }
}
