use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::assets::classify::classify_asset;
use crate::models::{ClassifiedAsset, RouteFileMap};
use crate::resolver::Resolver;
use crate::routes::{RouteTarget, resolve_chunk_route};
use crate::stats::{BuildStats, ChunkId};

/// Files collected for one chunk, deduplicated in insertion order.
struct RoutePage {
  target: RouteTarget,
  files: Vec<String>,
  seen: BTreeSet<String>,
}

impl RoutePage {
  fn new(target: RouteTarget) -> Self {
    Self {
      target,
      files: Vec::new(),
      seen: BTreeSet::new(),
    }
  }

  fn add(&mut self, file: &str) {
    if self.seen.insert(file.to_string()) {
      self.files.push(file.to_string());
    }
  }
}

/// Pages in chunk order, addressable by chunk id.
#[derive(Default)]
struct PageArena {
  pages: Vec<RoutePage>,
  by_chunk: BTreeMap<ChunkId, usize>,
}

impl PageArena {
  fn insert(&mut self, id: &ChunkId, page: RoutePage) {
    if self.by_chunk.contains_key(id) {
      debug!(chunk = %id, "duplicate chunk id ignored");
      return;
    }
    self.by_chunk.insert(id.clone(), self.pages.len());
    self.pages.push(page);
  }

  fn get_mut(&mut self, id: &ChunkId) -> Option<&mut RoutePage> {
    let index = *self.by_chunk.get(id)?;
    self.pages.get_mut(index)
  }
}

/// Group the build output into classified per-route file lists.
///
/// Chunks are processed before modules so every module asset can find the page of the chunk
/// it belongs to. Pages sharing a pattern are concatenated in chunk order without further
/// deduplication, and unclassified files are dropped.
pub fn collect_route_files(
  stats: &BuildStats,
  routes: &Resolver,
  assets: Option<&Resolver>,
) -> RouteFileMap {
  let mut arena = PageArena::default();

  for chunk in &stats.chunks {
    let Some(target) = resolve_chunk_route(routes, chunk) else {
      debug!(chunk = %chunk.id, origin = ?chunk.origin, "chunk excluded by route mapping");
      continue;
    };

    let mut page = RoutePage::new(target);
    for file in &chunk.files {
      page.add(file);
    }
    arena.insert(&chunk.id, page);
  }

  for module in &stats.modules {
    for file in &module.assets {
      for chunk_id in &module.chunks {
        match arena.get_mut(chunk_id) {
          Some(page) => page.add(file),
          None => debug!(chunk = %chunk_id, file = %file, "module asset without a route page"),
        }
      }
    }
  }

  let mut route_files = RouteFileMap::default();
  for page in arena.pages {
    let files = route_files.files_mut(page.target.pattern());
    for file in &page.files {
      match classify_asset(assets, file) {
        Some(kind) => files.push(ClassifiedAsset::new(file, kind, &stats.public_path)),
        None => debug!(file = %file, "unclassified file omitted from manifest"),
      }
    }
  }

  route_files
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::stats::{ChunkRecord, ModuleRecord};

  fn routes() -> Resolver {
    Resolver::from_fn(|request| {
      if request.contains("Hidden") {
        None
      } else if request.contains("Home") {
        Some("/".into())
      } else {
        Some("/:slug".into())
      }
    })
  }

  fn hrefs(map: &RouteFileMap, pattern: &str) -> Vec<String> {
    map
      .get(pattern)
      .unwrap_or_default()
      .iter()
      .map(|asset| asset.href.clone())
      .collect()
  }

  #[test]
  fn groups_chunk_files_by_route() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![
        ChunkRecord::new(0u64, None, true, ["a.js", "a.css"]),
        ChunkRecord::new(1u64, Some("Home"), false, ["b.js"]),
      ],
      modules: Vec::new(),
    };

    let map = collect_route_files(&stats, &routes(), None);

    assert_eq!(map.patterns().collect::<Vec<_>>(), vec!["*", "/"]);
    assert_eq!(hrefs(&map, "*"), vec!["/a.js", "/a.css"]);
    assert_eq!(hrefs(&map, "/"), vec!["/b.js"]);
    assert_eq!(map.get("*").unwrap()[1].kind, "style");
  }

  #[test]
  fn merges_module_assets_after_chunk_files() {
    let stats = BuildStats {
      public_path: "/static/".into(),
      chunks: vec![
        ChunkRecord::new(2u64, Some("@pages/Home"), false, ["1.js", "1.css"]),
        ChunkRecord::new(3u64, Some("@pages/Page"), false, ["2.js"]),
      ],
      modules: vec![
        ModuleRecord::new([3u64], ["font.ttf"]),
        ModuleRecord::new([2u64, 3u64], ["shared.svg"]),
      ],
    };

    let map = collect_route_files(&stats, &routes(), None);

    assert_eq!(
      hrefs(&map, "/"),
      vec!["/static/1.js", "/static/1.css", "/static/shared.svg"]
    );
    assert_eq!(
      hrefs(&map, "/:slug"),
      vec!["/static/2.js", "/static/font.ttf", "/static/shared.svg"]
    );
  }

  #[test]
  fn deduplicates_within_a_page() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![ChunkRecord::new(1u64, Some("Home"), false, ["b.js", "b.js", "b.css"])],
      modules: vec![
        ModuleRecord::new([1u64], ["b.css"]),
        ModuleRecord::new([1u64], ["logo.svg", "logo.svg"]),
      ],
    };

    let map = collect_route_files(&stats, &routes(), None);
    assert_eq!(hrefs(&map, "/"), vec!["/b.js", "/b.css", "/logo.svg"]);
  }

  #[test]
  fn pages_sharing_a_pattern_are_concatenated_without_dedup() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![
        ChunkRecord::new(0u64, None, true, ["runtime.js", "vendor.js"]),
        ChunkRecord::new(1u64, Some("main.js"), true, ["vendor.js", "main.js"]),
      ],
      modules: Vec::new(),
    };

    let map = collect_route_files(&stats, &routes(), None);
    assert_eq!(
      hrefs(&map, "*"),
      vec!["/runtime.js", "/vendor.js", "/vendor.js", "/main.js"]
    );
  }

  #[test]
  fn excluded_chunks_drop_their_module_assets() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![
        ChunkRecord::new(0u64, None, true, ["main.js"]),
        ChunkRecord::new(4u64, Some("@pages/Hidden"), false, ["hidden.js"]),
      ],
      modules: vec![
        ModuleRecord::new([4u64], ["hidden.png"]),
        ModuleRecord::new([99u64], ["orphan.png"]),
      ],
    };

    let map = collect_route_files(&stats, &routes(), None);

    assert_eq!(map.patterns().collect::<Vec<_>>(), vec!["*"]);
    assert_eq!(hrefs(&map, "*"), vec!["/main.js"]);
  }

  #[test]
  fn unclassified_files_are_omitted() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![ChunkRecord::new(
        0u64,
        None,
        true,
        ["main.js", "main.js.map", "LICENSE.txt", "logo.svg"],
      )],
      modules: Vec::new(),
    };

    let defaults = collect_route_files(&stats, &routes(), None);
    assert_eq!(hrefs(&defaults, "*"), vec!["/main.js", "/logo.svg"]);

    let scripts_only = Resolver::table([("main.js", "script")]);
    let custom = collect_route_files(&stats, &routes(), Some(&scripts_only));
    assert_eq!(hrefs(&custom, "*"), vec!["/main.js"]);
  }

  #[test]
  fn routes_without_classified_files_keep_their_key() {
    let stats = BuildStats {
      public_path: "/".into(),
      chunks: vec![ChunkRecord::new(1u64, Some("Home"), false, ["readme.md"])],
      modules: Vec::new(),
    };

    let map = collect_route_files(&stats, &routes(), None);
    assert_eq!(map.get("/"), Some(&[][..]));
  }

  #[test]
  fn string_chunk_ids_link_modules_to_pages() {
    let stats = BuildStats {
      public_path: String::new(),
      chunks: vec![ChunkRecord::new("home", Some("Home"), false, ["home.js"])],
      modules: vec![ModuleRecord::new(["home"], ["home.css"])],
    };

    let map = collect_route_files(&stats, &routes(), None);
    assert_eq!(hrefs(&map, "/"), vec!["home.js", "home.css"]);
  }
}
