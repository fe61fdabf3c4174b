//! Route manifest orchestrator tying resolution, aggregation and output together.

use tracing::info;

use crate::assets::collect_route_files;
use crate::config::RouteManifestOptions;
use crate::error::{ManifestError, ManifestResult};
use crate::inline::inline_manifest;
use crate::manifest::{HeaderPolicy, build_manifest, render_manifest};
use crate::models::Manifest;
use crate::output::OutputSink;
use crate::resolver::Resolver;
use crate::routes::{RouteOrder, SpecificityOrder};
use crate::stats::BuildStats;

/// Outcome of a single [`RouteManifest::run`].
#[derive(Debug, Clone)]
pub struct ManifestReport {
  /// Manifest that was written.
  pub manifest: Manifest,
  /// Name of the manifest artifact.
  pub filename: String,
  /// Serialized manifest as written to the sink.
  pub json: String,
  /// Script the manifest was inlined into, if any.
  pub inlined: Option<String>,
}

/// Derives a route manifest from a finished build.
pub struct RouteManifest {
  routes: Resolver,
  assets: Option<Resolver>,
  headers: Option<HeaderPolicy>,
  order: Option<Box<dyn RouteOrder>>,
  filename: String,
  minify: bool,
  inline: bool,
}

impl RouteManifest {
  /// Validate `options` and create the transformer.
  ///
  /// Fails with [`ManifestError::MissingRoutes`] when no route resolver was configured.
  pub fn new(options: RouteManifestOptions) -> ManifestResult<Self> {
    let RouteManifestOptions {
      routes,
      assets,
      headers,
      order,
      filename,
      minify,
      sort,
      inline,
    } = options;

    let routes = routes.ok_or(ManifestError::MissingRoutes)?;
    let order = match (sort, order) {
      (false, _) => None,
      (true, Some(order)) => Some(order),
      (true, None) => Some(Box::new(SpecificityOrder) as Box<dyn RouteOrder>),
    };

    Ok(Self {
      routes,
      assets,
      headers,
      order,
      filename,
      minify,
      inline,
    })
  }

  /// Name of the manifest artifact.
  pub fn filename(&self) -> &str {
    &self.filename
  }

  /// Build the manifest for `stats` without writing anything.
  pub fn generate(&self, stats: &BuildStats) -> Manifest {
    let route_files = collect_route_files(stats, &self.routes, self.assets.as_ref());
    build_manifest(&route_files, self.headers.as_ref(), self.order.as_deref())
  }

  /// Build the manifest, emit it into `sink` and optionally inline it into the shared script.
  pub fn run(&self, stats: &BuildStats, sink: &mut dyn OutputSink) -> ManifestResult<ManifestReport> {
    let manifest = self.generate(stats);
    let json = render_manifest(&manifest, self.minify)?;
    sink.emit(&self.filename, json.clone().into_bytes())?;
    info!(
      filename = %self.filename,
      routes = manifest.len(),
      bytes = json.len(),
      "route manifest emitted"
    );

    let inlined = if self.inline {
      inline_manifest(sink, &manifest)?
    } else {
      None
    };
    if let Some(file) = &inlined {
      info!(file = %file, "route manifest inlined");
    }

    Ok(ManifestReport {
      manifest,
      filename: self.filename.clone(),
      json,
      inlined,
    })
  }
}
