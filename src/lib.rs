#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod assets;
pub mod builder;
pub mod config;
pub mod error;
pub mod inline;
pub mod manifest;
pub mod models;
pub mod output;
pub mod resolver;
pub mod routes;
pub mod stats;

pub use builder::{ManifestReport, RouteManifest};
pub use config::{ManifestConfig, RouteManifestOptions};
pub use error::{ManifestError, ManifestResult};
pub use manifest::HeaderPolicy;
pub use models::{ClassifiedAsset, HeaderRecord, Manifest, ManifestEntry, RouteFileMap};
pub use output::{DirectorySink, MemorySink, OutputSink};
pub use resolver::Resolver;
pub use stats::{BuildStats, ChunkId, ChunkRecord, ModuleRecord};
