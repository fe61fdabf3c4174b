//! Grouping emitted files into per-route asset lists.
//!
//! Classification (`classify`) decides which emitted files are advertised at all, while
//! aggregation (`aggregate`) maps chunks and modules onto route buckets.

mod aggregate;
mod classify;

pub use aggregate::collect_route_files;
pub use classify::{classify_asset, default_asset_type};
