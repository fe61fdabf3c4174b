//! Route resolution and ordering for manifest keys.

mod order;
mod resolve;

pub use order::{RouteOrder, SegmentKind, SpecificityOrder, segment_kinds};
pub use resolve::{RouteTarget, resolve_chunk_route};
