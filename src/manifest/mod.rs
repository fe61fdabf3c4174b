//! Manifest assembly: headers, route ordering, rendering and loading.

mod build;
mod headers;
mod load;
mod render;

pub use build::build_manifest;
pub use headers::{HeaderPolicy, preload_link_header};
pub use load::load_manifest;
pub use render::render_manifest;
