//! Classify every IPv4 /24 block by routing properties observed from an
//! exchange route server listing and local route table dumps, then render the
//! classification as a 4096x4096 Hilbert curve map.

mod hilbert;
pub mod ingest;
mod map;
mod render;
mod route;

pub use hilbert::{SLASH24_ORDER, hilbert_d2xy, slash24_xy};
pub use map::{BLOCK_COUNT, RouteMap, Stats, block_index};
pub use render::{IMAGE_SIZE, render};
pub use route::RouteFlags;
