//! Renderer hand-off data
//!
//! Plain `Pod` vertex and instance data for a GPU sector map. No GPU code
//! lives here; a renderer uploads these buffers as-is.

pub mod shapes;
pub mod vertex;

pub use shapes::{sector_fill, sector_instances};
pub use vertex::{SectorInstance, Vertex, signal_color};
