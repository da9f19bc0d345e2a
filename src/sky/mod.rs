//! Sky viewport simulation module
//!
//! Everything that runs each tick lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - No global state; sessions are plain owned values

pub mod events;
pub mod hex_grid;
pub mod mapper;
pub mod projection;
pub mod rotation;
pub mod segmentation;
pub mod signal;
pub mod state;
pub mod tick;

pub use events::{GeneratorConfig, SeededEventGenerator};
pub use hex_grid::{
    HexLayout, HexagonGrid, SectorGrid, canonical_axial_coords, point_in_hexagon, sector_code,
    sector_from_code,
};
pub use mapper::{SectorMapper, SphereToSector};
pub use projection::{RotationOffsets, SpherePoint, ViewportPoint, ViewportProjection};
pub use rotation::{ListenerId, RotationConfig, RotationController, RotationInput};
pub use segmentation::{SphereSegment, SphereSegmentation};
pub use signal::{
    AggregationStats, EventField, EventSource, SignalAggregator, SignalSnapshot, SpaceEvent,
};
pub use state::ScanState;
pub use tick::{TickInput, tick};
