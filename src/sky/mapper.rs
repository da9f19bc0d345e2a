//! Sphere point → sector mapping
//!
//! `SphereToSector` is the production mapping: project into the current
//! viewport, then look up the hexagon. It owns no state, so what is drawn and
//! what is scored go through the same two calls.

use super::hex_grid::SectorGrid;
use super::projection::{ViewportPoint, ViewportProjection};

/// Strategy for assigning sphere points to sectors
pub trait SectorMapper {
    /// Sector index for (θ, φ), or `None` when no sector contains it
    fn sector(&self, theta: f32, phi: f32) -> Option<usize>;

    /// Whether (θ, φ) is currently observable at all
    fn is_visible(&self, theta: f32, phi: f32) -> bool;
}

/// Viewport-based mapping: sphere → viewport → hexagon
#[derive(Debug, Clone, Copy)]
pub struct SphereToSector<'a> {
    projection: &'a ViewportProjection,
    grid: &'a SectorGrid,
}

impl<'a> SphereToSector<'a> {
    pub fn new(projection: &'a ViewportProjection, grid: &'a SectorGrid) -> Self {
        Self { projection, grid }
    }

    /// Viewport position of a sphere point (for renderers that place markers)
    #[inline]
    pub fn viewport_point(&self, theta: f32, phi: f32) -> ViewportPoint {
        self.projection.project(theta, phi)
    }
}

impl SectorMapper for SphereToSector<'_> {
    #[inline]
    fn sector(&self, theta: f32, phi: f32) -> Option<usize> {
        self.grid.query(self.projection.project(theta, phi))
    }

    #[inline]
    fn is_visible(&self, theta: f32, phi: f32) -> bool {
        self.projection.is_visible(theta, phi)
    }
}
