//! Scan session state
//!
//! Owns everything the per-tick pipeline mutates. There is no global state:
//! tests and tools can run any number of independent sessions.

use glam::Vec2;

use super::hex_grid::{HexLayout, SectorGrid};
use super::mapper::{SectorMapper, SphereToSector};
use super::projection::ViewportProjection;
use super::rotation::RotationController;
use super::signal::{SignalAggregator, SignalSnapshot};
use crate::error::SkyResult;
use crate::settings::Settings;

/// Complete session state for one viewport
#[derive(Debug)]
pub struct ScanState {
    /// Current viewport rotation
    pub projection: ViewportProjection,
    /// Input → rotation control loop
    pub rotation: RotationController,
    /// Sector layout (may be uninitialized)
    pub grid: SectorGrid,
    /// Per-tick signal accumulator
    pub aggregator: SignalAggregator,
    /// Session clock (seconds)
    pub time: f32,
    /// Ticks run so far
    pub ticks: u64,
}

impl ScanState {
    /// Session with the standard layout built from settings
    pub fn new(settings: &Settings) -> SkyResult<Self> {
        let layout = HexLayout::canonical(
            settings.grid.hex_radius,
            Vec2::new(settings.grid.viewport_width, settings.grid.viewport_height),
        );
        let mut state = Self::without_layout(settings);
        state.grid.initialize(&layout)?;
        Ok(state)
    }

    /// Session with an explicit layout
    pub fn with_layout(settings: &Settings, layout: &HexLayout) -> SkyResult<Self> {
        let mut state = Self::without_layout(settings);
        state.grid.initialize(layout)?;
        Ok(state)
    }

    /// Session whose grid has not been given a layout yet
    pub fn without_layout(settings: &Settings) -> Self {
        Self {
            projection: ViewportProjection::new(),
            rotation: RotationController::new(settings.rotation.clone()),
            grid: SectorGrid::new(),
            aggregator: SignalAggregator::new(settings.aggregation.summary_interval),
            time: 0.0,
            ticks: 0,
        }
    }

    /// Production mapper over the current rotation
    pub fn mapper(&self) -> SphereToSector<'_> {
        SphereToSector::new(&self.projection, &self.grid)
    }

    /// Sector under (θ, φ) with the current rotation
    pub fn sector_for(&self, theta: f32, phi: f32) -> Option<usize> {
        self.mapper().sector(theta, phi)
    }

    pub fn is_visible(&self, theta: f32, phi: f32) -> bool {
        self.projection.is_visible(theta, phi)
    }

    /// Signal snapshot from the latest tick
    pub fn signals(&self) -> &SignalSnapshot {
        self.aggregator.snapshot()
    }
}
