//! Hexagonal sector grid in normalized viewport space
//!
//! 19 hexagons (1 center, 6 in ring 1, 12 in ring 2) share one radius. Each
//! hexagon has a vertex pointing straight up; vertices are listed clockwise
//! starting from that top vertex.
//!
//! Membership is an exact convex half-plane test: a point is inside when it
//! lies on or to the right of all six clockwise edges.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::projection::{ViewportPoint, in_unit_square};
use crate::consts::*;
use crate::error::{SkyError, SkyResult};

/// √3 / 2
const HALF_SQRT_3: f32 = 0.866_025_4;

/// Layout input: world-space centers relative to the container center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexLayout {
    /// Hexagon centers, origin at the container center, +y up
    pub centers: Vec<Vec2>,
    /// Center-to-vertex radius, same units as `viewport`
    pub hex_radius: f32,
    /// Viewport width and height
    pub viewport: Vec2,
}

impl HexLayout {
    /// The standard 19-hexagon layout for the given radius and viewport
    pub fn canonical(hex_radius: f32, viewport: Vec2) -> Self {
        let centers = canonical_axial_coords()
            .into_iter()
            .map(|a| axial_to_world(a.x, a.y, hex_radius))
            .collect();
        Self {
            centers,
            hex_radius,
            viewport,
        }
    }
}

/// Axial coordinates of the standard layout, in sector order
///
/// Center, then ring 1 counter-clockwise from +q, then ring 2 sorted by
/// axial angle descending.
pub fn canonical_axial_coords() -> Vec<IVec2> {
    let mut coords = vec![
        IVec2::new(0, 0),
        IVec2::new(1, 0),
        IVec2::new(0, 1),
        IVec2::new(-1, 1),
        IVec2::new(-1, 0),
        IVec2::new(0, -1),
        IVec2::new(1, -1),
    ];

    let mut ring2: Vec<IVec2> = (-3..=3)
        .flat_map(|q| (-3..=3).map(move |r| IVec2::new(q, r)))
        .filter(|a| hex_distance(*a) == 2)
        .collect();
    ring2.sort_by(|a, b| {
        let angle_a = (a.y as f32).atan2(a.x as f32);
        let angle_b = (b.y as f32).atan2(b.x as f32);
        angle_b
            .partial_cmp(&angle_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    coords.extend(ring2);
    coords
}

/// Hex distance of an axial coordinate from the origin
#[inline]
pub fn hex_distance(a: IVec2) -> i32 {
    (a.x.abs() + a.y.abs() + (a.x + a.y).abs()) / 2
}

/// Axial (q, r) to world position for vertex-up hexagons
#[inline]
pub fn axial_to_world(q: i32, r: i32, size: f32) -> Vec2 {
    let sqrt3 = 3.0_f32.sqrt();
    Vec2::new(
        size * sqrt3 * (q as f32 + r as f32 * 0.5),
        size * 1.5 * r as f32,
    )
}

/// The six vertices of a hexagon, clockwise from the top vertex
pub fn hexagon_vertices(center: Vec2, radius: f32) -> [Vec2; 6] {
    let w = radius * HALF_SQRT_3;
    let h = radius * 0.5;
    [
        center + Vec2::new(0.0, radius),
        center + Vec2::new(w, h),
        center + Vec2::new(w, -h),
        center + Vec2::new(0.0, -radius),
        center + Vec2::new(-w, -h),
        center + Vec2::new(-w, h),
    ]
}

/// Exact point-in-hexagon test (boundary counts as inside)
pub fn point_in_hexagon(point: Vec2, center: Vec2, radius: f32) -> bool {
    // Work relative to the center so vertices stay exact
    let delta = point - center;
    let vertices = hexagon_vertices(Vec2::ZERO, radius);

    for i in 0..6 {
        let v1 = vertices[i];
        let v2 = vertices[(i + 1) % 6];
        let edge = v2 - v1;
        let to_point = delta - v1;
        // Clockwise winding: inside is cross <= 0
        if edge.perp_dot(to_point) > 0.0 {
            return false;
        }
    }
    true
}

/// Initialized sector grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexagonGrid {
    centers: Vec<Vec2>,
    radius: f32,
}

impl HexagonGrid {
    /// Build from a layout. Rejects the layout outright if it is invalid.
    pub fn new(layout: &HexLayout) -> SkyResult<Self> {
        if layout.centers.len() != SECTOR_COUNT {
            return Err(SkyError::InvalidLayout {
                expected: SECTOR_COUNT,
                got: layout.centers.len(),
            });
        }
        let viewport = layout.viewport;
        if !(viewport.x.is_finite() && viewport.y.is_finite() && viewport.x > 0.0 && viewport.y > 0.0)
        {
            return Err(SkyError::InvalidViewport(format!(
                "extents must be positive, got {}x{}",
                viewport.x, viewport.y
            )));
        }
        if !(layout.hex_radius.is_finite() && layout.hex_radius > 0.0) {
            return Err(SkyError::InvalidViewport(format!(
                "hex radius must be positive, got {}",
                layout.hex_radius
            )));
        }

        let centers = layout
            .centers
            .iter()
            .map(|world| Vec2::splat(0.5) + *world / viewport)
            .collect();

        // Averaged extent: exact only for square viewports
        let radius = layout.hex_radius / ((viewport.x + viewport.y) * 0.5);

        log::info!(
            "Hexagon grid: {} sectors, radius {}, viewport {:.0}x{:.0}, normalized radius {:.4}",
            SECTOR_COUNT,
            layout.hex_radius,
            viewport.x,
            viewport.y,
            radius
        );

        Ok(Self { centers, radius })
    }

    /// Sector containing a viewport point, first match in stored order
    pub fn query(&self, point: ViewportPoint) -> Option<usize> {
        if !in_unit_square(point) {
            return None;
        }
        self.centers
            .iter()
            .position(|center| point_in_hexagon(point, *center, self.radius))
    }

    /// Normalized center of a sector
    pub fn center(&self, index: usize) -> Option<Vec2> {
        self.centers.get(index).copied()
    }

    pub fn centers(&self) -> &[Vec2] {
        &self.centers
    }

    /// Normalized center-to-vertex radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Normalized vertices of a sector, clockwise from the top
    pub fn vertices(&self, index: usize) -> Option<[Vec2; 6]> {
        self.center(index).map(|c| hexagon_vertices(c, self.radius))
    }
}

/// A grid that may not have received its layout yet
///
/// Queries before initialization return `None` instead of failing, so
/// callers can probe before the layout is ready.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorGrid {
    grid: Option<HexagonGrid>,
}

impl SectorGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(layout: &HexLayout) -> SkyResult<Self> {
        Ok(Self {
            grid: Some(HexagonGrid::new(layout)?),
        })
    }

    /// Install a layout. On error the previous state is left untouched.
    pub fn initialize(&mut self, layout: &HexLayout) -> SkyResult<()> {
        let grid = HexagonGrid::new(layout)?;
        self.grid = Some(grid);
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    pub fn grid(&self) -> Option<&HexagonGrid> {
        self.grid.as_ref()
    }

    pub fn query(&self, point: ViewportPoint) -> Option<usize> {
        match &self.grid {
            Some(grid) => grid.query(point),
            None => {
                log::debug!("Sector query before grid initialization");
                None
            }
        }
    }
}

/// External sector encoding: index or -1 for "no sector"
#[inline]
pub fn sector_code(sector: Option<usize>) -> i32 {
    match sector {
        Some(i) if i < SECTOR_COUNT => i as i32,
        _ => -1,
    }
}

/// Decode an external sector code. Anything outside [0, 18] is "no sector".
pub fn sector_from_code(code: i32) -> Option<usize> {
    match code {
        -1 => None,
        c if (0..SECTOR_COUNT as i32).contains(&c) => Some(c as usize),
        c => {
            log::warn!("Sector code {} out of range, treating as no sector", c);
            None
        }
    }
}
