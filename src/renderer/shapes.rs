//! Geometry generation for the sector map

use super::vertex::{SectorInstance, Vertex, signal_color};
use crate::sky::hex_grid::HexagonGrid;
use crate::sky::signal::SignalSnapshot;

/// One instance per sector, carrying that sector's signal
pub fn sector_instances(grid: &HexagonGrid, signals: &SignalSnapshot) -> Vec<SectorInstance> {
    grid.centers()
        .iter()
        .enumerate()
        .map(|(i, c)| SectorInstance {
            center: c.to_array(),
            radius: grid.radius(),
            signal: signals.get(i),
        })
        .collect()
}

/// Triangle list filling every hexagon, colored by signal strength
///
/// Built from the same vertices the sector test uses, so what is drawn is
/// exactly what is scored.
pub fn sector_fill(grid: &HexagonGrid, signals: &SignalSnapshot) -> Vec<Vertex> {
    let max = signals.max();
    let mut vertices = Vec::with_capacity(grid.len() * 18);

    for i in 0..grid.len() {
        let (Some(center), Some(corners)) = (grid.center(i), grid.vertices(i)) else {
            continue;
        };
        let color = signal_color(signals.get(i), 0.0, max);
        for k in 0..6 {
            let a = corners[k];
            let b = corners[(k + 1) % 6];
            vertices.push(Vertex::new(center.x, center.y, color));
            vertices.push(Vertex::new(a.x, a.y, color));
            vertices.push(Vertex::new(b.x, b.y, color));
        }
    }
    vertices
}
