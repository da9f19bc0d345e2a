//! Vertex and instance types for 2D sector rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// One hexagon sector, in normalized viewport space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SectorInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub signal: f32,
}

/// Colors for sector map elements
pub mod colors {
    pub const SECTOR_IDLE: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
    pub const SIGNAL_LOW: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const SIGNAL_HIGH: [f32; 4] = [1.0, 0.25, 0.2, 1.0];
}

/// Blend from low to high signal color; zero signal draws as idle
pub fn signal_color(value: f32, min: f32, max: f32) -> [f32; 4] {
    if value <= 0.0 {
        return colors::SECTOR_IDLE;
    }
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let lo = colors::SIGNAL_LOW;
    let hi = colors::SIGNAL_HIGH;
    [
        lo[0] * (1.0 - t) + hi[0] * t,
        lo[1] * (1.0 - t) + hi[1] * t,
        lo[2] * (1.0 - t) + hi[2] * t,
        1.0,
    ]
}
