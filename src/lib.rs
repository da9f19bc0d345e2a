//! Skyscan - sector signal aggregation over a rotatable sky viewport
//!
//! Core modules:
//! - `sky`: Projection, rotation control, hexagon sectors and per-tick aggregation
//! - `renderer`: Plain-data hand-off for a GPU sector renderer
//! - `settings`: Serializable configuration
//! - `error`: Error types

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sky;

pub use error::{SkyError, SkyResult};
pub use settings::Settings;

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Configuration constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Horizontal field of view (180°)
    pub const FOV_HORIZONTAL: f32 = PI;
    /// Vertical field of view (120°)
    pub const FOV_VERTICAL: f32 = 2.0 * PI / 3.0;

    /// Default viewport center azimuth
    pub const DEFAULT_CENTER_THETA: f32 = 0.0;
    /// Default viewport center polar angle (the equator)
    pub const DEFAULT_CENTER_PHI: f32 = FRAC_PI_2;

    /// Number of hexagonal sectors
    pub const SECTOR_COUNT: usize = 19;

    /// Rotation defaults
    pub const ROTATION_SPEED: f32 = 0.5; // radians per second
    pub const ROTATION_DAMPING: f32 = 5.0;
    pub const ROTATION_SNAP_EPSILON: f32 = 0.001;
    pub const RENORMALIZE_THRESHOLD: f32 = 20.0 * PI;

    /// Layout defaults (same units as the viewport)
    pub const HEX_RADIUS: f32 = 80.0;
    pub const VIEWPORT_SIZE: f32 = 800.0;
}

/// Normalize azimuth to [0, 2π)
#[inline]
pub fn normalize_theta(mut theta: f32) -> f32 {
    if !theta.is_finite() {
        return 0.0;
    }
    // Fold huge magnitudes first so the loops below stay short
    if theta.abs() > 64.0 * TAU {
        theta = theta.rem_euclid(TAU);
    }
    while theta < 0.0 {
        theta += TAU;
    }
    while theta >= TAU {
        theta -= TAU;
    }
    theta
}

/// Clamp polar angle to [0, π]
#[inline]
pub fn clamp_phi(phi: f32) -> f32 {
    if phi.is_nan() {
        return 0.0;
    }
    phi.clamp(0.0, PI)
}

/// Wrap an angular difference to [-π, π] (shortest signed delta)
#[inline]
pub fn wrap_signed(mut angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    if angle.abs() > 64.0 * TAU {
        angle = angle.rem_euclid(TAU);
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Great-circle distance between two sphere points (spherical law of cosines)
pub fn angular_distance(theta1: f32, phi1: f32, theta2: f32, phi2: f32) -> f32 {
    let cos_delta =
        phi1.sin() * phi2.sin() * (theta1 - theta2).cos() + phi1.cos() * phi2.cos();
    cos_delta.clamp(-1.0, 1.0).acos()
}

/// Convert spherical (θ, φ, r) to cartesian, z along the polar axis
#[inline]
pub fn spherical_to_cartesian(theta: f32, phi: f32, radius: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Convert cartesian to spherical (θ in [0, 2π), φ in [0, π], r)
pub fn cartesian_to_spherical(pos: Vec3) -> (f32, f32, f32) {
    let radius = pos.length();
    if radius < 1e-4 {
        return (0.0, 0.0, 0.0);
    }
    let theta = normalize_theta(pos.y.atan2(pos.x));
    let phi = (pos.z / radius).clamp(-1.0, 1.0).acos();
    (theta, phi, radius)
}
