//! Sphere to viewport projection
//!
//! Equirectangular mapping of (θ, φ) onto a normalized viewport that can be
//! rotated around the sphere:
//! - (0.5, 0.5) is the viewport center
//! - x grows with azimuth, one unit spans the horizontal FOV
//! - y grows with polar angle, one unit spans the vertical FOV
//!
//! Points outside [0, 1] are outside the field of view, not an error.
//!
//! Pole policy: the center latitude is always `clamp(π/2 + φ_offset, 0, π)`.
//! The stored φ offset is kept inside [-π/2, π/2], so the viewport stops at a
//! pole instead of folding over it.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::consts::*;
use crate::{clamp_phi, normalize_theta, spherical_to_cartesian, wrap_signed};

/// Normalized viewport coordinates
pub type ViewportPoint = Vec2;

/// A point on the unit sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    /// Azimuth, [0, 2π)
    pub theta: f32,
    /// Polar angle, [0, π]
    pub phi: f32,
}

impl SpherePoint {
    pub fn new(theta: f32, phi: f32) -> Self {
        Self {
            theta: normalize_theta(theta),
            phi: clamp_phi(phi),
        }
    }

    /// Cartesian position on the unit sphere
    pub fn unit_vector(&self) -> Vec3 {
        spherical_to_cartesian(self.theta, self.phi, 1.0)
    }
}

/// Rotation applied to the default viewport center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationOffsets {
    /// Azimuth offset, unbounded
    pub theta: f32,
    /// Polar offset, [-π/2, π/2]
    pub phi: f32,
}

impl RotationOffsets {
    pub fn new(theta: f32, phi: f32) -> Self {
        Self { theta, phi }
    }
}

/// Owned viewport context: current rotation plus the fixed field of view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewportProjection {
    offsets: RotationOffsets,
}

impl ViewportProjection {
    /// Viewport centered on (0, π/2)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(theta_offset: f32, phi_offset: f32) -> Self {
        let mut projection = Self::new();
        projection.set_rotation(theta_offset, phi_offset);
        projection
    }

    /// Field of view in radians (horizontal, vertical)
    pub fn fov() -> Vec2 {
        Vec2::new(FOV_HORIZONTAL, FOV_VERTICAL)
    }

    /// Replace the rotation. The polar offset is clamped so the center stays on the sphere.
    pub fn set_rotation(&mut self, theta_offset: f32, phi_offset: f32) {
        self.offsets = RotationOffsets {
            theta: theta_offset,
            phi: clamp_phi_offset(phi_offset),
        };
    }

    #[inline]
    pub fn rotation(&self) -> RotationOffsets {
        self.offsets
    }

    /// Current viewport center on the sphere
    pub fn center(&self) -> SpherePoint {
        SpherePoint {
            theta: center_theta(self.offsets.theta),
            phi: center_phi(self.offsets.phi),
        }
    }

    /// Project a sphere point with the current rotation
    #[inline]
    pub fn project(&self, theta: f32, phi: f32) -> ViewportPoint {
        Self::project_with(theta, phi, self.offsets)
    }

    /// Project a sphere point with arbitrary rotation offsets
    pub fn project_with(theta: f32, phi: f32, offsets: RotationOffsets) -> ViewportPoint {
        let center_theta = center_theta(offsets.theta);
        let center_phi = center_phi(offsets.phi);

        let delta_theta = wrap_signed(normalize_theta(theta) - center_theta);
        let delta_phi = clamp_phi(phi) - center_phi;

        Vec2::new(
            0.5 + delta_theta / FOV_HORIZONTAL,
            0.5 + delta_phi / FOV_VERTICAL,
        )
    }

    /// True if the point projects inside the viewport (edges inclusive)
    #[inline]
    pub fn is_visible(&self, theta: f32, phi: f32) -> bool {
        in_unit_square(self.project(theta, phi))
    }
}

/// True if both coordinates lie in [0, 1]
#[inline]
pub fn in_unit_square(p: ViewportPoint) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

/// Clamp a polar offset so π/2 + offset stays within [0, π]
#[inline]
pub fn clamp_phi_offset(phi_offset: f32) -> f32 {
    if phi_offset.is_nan() {
        return 0.0;
    }
    phi_offset.clamp(-FRAC_PI_2, FRAC_PI_2)
}

#[inline]
fn center_theta(theta_offset: f32) -> f32 {
    normalize_theta(DEFAULT_CENTER_THETA + normalize_theta(theta_offset))
}

#[inline]
fn center_phi(phi_offset: f32) -> f32 {
    clamp_phi(DEFAULT_CENTER_PHI + phi_offset)
}
