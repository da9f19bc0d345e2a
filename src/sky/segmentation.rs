//! Legacy partition of the whole sphere into 19 (θ, φ) bands
//!
//! - Segment 0: equatorial band φ ∈ π/2 ± center half-width, all θ
//! - Segments 1-6: wider equatorial ring minus the center band, 60° wedges
//! - Segments 7-12: upper polar cap, 60° wedges
//! - Segments 13-18: lower polar cap, 60° wedges
//!
//! It ignores the viewport entirely. Production scoring uses
//! [`SphereToSector`](super::mapper::SphereToSector); this partition is kept
//! as a second [`SectorMapper`] for cross-checks and diagnostics.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::mapper::SectorMapper;
use crate::{clamp_phi, normalize_theta, wrap_signed};

/// Default half-width of the center band (radians of φ)
pub const CENTER_HALF_WIDTH: f32 = 0.2;
/// Default half-width of ring 1 (radians of φ)
pub const RING1_HALF_WIDTH: f32 = 0.45;

const FULL_CIRCLE_EPSILON: f32 = 0.001;

/// One band of the partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereSegment {
    pub index: usize,
    pub theta_min: f32,
    pub theta_max: f32,
    pub phi_min: f32,
    pub phi_max: f32,
    /// φ sub-range carved out of this band
    pub exclude_phi: Option<(f32, f32)>,
}

impl SphereSegment {
    pub fn new(index: usize, theta_min: f32, theta_max: f32, phi_min: f32, phi_max: f32) -> Self {
        Self {
            index,
            theta_min: normalize_theta(theta_min),
            theta_max: normalize_theta(theta_max),
            phi_min: clamp_phi(phi_min),
            phi_max: clamp_phi(phi_max),
            exclude_phi: None,
        }
    }

    pub fn excluding(mut self, phi_min: f32, phi_max: f32) -> Self {
        self.exclude_phi = Some((clamp_phi(phi_min), clamp_phi(phi_max)));
        self
    }

    /// True if the θ range collapsed to one value (a band created as [0, 2π])
    #[inline]
    pub fn is_full_circle(&self) -> bool {
        (self.theta_min - self.theta_max).abs() < FULL_CIRCLE_EPSILON
    }

    pub fn contains(&self, theta: f32, phi: f32) -> bool {
        let theta = normalize_theta(theta);
        let phi = clamp_phi(phi);

        if phi < self.phi_min || phi > self.phi_max {
            return false;
        }
        if let Some((lo, hi)) = self.exclude_phi {
            if phi >= lo && phi <= hi {
                return false;
            }
        }

        if self.is_full_circle() {
            true
        } else if self.theta_min <= self.theta_max {
            theta >= self.theta_min && theta <= self.theta_max
        } else {
            // Wraps through 0/2π
            theta >= self.theta_min || theta <= self.theta_max
        }
    }

    /// Approximate (θ, φ) centroid, for diagnostics
    pub fn centroid(&self) -> (f32, f32) {
        let theta = if self.is_full_circle() {
            0.0
        } else {
            let mut span = self.theta_max - self.theta_min;
            if span < 0.0 {
                span += TAU;
            }
            normalize_theta(self.theta_min + span * 0.5)
        };
        (theta, (self.phi_min + self.phi_max) * 0.5)
    }
}

/// The 19-band sphere partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereSegmentation {
    segments: Vec<SphereSegment>,
}

impl Default for SphereSegmentation {
    fn default() -> Self {
        Self::new(CENTER_HALF_WIDTH, RING1_HALF_WIDTH)
    }
}

impl SphereSegmentation {
    /// Build the partition with the given band half-widths (radians of φ)
    pub fn new(center_half_width: f32, ring1_half_width: f32) -> Self {
        let center_lo = FRAC_PI_2 - center_half_width;
        let center_hi = FRAC_PI_2 + center_half_width;
        let ring1_lo = FRAC_PI_2 - ring1_half_width;
        let ring1_hi = FRAC_PI_2 + ring1_half_width;

        let wedge = |i: usize| (i as f32 / 6.0 * TAU, (i + 1) as f32 / 6.0 * TAU);

        let mut segments = Vec::with_capacity(19);
        segments.push(SphereSegment::new(0, 0.0, TAU, center_lo, center_hi));

        for i in 0..6 {
            let (start, end) = wedge(i);
            segments.push(
                SphereSegment::new(i + 1, start, end, ring1_lo, ring1_hi)
                    .excluding(center_lo, center_hi),
            );
        }
        for i in 0..6 {
            let (start, end) = wedge(i);
            segments.push(SphereSegment::new(i + 7, start, end, 0.0, ring1_lo));
        }
        for i in 0..6 {
            let (start, end) = wedge(i);
            segments.push(SphereSegment::new(i + 13, start, end, ring1_hi, PI));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[SphereSegment] {
        &self.segments
    }

    /// Segment containing (θ, φ). The center band wins over everything else.
    pub fn find_segment(&self, theta: f32, phi: f32) -> Option<usize> {
        let theta = normalize_theta(theta);
        let phi = clamp_phi(phi);

        let (center, rest) = self.segments.split_first()?;
        if center.contains(theta, phi) {
            return Some(center.index);
        }
        if let Some(seg) = rest.iter().find(|s| s.contains(theta, phi)) {
            return Some(seg.index);
        }

        log::warn!(
            "No segment for (θ={:.3}, φ={:.3}); nearest is {:?}",
            theta,
            phi,
            self.nearest_segment(theta, phi)
        );
        None
    }

    /// Nearest segment by centroid distance. Diagnostic only.
    pub fn nearest_segment(&self, theta: f32, phi: f32) -> Option<usize> {
        let theta = normalize_theta(theta);
        let phi = clamp_phi(phi);
        self.segments
            .iter()
            .map(|seg| {
                let (c_theta, c_phi) = seg.centroid();
                let d_theta = wrap_signed(theta - c_theta);
                let d_phi = phi - c_phi;
                (seg.index, d_theta * d_theta + d_phi * d_phi)
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
    }
}

impl SectorMapper for SphereSegmentation {
    fn sector(&self, theta: f32, phi: f32) -> Option<usize> {
        self.find_segment(theta, phi)
    }

    /// The partition covers the whole sphere
    fn is_visible(&self, _theta: f32, _phi: f32) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sky::hex_grid::{HexLayout, SectorGrid};
    use crate::sky::mapper::SphereToSector;
    use crate::sky::projection::ViewportProjection;
    use glam::Vec2;

    #[test]
    fn test_partition_has_19_segments() {
        let seg = SphereSegmentation::default();
        assert_eq!(seg.segments().len(), SECTOR_COUNT);
        for (i, s) in seg.segments().iter().enumerate() {
            assert_eq!(s.index, i);
        }
        assert!(seg.segments()[0].is_full_circle());
        assert!(!seg.segments()[1].is_full_circle());
    }

    #[test]
    fn test_center_band_has_priority() {
        let seg = SphereSegmentation::default();
        for i in 0..12 {
            assert_eq!(seg.find_segment(i as f32 * 0.5, FRAC_PI_2), Some(0));
        }
        // Exact band edge belongs to the center band
        assert_eq!(seg.find_segment(1.0, FRAC_PI_2 + CENTER_HALF_WIDTH), Some(0));
    }

    #[test]
    fn test_ring_and_caps() {
        let seg = SphereSegmentation::default();
        // Ring 1, first wedge, just above the center band
        assert_eq!(seg.find_segment(0.5, FRAC_PI_2 - 0.3), Some(1));
        // Upper cap, third wedge (120°..180°)
        assert_eq!(seg.find_segment(2.5, 0.2), Some(9));
        // Lower cap, last wedge wraps through 2π
        assert_eq!(seg.find_segment(6.0, 3.0), Some(18));
        // Poles are covered
        assert!(seg.find_segment(0.0, 0.0).is_some());
        assert!(seg.find_segment(0.0, PI).is_some());
    }

    #[test]
    fn test_wraparound_wedge() {
        let s = SphereSegment::new(6, 5.0 / 6.0 * TAU, TAU, 0.0, PI);
        assert!(s.theta_min > s.theta_max);
        assert!(s.contains(6.0, 1.0));
        assert!(s.contains(0.0, 1.0));
        assert!(!s.contains(1.0, 1.0));
    }

    #[test]
    fn test_every_point_is_covered() {
        let seg = SphereSegmentation::default();
        for i in 0..=36 {
            for j in 0..=18 {
                let theta = i as f32 / 36.0 * TAU;
                let phi = j as f32 / 18.0 * PI;
                assert!(seg.find_segment(theta, phi).is_some(), "gap at ({theta}, {phi})");
            }
        }
    }

    #[test]
    fn test_nearest_segment_is_diagnostic() {
        let seg = SphereSegmentation::default();
        assert_eq!(seg.nearest_segment(0.1, FRAC_PI_2), Some(0));
        assert_eq!(seg.nearest_segment(2.5, 0.2), Some(9));
    }

    fn sector_of<M: SectorMapper + ?Sized>(mapper: &M, theta: f32, phi: f32) -> Option<usize> {
        if mapper.is_visible(theta, phi) {
            mapper.sector(theta, phi)
        } else {
            None
        }
    }

    #[test]
    fn test_strategies_agree_at_view_center() {
        let projection = ViewportProjection::new();
        let grid =
            SectorGrid::from_layout(&HexLayout::canonical(HEX_RADIUS, Vec2::splat(VIEWPORT_SIZE)))
                .unwrap();
        let strategies: [&dyn SectorMapper; 2] = [
            &SphereToSector::new(&projection, &grid),
            &SphereSegmentation::default(),
        ];
        for mapper in strategies {
            assert_eq!(sector_of(mapper, 0.0, FRAC_PI_2), Some(0));
            assert_eq!(sector_of(mapper, 0.05, FRAC_PI_2 + 0.1), Some(0));
        }
    }
}
