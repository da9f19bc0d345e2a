//! Events and per-tick sector signal aggregation

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mapper::SectorMapper;
use super::projection::SpherePoint;
use crate::consts::SECTOR_COUNT;

/// A transient point event on the sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceEvent {
    /// Free-form category label
    pub kind: String,
    /// Contribution to its sector while active (>= 0)
    pub magnitude: f32,
    pub position: SpherePoint,
    /// Activation time (seconds)
    pub start: f32,
    /// Active duration (seconds)
    pub duration: f32,
}

impl SpaceEvent {
    pub fn new(
        kind: impl Into<String>,
        magnitude: f32,
        theta: f32,
        phi: f32,
        start: f32,
        duration: f32,
    ) -> Self {
        Self {
            kind: kind.into(),
            magnitude: magnitude.max(0.0),
            position: SpherePoint::new(theta, phi),
            start,
            duration: duration.max(0.0),
        }
    }

    /// Active on the closed window [start, start + duration]
    #[inline]
    pub fn is_active(&self, now: f32) -> bool {
        now >= self.start && now <= self.start + self.duration
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Position on the unit sphere
    pub fn unit_vector(&self) -> Vec3 {
        self.position.unit_vector()
    }
}

/// Supplier of events active at a given time
pub trait EventSource {
    fn active_events(&self, now: f32) -> Vec<&SpaceEvent>;
}

/// Plain event list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventField {
    pub events: Vec<SpaceEvent>,
}

impl EventField {
    pub fn new(events: Vec<SpaceEvent>) -> Self {
        Self { events }
    }

    pub fn push(&mut self, event: SpaceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for EventField {
    fn active_events(&self, now: f32) -> Vec<&SpaceEvent> {
        self.events.iter().filter(|e| e.is_active(now)).collect()
    }
}

impl EventSource for [SpaceEvent] {
    fn active_events(&self, now: f32) -> Vec<&SpaceEvent> {
        self.iter().filter(|e| e.is_active(now)).collect()
    }
}

/// Per-sector signal for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalSnapshot(pub [f32; SECTOR_COUNT]);

impl SignalSnapshot {
    /// Signal of one sector; 0 for an out-of-range index
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }

    pub fn max(&self) -> f32 {
        self.0.iter().copied().fold(0.0, f32::max)
    }

    fn clear(&mut self) {
        self.0 = [0.0; SECTOR_COUNT];
    }
}

/// Event counts from one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Added to a sector
    pub mapped: u32,
    /// Visible but in a gap between hexagons
    pub unmapped: u32,
    /// Outside the field of view
    pub outside_fov: u32,
    /// Mapper returned an index outside the sector range
    pub invalid: u32,
}

/// Sums active, visible event magnitudes into sectors
#[derive(Debug, Clone)]
pub struct SignalAggregator {
    snapshot: SignalSnapshot,
    stats: AggregationStats,
    passes: u64,
    summary_interval: u64,
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self::new(600)
    }
}

impl SignalAggregator {
    /// `summary_interval`: passes between debug summaries (0 disables them)
    pub fn new(summary_interval: u64) -> Self {
        Self {
            snapshot: SignalSnapshot::default(),
            stats: AggregationStats::default(),
            passes: 0,
            summary_interval,
        }
    }

    /// Recompute all sectors from scratch for time `now`
    pub fn aggregate<M, S>(&mut self, mapper: &M, source: &S, now: f32) -> AggregationStats
    where
        M: SectorMapper + ?Sized,
        S: EventSource + ?Sized,
    {
        self.snapshot.clear();
        let mut stats = AggregationStats::default();

        for event in source.active_events(now) {
            let SpherePoint { theta, phi } = event.position;
            if !mapper.is_visible(theta, phi) {
                stats.outside_fov += 1;
                continue;
            }
            match mapper.sector(theta, phi) {
                Some(i) if i < SECTOR_COUNT => {
                    self.snapshot.0[i] += event.magnitude.max(0.0);
                    stats.mapped += 1;
                }
                Some(i) => {
                    log::warn!(
                        "Event at (θ={:.2}, φ={:.2}) mapped to invalid sector {}",
                        theta,
                        phi,
                        i
                    );
                    stats.invalid += 1;
                }
                None => stats.unmapped += 1,
            }
        }

        self.stats = stats;
        self.passes += 1;
        if self.summary_interval > 0 && self.passes % self.summary_interval == 0 {
            self.log_summary();
        }
        stats
    }

    #[inline]
    pub fn snapshot(&self) -> &SignalSnapshot {
        &self.snapshot
    }

    /// Signal of one sector; 0 for an out-of-range index
    #[inline]
    pub fn signal(&self, index: usize) -> f32 {
        self.snapshot.get(index)
    }

    /// Counts from the most recent pass
    pub fn stats(&self) -> AggregationStats {
        self.stats
    }

    fn log_summary(&self) {
        let active: Vec<String> = self
            .snapshot
            .0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .map(|(i, v)| format!("S{}:{:.1}", i, v))
            .collect();
        log::debug!(
            "Signals after {} passes: [{}] ({:?})",
            self.passes,
            active.join(" "),
            self.stats
        );
    }
}
