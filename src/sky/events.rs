//! Deterministic event field generation
//!
//! Stand-in for the external event generator: same seed, same events.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::signal::{EventField, SpaceEvent};

/// Generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub min_magnitude: f32,
    pub max_magnitude: f32,
    /// Seconds
    pub min_duration: f32,
    pub max_duration: f32,
    /// Start times are spread over [0, time_span)
    pub time_span: f32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 200,
            min_magnitude: 10.0,
            max_magnitude: 100.0,
            min_duration: 30.0,
            max_duration: 60.0,
            time_span: 100.0,
            seed: 42,
        }
    }
}

/// Seeded generator of uniformly distributed sphere events
#[derive(Debug, Clone)]
pub struct SeededEventGenerator {
    config: GeneratorConfig,
}

impl SeededEventGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the full event field
    pub fn generate(&self) -> EventField {
        let c = &self.config;
        let mut rng = Pcg32::seed_from_u64(c.seed);

        let events = (0..c.count)
            .map(|_| {
                let theta = rng.random::<f32>() * TAU;
                // Uniform in cos φ gives uniform density on the sphere
                let cos_phi = 1.0 - 2.0 * rng.random::<f32>();
                let phi = cos_phi.clamp(-1.0, 1.0).acos();
                let magnitude = lerp(c.min_magnitude, c.max_magnitude, rng.random());
                let start = rng.random::<f32>() * c.time_span;
                let duration = lerp(c.min_duration, c.max_duration, rng.random());
                SpaceEvent::new("Event", magnitude, theta, phi, start, duration)
            })
            .collect();

        log::info!("Generated {} events (seed {})", c.count, c.seed);
        EventField::new(events)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
