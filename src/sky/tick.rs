//! Fixed timestep scan tick
//!
//! Phase order within one tick is fixed:
//! 1. advance the session clock
//! 2. rotation update, written into the projection, listeners notified
//! 3. signal aggregation against the rotation from step 2
//!
//! Aggregation never sees a stale rotation because step 3 only starts after
//! `RotationController::update` has returned.

use serde::{Deserialize, Serialize};

use super::mapper::SphereToSector;
use super::rotation::RotationInput;
use super::signal::{AggregationStats, EventSource};
use super::state::ScanState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Directional deflections
    pub rotation: RotationInput,
    /// Programmatic rotation request (θ offset, φ offset), applied before smoothing
    pub set_rotation: Option<(f32, f32)>,
}

/// Advance the session by one timestep and recompute signals
pub fn tick<S>(state: &mut ScanState, input: &TickInput, source: &S, dt: f32) -> AggregationStats
where
    S: EventSource + ?Sized,
{
    state.ticks += 1;
    state.time += dt;

    if let Some((theta, phi)) = input.set_rotation {
        state.rotation.set_rotation(theta, phi, &mut state.projection);
    }
    state
        .rotation
        .update(&input.rotation, dt, &mut state.projection);

    let mapper = SphereToSector::new(&state.projection, &state.grid);
    state.aggregator.aggregate(&mapper, source, state.time)
}
