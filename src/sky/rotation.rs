//! Viewport rotation control
//!
//! Directional input moves a *target* rotation; the applied rotation follows
//! it with exponential smoothing. The azimuth offset is never normalized
//! during interpolation so motion across the 0/2π boundary stays continuous.
//! It is folded back toward zero only when it grows large, and target and
//! current are folded together so the visible center never jumps.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

use super::projection::{RotationOffsets, ViewportProjection, clamp_phi_offset};
use crate::consts::*;
use crate::wrap_signed;

/// Tunables for the rotation controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Rotation speed at full deflection (radians per second)
    pub rotation_speed: f32,
    /// Smoothly interpolate toward the target (false = apply instantly)
    pub smooth: bool,
    /// Interpolation rate (per second)
    pub damping: f32,
    /// Remaining azimuth delta below which the rotation snaps to target
    pub snap_epsilon: f32,
    /// |θ offset| above which the offsets are folded back toward zero
    pub renormalize_threshold: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            rotation_speed: ROTATION_SPEED,
            smooth: true,
            damping: ROTATION_DAMPING,
            snap_epsilon: ROTATION_SNAP_EPSILON,
            renormalize_threshold: RENORMALIZE_THRESHOLD,
        }
    }
}

/// Directional input for one tick
///
/// Each field is a deflection in [0, 1]; keys map to 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationInput {
    pub azimuth_neg: f32,
    pub azimuth_pos: f32,
    pub polar_neg: f32,
    pub polar_pos: f32,
}

impl RotationInput {
    /// Net azimuth deflection
    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth_pos.clamp(0.0, 1.0) - self.azimuth_neg.clamp(0.0, 1.0)
    }

    /// Net polar deflection
    #[inline]
    pub fn polar(&self) -> f32 {
        self.polar_pos.clamp(0.0, 1.0) - self.polar_neg.clamp(0.0, 1.0)
    }

    pub fn is_idle(&self) -> bool {
        self.azimuth() == 0.0 && self.polar() == 0.0
    }
}

/// Handle returned by [`RotationController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Rotation-changed callback. Receives the new offsets and the already-updated projection.
pub type RotationListener = Box<dyn FnMut(RotationOffsets, &ViewportProjection)>;

/// Turns directional input into smoothed rotation offsets
pub struct RotationController {
    config: RotationConfig,
    current: RotationOffsets,
    target: RotationOffsets,
    listeners: Vec<(ListenerId, RotationListener)>,
    next_listener_id: u32,
}

impl fmt::Debug for RotationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotationController")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationConfig::default())
    }
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            current: RotationOffsets::default(),
            target: RotationOffsets::default(),
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Applied rotation
    #[inline]
    pub fn current(&self) -> RotationOffsets {
        self.current
    }

    /// Rotation being smoothed toward
    #[inline]
    pub fn target(&self) -> RotationOffsets {
        self.target
    }

    /// Register a rotation-changed listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(RotationOffsets, &ViewportProjection) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Advance one tick: input → target, smoothing → current, then publish.
    ///
    /// When this returns, `projection` holds the new rotation and every
    /// listener has observed it.
    pub fn update(
        &mut self,
        input: &RotationInput,
        dt: f32,
        projection: &mut ViewportProjection,
    ) -> RotationOffsets {
        self.apply_input(input, dt);
        self.step(dt);
        self.renormalize();
        self.publish(projection);
        self.current
    }

    /// Point the viewport at the given offsets (programmatic control).
    ///
    /// The azimuth target is reached along the shortest path from the
    /// current offset, keeping the unbounded accumulator continuous. With
    /// smoothing disabled the rotation is applied and published immediately.
    pub fn set_rotation(
        &mut self,
        theta_offset: f32,
        phi_offset: f32,
        projection: &mut ViewportProjection,
    ) {
        let delta = wrap_signed(theta_offset - self.current.theta);
        self.target.theta = self.current.theta + delta;
        self.target.phi = clamp_phi_offset(phi_offset);

        if !self.config.smooth {
            self.current = self.target;
            self.publish(projection);
        }
    }

    fn apply_input(&mut self, input: &RotationInput, dt: f32) {
        if input.is_idle() {
            return;
        }
        let step = self.config.rotation_speed * dt;
        self.target.theta += input.azimuth() * step;
        self.target.phi = (self.target.phi + input.polar() * step).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn step(&mut self, dt: f32) {
        let delta = wrap_signed(self.target.theta - self.current.theta);

        if !self.config.smooth {
            self.current.theta += delta;
            self.current.phi = self.target.phi;
            return;
        }

        // Capped so a long frame cannot overshoot
        let t = (self.config.damping * dt).clamp(0.0, 1.0);

        self.current.theta += delta * t;
        if (self.target.theta - self.current.theta).abs() < self.config.snap_epsilon {
            self.current.theta = self.target.theta;
        }

        self.current.phi += (self.target.phi - self.current.phi) * t;
    }

    fn renormalize(&mut self) {
        if self.current.theta.abs() <= self.config.renormalize_threshold {
            return;
        }
        let fold = (self.current.theta / TAU).round() * TAU;
        self.current.theta -= fold;
        self.target.theta -= fold;
        log::debug!(
            "Folded azimuth offset by {:.3} rad (now {:.3})",
            fold,
            self.current.theta
        );
    }

    fn publish(&mut self, projection: &mut ViewportProjection) {
        projection.set_rotation(self.current.theta, self.current.phi);
        let offsets = projection.rotation();
        for (_, listener) in self.listeners.iter_mut() {
            listener(offsets, projection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f32::consts::PI;
    use std::rc::Rc;

    fn settle(controller: &mut RotationController, projection: &mut ViewportProjection, ticks: u32) {
        let idle = RotationInput::default();
        for _ in 0..ticks {
            controller.update(&idle, SIM_DT, projection);
        }
    }

    #[test]
    fn test_input_moves_target_then_current() {
        let mut controller = RotationController::default();
        let mut projection = ViewportProjection::new();
        let input = RotationInput {
            azimuth_pos: 1.0,
            ..Default::default()
        };

        controller.update(&input, SIM_DT, &mut projection);
        assert!((controller.target().theta - ROTATION_SPEED * SIM_DT).abs() < 1e-6);
        // Smoothing lags behind the target
        assert!(controller.current().theta > 0.0);
        assert!(controller.current().theta < controller.target().theta);
        assert_eq!(projection.rotation(), controller.current());
    }

    #[test]
    fn test_smoothing_converges_and_snaps() {
        let mut controller = RotationController::default();
        let mut projection = ViewportProjection::new();
        controller.set_rotation(1.0, 0.3, &mut projection);

        settle(&mut controller, &mut projection, 600);
        assert_eq!(controller.current().theta, 1.0);
        assert!((controller.current().phi - 0.3).abs() < 1e-4);
        assert_eq!(projection.rotation().theta, 1.0);
    }

    #[test]
    fn test_polar_target_is_clamped() {
        let mut controller = RotationController::new(RotationConfig {
            rotation_speed: 10.0,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();
        let input = RotationInput {
            polar_pos: 1.0,
            ..Default::default()
        };
        for _ in 0..120 {
            controller.update(&input, SIM_DT, &mut projection);
        }
        assert_eq!(controller.target().phi, FRAC_PI_2);
        assert!(projection.center().phi <= PI);
    }

    #[test]
    fn test_set_rotation_takes_shortest_path() {
        let mut controller = RotationController::new(RotationConfig {
            smooth: false,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();

        controller.set_rotation(0.2, 0.0, &mut projection);
        assert!((controller.current().theta - 0.2).abs() < 1e-6);

        // 2π - 0.2 is 0.4 rad clockwise from 0.2, not 2π - 0.4 the other way
        controller.set_rotation(TAU - 0.2, 0.0, &mut projection);
        assert!((controller.current().theta + 0.2).abs() < 1e-5);
        assert!((projection.center().theta - (TAU - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_instant_mode_applies_full_delta() {
        let mut controller = RotationController::new(RotationConfig {
            smooth: false,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();
        let input = RotationInput {
            azimuth_neg: 1.0,
            polar_neg: 1.0,
            ..Default::default()
        };
        controller.update(&input, 1.0, &mut projection);
        assert!((controller.current().theta + ROTATION_SPEED).abs() < 1e-6);
        assert!((controller.current().phi + ROTATION_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_renormalization_preserves_center() {
        let mut controller = RotationController::new(RotationConfig {
            rotation_speed: 40.0,
            smooth: false,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();
        let input = RotationInput {
            azimuth_pos: 1.0,
            ..Default::default()
        };

        let mut max_abs = 0.0f32;
        let mut last_center = projection.center().theta;
        for _ in 0..600 {
            controller.update(&input, SIM_DT, &mut projection);
            max_abs = max_abs.max(controller.current().theta.abs());

            // Center advances by exactly one step per tick, modulo wraparound
            let center = projection.center().theta;
            let advance = wrap_signed(center - last_center);
            assert!((advance - 40.0 * SIM_DT).abs() < 1e-3, "advance {advance}");
            last_center = center;
        }
        // 600 ticks at 40 rad/s would reach 400 rad without folding
        assert!(max_abs <= RENORMALIZE_THRESHOLD + 40.0 * SIM_DT);
        assert!((controller.current().theta - controller.target().theta).abs() < 1e-4);
    }

    #[test]
    fn test_smoothed_renormalization_keeps_gap() {
        let mut controller = RotationController::new(RotationConfig {
            rotation_speed: 10.0,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();
        let input = RotationInput {
            azimuth_pos: 1.0,
            ..Default::default()
        };

        let mut folds = 0;
        let mut last_current = controller.current().theta;
        let mut last_gap = 0.0f32;
        let mut last_center = projection.center().theta;
        for _ in 0..3000 {
            controller.update(&input, SIM_DT, &mut projection);
            let current = controller.current().theta;
            let gap = controller.target().theta - current;

            // Input only pushes forward, so a drop in the offset is a fold
            if current < last_current {
                folds += 1;
                assert!((gap - last_gap).abs() < 1e-3, "gap {last_gap} -> {gap}");
            }

            let center = projection.center().theta;
            let advance = wrap_signed(center - last_center);
            assert!(
                (0.0..=10.0 * SIM_DT + 1e-3).contains(&advance),
                "advance {advance}"
            );

            last_current = current;
            last_gap = gap;
            last_center = center;
        }
        assert!(folds >= 1);
        assert!(controller.current().theta.abs() <= RENORMALIZE_THRESHOLD + 10.0 * SIM_DT);
    }

    #[test]
    fn test_long_frame_does_not_overshoot() {
        let mut controller = RotationController::default();
        let mut projection = ViewportProjection::new();
        controller.set_rotation(1.0, 0.5, &mut projection);

        // damping * dt = 10, capped to 1: lands exactly on the target
        controller.update(&RotationInput::default(), 2.0, &mut projection);
        assert_eq!(controller.current(), RotationOffsets::new(1.0, 0.5));
        assert_eq!(projection.rotation(), controller.current());
    }

    #[test]
    fn test_listeners_observe_updated_projection() {
        let mut controller = RotationController::new(RotationConfig {
            smooth: false,
            ..Default::default()
        });
        let mut projection = ViewportProjection::new();

        let seen: Rc<RefCell<Vec<(RotationOffsets, f32)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = controller.subscribe(move |offsets, projection| {
            // Projecting from inside the callback uses the new rotation
            let x = projection.project(offsets.theta, FRAC_PI_2).x;
            sink.borrow_mut().push((offsets, x));
        });

        controller.set_rotation(1.0, 0.0, &mut projection);
        controller.update(&RotationInput::default(), SIM_DT, &mut projection);

        {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert!((seen[0].0.theta - 1.0).abs() < 1e-6);
            assert!((seen[0].1 - 0.5).abs() < 1e-6);
        }

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.update(&RotationInput::default(), SIM_DT, &mut projection);
        assert_eq!(seen.borrow().len(), 2);
    }
}
