//! Spinner motion engine.
//!
//! Two inputs drive the spinner:
//!
//! - pointer samples while the user drags it, which set the velocity
//!   directly to the angle moved since the last sample
//! - a fixed-rate tick, which lets a released spinner coast and slows it by
//!   the design's friction each time
//!
//! ```text
//!  Settled ──pointer down──► Dragging ──pointer up──► Coasting ◄─┐
//!     ▲                         ▲                      │  │      │ tick
//!     │                         └─────pointer down─────┘  └──────┘
//!     └──────────────── tick leaves |v| <= stop ─────────────┘
//! ```
//!
//! Velocity is in degrees per tick. Ticks are not scaled by elapsed time,
//! so the decay rate depends on the tick cadence staying steady.

use crate::config::SpinnerConfig;
use crate::design::SpinnerDesign;
use crate::error::ConfigError;
use crate::haptics::{HapticKind, Haptics};
use crate::input::{normalize_delta, PointerEvent};

/// Raw motion state of one spinner.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerState {
    /// Cumulative rotation, never wrapped.
    pub rotation_degrees: f64,
    /// Degrees per tick, signed.
    pub angular_velocity: f64,
    /// Pointer angle at the previous drag sample, in (-180, 180].
    pub last_pointer_angle_degrees: f64,
    pub is_dragging: bool,
    /// Per-tick velocity multiplier in (0, 1).
    pub friction_coefficient: f64,
    /// Time of the last drag pulse; `None` until one has been sent.
    pub last_haptic_emit_ms: Option<u64>,
}

impl SpinnerState {
    pub fn new(friction_coefficient: f64) -> Self {
        Self {
            rotation_degrees: 0.0,
            angular_velocity: 0.0,
            last_pointer_angle_degrees: 0.0,
            is_dragging: false,
            friction_coefficient,
            last_haptic_emit_ms: None,
        }
    }
}

impl Default for SpinnerState {
    fn default() -> Self {
        Self::new(SpinnerDesign::default().friction())
    }
}

/// Where the spinner is in its motion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinPhase {
    /// Held by a pointer.
    Dragging,
    /// Released and still slowing down.
    Coasting,
    /// Released and at or below the stop threshold.
    Settled,
}

/// One spinner widget's motion engine.
#[derive(Debug)]
pub struct Spinner<H: Haptics> {
    state: SpinnerState,
    design: SpinnerDesign,
    config: SpinnerConfig,
    haptics: H,
}

impl<H: Haptics> Spinner<H> {
    /// Create a spinner with default settings and the classic design.
    pub fn new(haptics: H) -> Self {
        Self::with_config(SpinnerConfig::default(), haptics)
    }

    /// Create a spinner using `config`, starting with `config.design`.
    pub fn with_config(config: SpinnerConfig, haptics: H) -> Self {
        let design = config.design;
        Self {
            state: SpinnerState::new(design.friction()),
            design,
            config,
            haptics,
        }
    }

    /// Grab the spinner at `angle` degrees.
    pub fn on_pointer_down(&mut self, angle: f64) {
        self.state.is_dragging = true;
        self.state.last_pointer_angle_degrees = angle;
        self.emit(HapticKind::Light);
    }

    /// Drag sample at `angle` degrees, taken at `now_ms`.
    ///
    /// Ignored unless the spinner is held.
    pub fn on_pointer_move(&mut self, angle: f64, now_ms: u64) {
        if !self.state.is_dragging {
            return;
        }

        let delta = normalize_delta(angle - self.state.last_pointer_angle_degrees);
        self.state.angular_velocity = delta;
        self.state.rotation_degrees += delta;
        self.state.last_pointer_angle_degrees = angle;

        let intensity = delta.abs();
        if self.haptic_due(now_ms) && intensity > self.config.haptic_min_intensity {
            self.emit(HapticKind::Spin { intensity });
            self.state.last_haptic_emit_ms = Some(now_ms);
        }
    }

    /// Release the spinner. The last drag velocity carries into the coast.
    pub fn on_pointer_up(&mut self) {
        self.state.is_dragging = false;
    }

    /// Advance one simulation step.
    ///
    /// Returns true if rotation or velocity changed.
    pub fn tick(&mut self) -> bool {
        if self.state.is_dragging || !self.is_moving() {
            return false;
        }
        self.state.rotation_degrees += self.state.angular_velocity;
        self.state.angular_velocity *= self.state.friction_coefficient;
        true
    }

    /// Run `ticks` steps, returning how many changed anything.
    pub fn tick_n(&mut self, ticks: u32) -> u32 {
        let mut changed = 0;
        for _ in 0..ticks {
            if !self.tick() {
                break;
            }
            changed += 1;
        }
        changed
    }

    /// Switch design. Rotation and velocity reset to zero.
    pub fn set_design(&mut self, design: SpinnerDesign) {
        self.design = design;
        self.reset_with_friction(design.friction());
        log::debug!("spinner design set to {} ({})", design, design.tagline());
    }

    /// Replace the friction coefficient. Rotation and velocity reset to zero.
    ///
    /// Friction must lie strictly between 0 and 1, otherwise a released
    /// spinner would never settle. Out-of-range values leave the spinner
    /// untouched.
    pub fn set_friction(&mut self, friction: f64) -> Result<(), ConfigError> {
        if !(friction > 0.0 && friction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "friction must be in (0, 1), got {}",
                friction
            )));
        }
        self.reset_with_friction(friction);
        Ok(())
    }

    fn reset_with_friction(&mut self, friction: f64) {
        self.state.friction_coefficient = friction;
        self.state.rotation_degrees = 0.0;
        self.state.angular_velocity = 0.0;
    }

    /// Apply a pointer sample.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { angle } => self.on_pointer_down(angle),
            PointerEvent::Move { angle, timestamp_ms } => self.on_pointer_move(angle, timestamp_ms),
            PointerEvent::Up => self.on_pointer_up(),
        }
    }

    /// Send a pulse to the haptics sink. Failures are logged and dropped.
    pub fn emit(&mut self, kind: HapticKind) {
        if let Err(e) = self.haptics.pulse(kind) {
            log::warn!("ignoring haptic failure for {:?}: {}", kind, e);
        }
    }

    /// Released spin still above the stop threshold. Non-finite velocity
    /// counts as settled.
    fn is_moving(&self) -> bool {
        let v = self.state.angular_velocity;
        v.is_finite() && v.abs() > self.config.stop_threshold
    }

    fn haptic_due(&self, now_ms: u64) -> bool {
        match self.state.last_haptic_emit_ms {
            Some(last) => now_ms.saturating_sub(last) > self.config.haptic_interval_ms,
            None => true,
        }
    }

    // ========== Readouts ==========

    /// Rotation for the renderer's transform, in degrees.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.state.rotation_degrees
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.state.angular_velocity
    }

    /// Whole-number speed for display: `|round(velocity)|`, halves rounding up.
    pub fn speed(&self) -> u32 {
        let v = self.state.angular_velocity;
        let floor = v.floor();
        let rounded = if v - floor >= 0.5 { v.ceil() } else { floor };
        rounded.abs() as u32
    }

    pub fn phase(&self) -> SpinPhase {
        if self.state.is_dragging {
            SpinPhase::Dragging
        } else if self.is_moving() {
            SpinPhase::Coasting
        } else {
            SpinPhase::Settled
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    #[inline]
    pub fn design(&self) -> SpinnerDesign {
        self.design
    }

    #[inline]
    pub fn state(&self) -> &SpinnerState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &SpinnerConfig {
        &self.config
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn haptics_mut(&mut self) -> &mut H {
        &mut self.haptics
    }
}

impl<H: Haptics + Default> Default for Spinner<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapticsError;

    #[derive(Debug, Default)]
    struct Recorder {
        pulses: Vec<HapticKind>,
    }

    impl Haptics for Recorder {
        fn pulse(&mut self, kind: HapticKind) -> Result<(), HapticsError> {
            self.pulses.push(kind);
            Ok(())
        }
    }

    struct Broken;

    impl Haptics for Broken {
        fn pulse(&mut self, _kind: HapticKind) -> Result<(), HapticsError> {
            Err(HapticsError::Unsupported)
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_new_spinner_is_settled() {
        let spinner = Spinner::new(Recorder::default());
        assert_eq!(spinner.rotation(), 0.0);
        assert_eq!(spinner.velocity(), 0.0);
        assert_eq!(spinner.phase(), SpinPhase::Settled);
        assert_eq!(spinner.design(), SpinnerDesign::Classic);
        assert_eq!(spinner.state().friction_coefficient, 0.98);
    }

    #[test]
    fn test_pointer_down_grabs_without_velocity_change() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(45.0);

        assert!(spinner.is_dragging());
        assert_eq!(spinner.state().last_pointer_angle_degrees, 45.0);
        assert_eq!(spinner.velocity(), 0.0);
        assert_eq!(spinner.haptics().pulses, vec![HapticKind::Light]);
    }

    #[test]
    fn test_move_sets_velocity_and_rotation() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(10.0);
        spinner.on_pointer_move(40.0, 0);

        assert_eq!(spinner.velocity(), 30.0);
        assert_eq!(spinner.rotation(), 30.0);
        assert_eq!(spinner.state().last_pointer_angle_degrees, 40.0);
    }

    #[test]
    fn test_move_across_boundary() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(170.0);
        spinner.on_pointer_move(-170.0, 0);
        assert_eq!(spinner.velocity(), 20.0);

        spinner.on_pointer_move(170.0, 1);
        assert_eq!(spinner.velocity(), -20.0);
        assert_eq!(spinner.rotation(), 0.0);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_move(90.0, 0);
        assert_eq!(spinner.rotation(), 0.0);
        assert_eq!(spinner.velocity(), 0.0);
        assert!(spinner.haptics().pulses.is_empty());
    }

    #[test]
    fn test_tick_decays_when_released() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(10.0);
        spinner.on_pointer_move(40.0, 0);
        spinner.on_pointer_up();

        assert!(spinner.tick());
        assert!(approx(spinner.velocity(), 29.4));
        assert!(approx(spinner.rotation(), 60.0));
        assert_eq!(spinner.phase(), SpinPhase::Coasting);
    }

    #[test]
    fn test_tick_is_noop_while_dragging() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(50.0, 0);

        assert!(!spinner.tick());
        assert_eq!(spinner.velocity(), 50.0);
        assert_eq!(spinner.rotation(), 50.0);
        assert_eq!(spinner.phase(), SpinPhase::Dragging);
    }

    #[test]
    fn test_settled_ticks_change_nothing() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(0.1, 0);
        spinner.on_pointer_up();

        let before = spinner.state().clone();
        for _ in 0..10 {
            assert!(!spinner.tick());
        }
        assert_eq!(spinner.state(), &before);
        assert_eq!(spinner.phase(), SpinPhase::Settled);
    }

    #[test]
    fn test_set_design_resets_motion() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(90.0, 0);
        spinner.set_design(SpinnerDesign::Ninja);

        assert_eq!(spinner.rotation(), 0.0);
        assert_eq!(spinner.velocity(), 0.0);
        assert_eq!(spinner.design(), SpinnerDesign::Ninja);
        assert_eq!(spinner.state().friction_coefficient, 0.96);
    }

    #[test]
    fn test_set_friction_resets_motion() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(90.0, 0);
        spinner.on_pointer_up();
        spinner.tick();

        spinner.set_friction(0.5).unwrap();
        assert_eq!(spinner.rotation(), 0.0);
        assert_eq!(spinner.velocity(), 0.0);
        assert_eq!(spinner.state().friction_coefficient, 0.5);
    }

    #[test]
    fn test_set_friction_rejects_out_of_range() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(10.0);
        spinner.on_pointer_move(40.0, 0);
        spinner.on_pointer_up();

        for bad in [1.0, 1.5, 0.0, -0.2, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(spinner.set_friction(bad), Err(ConfigError::Invalid(_))),
                "friction {} accepted",
                bad
            );
        }

        // Rejected values leave motion and friction as they were.
        assert_eq!(spinner.state().friction_coefficient, 0.98);
        assert_eq!(spinner.velocity(), 30.0);

        let changed = spinner.tick_n(100_000);
        assert!(changed < 100_000);
        assert_eq!(spinner.phase(), SpinPhase::Settled);
    }

    #[test]
    fn test_non_finite_velocity_is_settled() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(f64::NAN, 0);
        spinner.on_pointer_up();

        assert_eq!(spinner.phase(), SpinPhase::Settled);
        assert!(!spinner.tick());
        assert_eq!(spinner.tick_n(1000), 0);
    }

    #[test]
    fn test_spin_haptics_throttled() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);

        spinner.on_pointer_move(20.0, 1000); // first pulse
        spinner.on_pointer_move(40.0, 1050); // too soon
        spinner.on_pointer_move(60.0, 1100); // exactly 100ms: still too soon
        spinner.on_pointer_move(80.0, 1101); // pulse

        let spins: Vec<_> = spinner
            .haptics()
            .pulses
            .iter()
            .filter(|k| matches!(k, HapticKind::Spin { .. }))
            .collect();
        assert_eq!(spins.len(), 2);
        assert_eq!(spinner.state().last_haptic_emit_ms, Some(1101));
    }

    #[test]
    fn test_slow_drag_sends_no_spin_pulse() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(5.0, 1000);
        spinner.on_pointer_move(8.0, 2000);

        assert_eq!(spinner.haptics().pulses, vec![HapticKind::Light]);
        assert_eq!(spinner.state().last_haptic_emit_ms, None);
    }

    #[test]
    fn test_spin_pulse_carries_intensity() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(-35.0, 0);

        assert_eq!(
            spinner.haptics().pulses.last(),
            Some(&HapticKind::Spin { intensity: 35.0 })
        );
    }

    #[test]
    fn test_grab_pulses_once_per_press() {
        let mut spinner = Spinner::new(Recorder::default());
        for _ in 0..3 {
            spinner.on_pointer_down(0.0);
            spinner.on_pointer_move(2.0, 0);
            spinner.on_pointer_up();
        }
        let grabs = spinner
            .haptics()
            .pulses
            .iter()
            .filter(|k| **k == HapticKind::Light)
            .count();
        assert_eq!(grabs, 3);
    }

    #[test]
    fn test_haptic_failure_does_not_affect_motion() {
        let mut spinner = Spinner::new(Broken);
        spinner.on_pointer_down(10.0);
        spinner.on_pointer_move(40.0, 0);
        spinner.on_pointer_up();
        spinner.tick();

        assert!(approx(spinner.velocity(), 29.4));
        assert!(approx(spinner.rotation(), 60.0));
    }

    #[test]
    fn test_speed_readout() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(-2.5, 0);
        assert_eq!(spinner.speed(), 2);

        spinner.on_pointer_move(0.0, 0);
        assert_eq!(spinner.speed(), 3);

        spinner.on_pointer_move(-29.6, 0);
        assert_eq!(spinner.speed(), 30);
    }

    #[test]
    fn test_speed_just_below_half_rounds_down() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(0.49999999999999994, 0);
        assert_eq!(spinner.speed(), 0);

        spinner.on_pointer_move(0.0, 0);
        assert_eq!(spinner.speed(), 0);
    }

    #[test]
    fn test_handle_dispatches_events() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.handle(PointerEvent::Down { angle: 10.0 });
        spinner.handle(PointerEvent::Move { angle: 40.0, timestamp_ms: 5 });
        spinner.handle(PointerEvent::Up);

        assert!(!spinner.is_dragging());
        assert_eq!(spinner.velocity(), 30.0);
    }

    #[test]
    fn test_custom_stop_threshold() {
        let config = SpinnerConfig::default().with_stop_threshold(10.0);
        let mut spinner = Spinner::with_config(config, Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(10.0, 0);
        spinner.on_pointer_up();

        assert_eq!(spinner.phase(), SpinPhase::Settled);
        assert!(!spinner.tick());
    }

    #[test]
    fn test_tick_n_stops_when_settled() {
        let mut spinner = Spinner::new(Recorder::default());
        spinner.on_pointer_down(0.0);
        spinner.on_pointer_move(1.0, 0);
        spinner.on_pointer_up();

        let changed = spinner.tick_n(1000);
        assert!(changed > 0 && changed < 1000);
        assert_eq!(spinner.phase(), SpinPhase::Settled);
    }
}
