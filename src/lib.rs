//! # fidget-spin
//!
//! Motion engine for a draggable fidget spinner: pointer drags set the spin,
//! a fixed-rate tick lets it coast and slow down, and drag speed is turned
//! into throttled haptic pulses.
//!
//! Rendering and haptic hardware stay outside the crate. The spinner reports
//! a rotation angle and a speed, and hands pulses to any [`Haptics`] sink.
//!
//! ## Quick Start
//!
//! ```
//! use fidget_spin::prelude::*;
//!
//! let mut spinner = Spinner::new(NoHaptics);
//!
//! // Drag from 10° to 40° and let go.
//! spinner.on_pointer_down(10.0);
//! spinner.on_pointer_move(40.0, 0);
//! spinner.on_pointer_up();
//! assert_eq!(spinner.velocity(), 30.0);
//!
//! // One 16ms tick later it has coasted another 30° and slowed by 2%.
//! spinner.tick();
//! assert!((spinner.rotation() - 60.0).abs() < 1e-9);
//! assert!((spinner.velocity() - 29.4).abs() < 1e-9);
//! ```
//!
//! ## Designs
//!
//! | Design | Friction |
//! |--------|----------|
//! | [`SpinnerDesign::Classic`] | 0.98 |
//! | [`SpinnerDesign::Galaxy`] | 0.99 |
//! | [`SpinnerDesign::Ninja`] | 0.96 |
//! | [`SpinnerDesign::Flower`] | 0.985 |
//! | [`SpinnerDesign::Spectrum`] | 0.99 |
//!
//! Switching design resets rotation and velocity to zero.
//!
//! ## Driving the tick
//!
//! [`TickClock`] converts wall-clock time into a count of due ticks at the
//! configured interval (16 ms by default). The demo in [`window`] shows the
//! whole loop with winit.

pub mod config;
pub mod design;
pub mod error;
pub mod haptics;
pub mod input;
pub mod spinner;
pub mod time;
pub mod window;

pub use config::SpinnerConfig;
pub use design::{DesignDescriptor, SpinnerDesign};
pub use error::{AppError, ConfigError, HapticsError};
pub use glam::DVec2;
pub use haptics::{HapticKind, Haptics, LogHaptics, NoHaptics};
pub use input::{normalize_delta, pointer_angle, PointerEvent, PointerTracker, Rect};
pub use spinner::{SpinPhase, Spinner, SpinnerState};
pub use time::TickClock;

/// Convenient re-exports for common usage.
///
/// ```
/// use fidget_spin::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SpinnerConfig;
    pub use crate::design::SpinnerDesign;
    pub use crate::haptics::{HapticKind, Haptics, LogHaptics, NoHaptics};
    pub use crate::input::{pointer_angle, PointerEvent, PointerTracker, Rect};
    pub use crate::spinner::{SpinPhase, Spinner, SpinnerState};
    pub use crate::time::TickClock;
    pub use crate::DVec2;
}
