//! Haptic feedback collaborator.
//!
//! The spinner never talks to hardware. It hands a [`HapticKind`] to a
//! [`Haptics`] sink and ignores whatever comes back. Each kind carries two
//! descriptions of itself so a platform backend can pick what it supports:
//!
//! - [`HapticKind::native`] for devices with an impact/notification API
//! - [`HapticKind::vibration_pattern`] for plain vibration motors, as
//!   alternating on/off durations in milliseconds

use crate::error::HapticsError;

/// Strength of a native impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// Native notification feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Feedback as expressed to a native haptics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeFeedback {
    Impact(ImpactStyle),
    Notification(NotificationKind),
    SelectionChanged,
    /// Two light impacts back to back.
    DoubleImpact,
}

/// A discrete haptic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
    Success,
    Error,
    Selection,
    Double,
    /// Drag feedback scaled by spin speed in degrees per tick.
    Spin { intensity: f64 },
    Pop,
}

/// Longest vibration a spin pulse may request, in ms.
pub const MAX_SPIN_VIBRATION_MS: u32 = 20;

impl HapticKind {
    pub fn native(&self) -> NativeFeedback {
        match self {
            HapticKind::Light | HapticKind::Spin { .. } | HapticKind::Pop => {
                NativeFeedback::Impact(ImpactStyle::Light)
            }
            HapticKind::Medium => NativeFeedback::Impact(ImpactStyle::Medium),
            HapticKind::Heavy => NativeFeedback::Impact(ImpactStyle::Heavy),
            HapticKind::Success => NativeFeedback::Notification(NotificationKind::Success),
            HapticKind::Error => NativeFeedback::Notification(NotificationKind::Error),
            HapticKind::Selection => NativeFeedback::SelectionChanged,
            HapticKind::Double => NativeFeedback::DoubleImpact,
        }
    }

    /// Vibration fallback: on/off durations in milliseconds.
    pub fn vibration_pattern(&self) -> Vec<u32> {
        match self {
            HapticKind::Light => vec![10],
            HapticKind::Medium => vec![20],
            HapticKind::Heavy => vec![30],
            HapticKind::Success => vec![10, 50, 10],
            HapticKind::Error => vec![30, 50, 30, 50, 30],
            HapticKind::Selection => vec![15],
            HapticKind::Double => vec![10, 30, 10],
            HapticKind::Spin { intensity } => vec![spin_vibration_ms(*intensity)],
            HapticKind::Pop => vec![8],
        }
    }
}

/// One tenth of the intensity, floored and capped.
fn spin_vibration_ms(intensity: f64) -> u32 {
    let ms = (intensity.abs() / 10.0).floor();
    if ms.is_finite() {
        (ms as u32).min(MAX_SPIN_VIBRATION_MS)
    } else {
        0
    }
}

/// Anything that can deliver haptic pulses.
///
/// Implementations should be quick and must not panic. Errors are reported
/// to the caller, which is free to drop them.
pub trait Haptics {
    fn pulse(&mut self, kind: HapticKind) -> Result<(), HapticsError>;
}

impl<H: Haptics + ?Sized> Haptics for &mut H {
    fn pulse(&mut self, kind: HapticKind) -> Result<(), HapticsError> {
        (**self).pulse(kind)
    }
}

impl<H: Haptics + ?Sized> Haptics for Box<H> {
    fn pulse(&mut self, kind: HapticKind) -> Result<(), HapticsError> {
        (**self).pulse(kind)
    }
}

/// Discards every pulse.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _kind: HapticKind) -> Result<(), HapticsError> {
        Ok(())
    }
}

/// Writes every pulse to the log at debug level.
///
/// Stands in for hardware on desktops.
#[derive(Debug, Default, Clone)]
pub struct LogHaptics {
    pulses: u64,
}

impl LogHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pulses delivered so far.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }
}

impl Haptics for LogHaptics {
    fn pulse(&mut self, kind: HapticKind) -> Result<(), HapticsError> {
        self.pulses += 1;
        log::debug!(
            "haptic pulse #{}: {:?} native={:?} vibrate={:?}",
            self.pulses,
            kind,
            kind.native(),
            kind.vibration_pattern()
        );
        Ok(())
    }
}
