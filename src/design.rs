//! Spinner designs.
//!
//! Each design is a visual variant with its own friction. Picking a design
//! is a hard reset of the spinner (see [`Spinner::set_design`]).
//!
//! [`Spinner::set_design`]: crate::Spinner::set_design

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The available spinner designs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerDesign {
    /// Three arms around a hub.
    #[default]
    Classic,
    /// Orbits, stars and planets. Coasts the longest.
    Galaxy,
    /// Four blades. Stops quickly.
    Ninja,
    /// Eight petals.
    Flower,
    /// Prism rings around a rainbow core.
    Spectrum,
}

/// What a renderer needs to present a design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignDescriptor {
    pub name: &'static str,
    pub tagline: &'static str,
    pub friction: f64,
}

impl SpinnerDesign {
    /// Every design, in selector order.
    pub const ALL: [SpinnerDesign; 5] = [
        SpinnerDesign::Classic,
        SpinnerDesign::Galaxy,
        SpinnerDesign::Ninja,
        SpinnerDesign::Flower,
        SpinnerDesign::Spectrum,
    ];

    /// Per-tick multiplicative velocity decay.
    pub fn friction(self) -> f64 {
        match self {
            SpinnerDesign::Classic => 0.98,
            SpinnerDesign::Galaxy => 0.99,
            SpinnerDesign::Ninja => 0.96,
            SpinnerDesign::Flower => 0.985,
            SpinnerDesign::Spectrum => 0.99,
        }
    }

    /// Lowercase identifier, also used in config files.
    pub fn name(self) -> &'static str {
        match self {
            SpinnerDesign::Classic => "classic",
            SpinnerDesign::Galaxy => "galaxy",
            SpinnerDesign::Ninja => "ninja",
            SpinnerDesign::Flower => "flower",
            SpinnerDesign::Spectrum => "spectrum",
        }
    }

    /// Short line shown under the spinner.
    pub fn tagline(self) -> &'static str {
        match self {
            SpinnerDesign::Classic => "The original!",
            SpinnerDesign::Galaxy => "Smooth like space!",
            SpinnerDesign::Ninja => "Fast and sharp!",
            SpinnerDesign::Flower => "Pretty petals!",
            SpinnerDesign::Spectrum => "All the colors!",
        }
    }

    pub fn descriptor(self) -> DesignDescriptor {
        DesignDescriptor {
            name: self.name(),
            tagline: self.tagline(),
            friction: self.friction(),
        }
    }

    /// The design after this one, wrapping around.
    pub fn next(self) -> SpinnerDesign {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Design by 0-based selector position.
    pub fn from_index(index: usize) -> Option<SpinnerDesign> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for SpinnerDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown design name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDesign(pub String);

impl fmt::Display for UnknownDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown spinner design: {}", self.0)
    }
}

impl std::error::Error for UnknownDesign {}

impl FromStr for SpinnerDesign {
    type Err = UnknownDesign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name() == lower)
            .ok_or_else(|| UnknownDesign(s.to_string()))
    }
}
