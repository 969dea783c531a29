//! Pointer input for spinner widgets.
//!
//! Turns raw window events into [`PointerEvent`]s carrying the pointer angle
//! around the widget center, in degrees.
//!
//! Angles use screen coordinates (y grows downward), so a clockwise drag on
//! screen produces a positive delta.
//!
//! # Usage
//!
//! ```ignore
//! let mut tracker = PointerTracker::new();
//! tracker.set_window_size(800, 600);
//!
//! // In the window event handler:
//! if let Some(event) = tracker.handle_event(&event, clock.elapsed_ms(Instant::now())) {
//!     spinner.handle(event);
//! }
//! ```

use glam::DVec2;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

/// Axis-aligned widget bounds in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Self { origin, size }
    }

    /// A rect at the window origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size * 0.5
    }

    /// True when the rect has no area to measure an angle in.
    pub fn is_degenerate(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::from_size(800.0, 600.0)
    }
}

/// Angle of `pointer` around the center of `rect`, in degrees within (-180, 180].
///
/// A zero-area rect yields 0.
pub fn pointer_angle(pointer: DVec2, rect: Rect) -> f64 {
    if rect.is_degenerate() {
        return 0.0;
    }
    let d = pointer - rect.center();
    let angle = d.y.atan2(d.x).to_degrees();
    if !angle.is_finite() {
        0.0
    } else if angle <= -180.0 {
        180.0
    } else {
        angle
    }
}

/// Fold an angle difference into (-180, 180].
///
/// `atan2` jumps from 180 to -180 when the pointer crosses the negative x
/// axis; without this, a small drag across it reads as a full turn.
pub fn normalize_delta(delta: f64) -> f64 {
    if delta > 180.0 && delta <= 540.0 {
        delta - 360.0
    } else if delta <= -180.0 && delta > -540.0 {
        delta + 360.0
    } else if delta > -180.0 && delta <= 180.0 {
        delta
    } else {
        // Only reachable with angles outside (-180, 180].
        let wrapped = delta.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }
}

/// A pointer sample for the spinner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { angle: f64 },
    Move { angle: f64, timestamp_ms: u64 },
    /// Release or cancel.
    Up,
}

/// Where the active drag comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// Single-pointer drag tracking over window events.
///
/// The first mouse or touch press owns the drag until it ends; other
/// sources are ignored meanwhile.
#[derive(Debug)]
pub struct PointerTracker {
    rect: Rect,
    // Follow the window size until a widget rect is set explicitly.
    rect_follows_window: bool,
    cursor: Option<DVec2>,
    active: Option<PointerSource>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            rect: Rect::default(),
            rect_follows_window: true,
            cursor: None,
            active: None,
        }
    }

    /// Use a fixed widget rect instead of the whole window.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.rect_follows_window = false;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Update window size; the widget rect tracks it unless one was set.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        if self.rect_follows_window {
            self.rect = Rect::from_size(width as f64, height as f64);
        }
    }

    /// Which source currently owns the drag.
    pub fn active(&self) -> Option<PointerSource> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent, now_ms: u64) -> Option<PointerEvent> {
        match event {
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
                None
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let pos = self.cursor.unwrap_or_else(|| self.rect.center());
                    self.press(PointerSource::Mouse, pos)
                }
                ElementState::Released => self.release(PointerSource::Mouse),
            },

            WindowEvent::CursorMoved { position, .. } => {
                self.motion(PointerSource::Mouse, DVec2::new(position.x, position.y), now_ms)
            }

            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                let source = PointerSource::Touch(*id);
                let pos = DVec2::new(location.x, location.y);
                match phase {
                    TouchPhase::Started => self.press(source, pos),
                    TouchPhase::Moved => self.motion(source, pos, now_ms),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.release(source),
                }
            }

            // The release may never arrive once focus is gone.
            WindowEvent::Focused(false) => self.cancel(),

            _ => None,
        }
    }

    pub(crate) fn press(&mut self, source: PointerSource, pos: DVec2) -> Option<PointerEvent> {
        if source == PointerSource::Mouse {
            self.cursor = Some(pos);
        }
        if self.active.is_some() {
            return None;
        }
        self.active = Some(source);
        Some(PointerEvent::Down {
            angle: pointer_angle(pos, self.rect),
        })
    }

    pub(crate) fn motion(&mut self, source: PointerSource, pos: DVec2, now_ms: u64) -> Option<PointerEvent> {
        if source == PointerSource::Mouse {
            self.cursor = Some(pos);
        }
        if self.active != Some(source) {
            return None;
        }
        Some(PointerEvent::Move {
            angle: pointer_angle(pos, self.rect),
            timestamp_ms: now_ms,
        })
    }

    pub(crate) fn release(&mut self, source: PointerSource) -> Option<PointerEvent> {
        if self.active != Some(source) {
            return None;
        }
        self.active = None;
        Some(PointerEvent::Up)
    }

    pub(crate) fn cancel(&mut self) -> Option<PointerEvent> {
        self.active.take().map(|_| PointerEvent::Up)
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
