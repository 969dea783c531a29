//! Desktop demo: a spinner driven by real mouse and touch input.
//!
//! There is no renderer. The window title shows the rotation and speed,
//! and haptic pulses go to the log (`RUST_LOG=debug` to see them).
//!
//! Keys: `1`-`5` pick a design, `Tab` cycles designs, `Esc` quits.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SpinnerConfig;
use crate::design::SpinnerDesign;
use crate::error::AppError;
use crate::haptics::{HapticKind, LogHaptics};
use crate::input::PointerTracker;
use crate::spinner::Spinner;
use crate::time::TickClock;

const WINDOW_SIZE: f64 = 480.0;

/// Open the demo window and run until it is closed.
pub fn run(config: SpinnerConfig) -> Result<(), AppError> {
    config.validate()?;
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    spinner: Spinner<LogHaptics>,
    tracker: PointerTracker,
    clock: TickClock,
    title: String,
}

impl App {
    fn new(config: SpinnerConfig) -> Self {
        let clock = TickClock::new(config.tick_interval()).with_max_catch_up(config.max_catch_up_ticks);
        Self {
            window: None,
            spinner: Spinner::with_config(config, LogHaptics::new()),
            tracker: PointerTracker::new(),
            clock,
            title: String::new(),
        }
    }

    fn select_design(&mut self, design: SpinnerDesign) {
        self.spinner.set_design(design);
        self.spinner.emit(HapticKind::Selection);
        log::info!("{}: {}", design, design.tagline());
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let design_index = match code {
            KeyCode::Digit1 => Some(0),
            KeyCode::Digit2 => Some(1),
            KeyCode::Digit3 => Some(2),
            KeyCode::Digit4 => Some(3),
            KeyCode::Digit5 => Some(4),
            KeyCode::Tab => {
                self.select_design(self.spinner.design().next());
                None
            }
            KeyCode::Escape => {
                event_loop.exit();
                None
            }
            _ => None,
        };
        if let Some(design) = design_index.and_then(SpinnerDesign::from_index) {
            self.select_design(design);
        }
    }

    fn refresh_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let title = format!(
            "{} spinner | {:>3.0}° | speed {}",
            self.spinner.design(),
            self.spinner.rotation().rem_euclid(360.0),
            self.spinner.speed()
        );
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.clock.resume(Instant::now());
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("fidget-spin")
            .with_inner_size(LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.tracker.set_window_size(size.width, size.height);
                self.window = Some(Arc::new(window));
                self.refresh_title();
                log::info!("spinner ready: drag inside the window to spin");
            }
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.clock.pause(Instant::now());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let now = Instant::now();
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. } => {
                self.handle_key(event_loop, key);
            }
            WindowEvent::Occluded(true) => self.clock.pause(now),
            WindowEvent::Occluded(false) => self.clock.resume(now),
            _ => {}
        }

        if let Some(pointer) = self.tracker.handle_event(&event, self.clock.elapsed_ms(now)) {
            self.spinner.handle(pointer);
        }
        self.refresh_title();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let due = self.clock.advance(Instant::now());
        if self.spinner.tick_n(due) > 0 {
            self.refresh_title();
        }
        // Paused clocks have no deadline; sleep until an event arrives.
        let flow = match self.clock.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }
}
