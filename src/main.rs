use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    event::*,
    event_loop::EventLoop,
    window::{CursorGrabMode, Window},
};

// Import from the library crate
use walker::{
    controller::input::native::{key_event_to_input, mouse_button_to_input, mouse_motion_to_input},
    logging,
    view::{LogSink, TitleSink},
    Camera, ControlRequest, ControllerConfig, FirstPersonController, FrameLoopContext, InputEvent,
};

const TITLE: &str = "walker";

#[derive(Parser, Debug)]
#[command(name = "walker", about = "First-person walking controller demo")]
struct Args {
    /// RON file with controller settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override mouse sensitivity (radians per pixel)
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Override walking speed (distance per reference frame)
    #[arg(long)]
    speed: Option<f32>,
}

impl Args {
    fn controller_config(&self) -> anyhow::Result<ControllerConfig> {
        let mut config = match &self.config {
            Some(path) => ControllerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ControllerConfig::default(),
        };
        if let Some(sensitivity) = self.sensitivity {
            config.sensitivity = sensitivity;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        config.validate()?;
        Ok(config)
    }
}

struct App {
    window: Arc<Window>,
    controller: Rc<RefCell<FirstPersonController>>,
    frame: FrameLoopContext<TitleSink<LogSink>>,
    started: Instant,
}

impl App {
    fn new(window: Arc<Window>, config: ControllerConfig) -> Self {
        let size = window.inner_size();
        let controller = Rc::new(RefCell::new(FirstPersonController::new(config)));
        let sink = TitleSink::new(window.clone(), TITLE, LogSink::new(Camera::new(size.width, size.height)));
        let frame = FrameLoopContext::new(controller.clone(), sink);
        Self { window, controller, frame, started: Instant::now() }
    }

    /// Feed an event to the controller and carry out whatever it asks for.
    fn dispatch(&mut self, event: InputEvent) {
        let request = self.controller.borrow_mut().handle_event(&event);
        match request {
            Some(ControlRequest::CapturePointer) => self.set_pointer_locked(true),
            Some(ControlRequest::ReleasePointer) => self.set_pointer_locked(false),
            None => {}
        }
    }

    fn set_pointer_locked(&mut self, locked: bool) {
        let grabbed = if locked {
            // X11 has no Locked mode; Confined still yields raw device deltas
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab failed: {e}");
            return;
        }
        self.window.set_cursor_visible(!locked);
        self.controller
            .borrow_mut()
            .handle_event(&InputEvent::PointerLockChanged { locked });
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = key_event_to_input(event) {
                    self.dispatch(input);
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(input) = mouse_button_to_input(*button, *state) {
                    self.dispatch(input);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.dispatch(InputEvent::FocusLost);
                self.set_pointer_locked(false);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        self.frame.update(now_ms);
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();
    let config = args.controller_config()?;
    tracing::info!(?config, "starting walker");

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title(TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = App::new(window, config);

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::RedrawRequested => app.update(),
                        _ => {}
                    }
                }
            }
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta }, .. } => {
                app.dispatch(mouse_motion_to_input(delta));
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}
