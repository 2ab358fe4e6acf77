use std::num::NonZeroU32;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorIcon, Window, WindowId};

use crate::canvas::FrameBuffer;
use crate::config::Config;
use crate::editor::Editor;
use crate::error::InitError;
use crate::input::{InputEvent, winit_input};
use crate::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use crate::tools::{CursorKind, CursorState};

mod canvas;
mod config;
mod editor;
mod error;
mod export;
mod glyphs;
mod grid;
mod input;
mod plan;
mod renderer;
mod scaler;
mod status;
mod things;
mod tools;
mod walls;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    editor: Editor,

    // Fixed-size plan canvas, stretched to whatever the window is
    canvas: FrameBuffer,
    scale_lut: ScaleLut,

    started: Instant,
    next_frame: Instant,
    applied_cursor: Option<CursorState>,
    init_error: Option<InitError>,
}

impl App {
    fn new(config: &Config) -> Self {
        let (w, h) = config.canvas_size();
        Self {
            window: None,
            surface: None,
            editor: Editor::new(config),
            canvas: FrameBuffer::new(w, h),
            scale_lut: ScaleLut::empty(),
            started: Instant::now(),
            next_frame: Instant::now(),
            applied_cursor: None,
            init_error: None,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        info!("Opening window.");
        let attributes = Window::default_attributes()
            .with_title("_BASILISK_")
            .with_inner_size(LogicalSize::new(
                self.canvas.width as f64,
                self.canvas.height as f64,
            ));
        let window = Rc::new(event_loop.create_window(attributes)?);

        info!("Creating framebuffer surface.");
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_lut(&mut self, dw: usize, dh: usize) {
        self.scale_lut = build_scale_lut(dw, dh, self.canvas.width, self.canvas.height);
    }

    fn redraw(&mut self) -> Result<(), softbuffer::SoftBufferError> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);
        surface.resize(width, height)?;
        if !self.scale_lut.matches(dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.canvas.width, self.canvas.height);
        }

        let ticks = self.started.elapsed().as_millis() as u64;
        self.editor.draw(&mut self.canvas, ticks);

        let mut buf = surface.buffer_mut()?;
        blit_nearest_stretch(&mut buf, dw, &self.canvas.pixels, self.canvas.width, &self.scale_lut);
        buf.present()
    }

    fn apply_cursor(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let wanted = self.editor.cursor;
        if self.applied_cursor == Some(wanted) {
            return;
        }
        window.set_cursor(match wanted.kind {
            CursorKind::Arrow => CursorIcon::Default,
            CursorKind::Text => CursorIcon::Text,
        });
        window.set_cursor_visible(wanted.visible);
        self.applied_cursor = Some(wanted);
    }

    fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => winit_input::key(logical_key).map(InputEvent::Key),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => winit_input::button(*button).map(InputEvent::MouseDown),
            WindowEvent::CursorMoved { position, .. } => {
                let [x, y] = self.scale_lut.window_to_canvas(position.x, position.y);
                Some(InputEvent::MouseMove { x, y })
            }
            WindowEvent::Focused(focused) => Some(InputEvent::Focus(*focused)),
            WindowEvent::Occluded(hidden) => Some(InputEvent::Occluded(*hidden)),
            _ => None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.open_window(event_loop) {
            self.init_error = Some(e);
            event_loop.exit();
            return;
        }
        self.apply_cursor();
        info!("All okay.");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != id) {
            return;
        }
        match event {
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    error!("frame dropped: {e}");
                }
            }
            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            other => {
                if let Some(input) = self.translate(&other) {
                    self.editor.handle(input);
                }
                if !self.editor.is_running() {
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_cursor();

        // All pending events are handled; draw once the frame delay is up.
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame = now + self.editor.end_frame();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.init_error.is_none() {
            info!("Freeing memory now.");
            self.editor.shutdown();
        }
    }
}

fn run(config: &Config) -> Result<(), InitError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info,basilisk=debug".into()))
        .init();

    let config = Config::from_env();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        cell_scale = config.cell_scale,
        columns = config.columns,
        rows = config.rows,
        "This is Basilisk"
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
