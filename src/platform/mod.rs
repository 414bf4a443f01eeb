//=========================================================================
// Platform Subsystem
//
// Owns the OS window and runs the whole game on the Winit main thread.
//
// Architecture:
// ```text
//  Winit Event Loop
//   ├─ WindowEvent::* ──► InputProcessor ──► InputBuffer
//   │
//   └─ RedrawRequested (frame boundary)
//        ├─ drain InputBuffer ──► SceneManager::dispatch (each event)
//        ├─ SceneManager::tick(dt)
//        ├─ SceneManager::paint ──► FrameBuffer
//        ├─ present FrameBuffer through softbuffer
//        └─ apply config changes / honour exit requests
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input is applied in one batch,
//   in arrival order, before the frame's update
// - **Frame pacing from config**: vsync on waits for the next 60 Hz
//   deadline, vsync off polls and redraws continuously
// - **Software presentation**: scenes draw into a CPU FrameBuffer that is
//   copied into the softbuffer surface once per frame
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::*;
use softbuffer::{Context, SoftBufferError, Surface};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::GameConfig;
use crate::core::globals::GameContext;
use crate::core::render::FrameBuffer;
use crate::core::scene::SceneManager;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Neurocipher Reboot";

/// Frame interval when vsync pacing is on.
const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Upper bound on one frame's `dt`, so a stalled window does not fast
/// forward every timer.
const MAX_FRAME_DT: f32 = 0.25;

//=== PlatformError =======================================================

/// Window-system failures. All of them end the run.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The OS refused to open the window.
    WindowCreation(winit::error::OsError),

    /// The presentation surface could not be created or written.
    Surface(SoftBufferError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Surface(e) => write!(f, "Surface error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
            Self::WindowCreation(e) => Some(e),
            Self::Surface(e) => Some(e),
        }
    }
}

impl From<SoftBufferError> for PlatformError {
    fn from(e: SoftBufferError) -> Self {
        Self::Surface(e)
    }
}

//=== Platform ============================================================

/// Window, presentation surface and frame loop around one game session.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(ctx, scenes)`, no window yet
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Frames**: every `RedrawRequested` runs input → tick → paint → present
/// 4. **Shutdown**: window closed or exit requested → event loop exits
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Rc<Window>>,

    /// softbuffer surface bound to `window`.
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,

    /// CPU render target the scenes paint into.
    framebuffer: FrameBuffer,

    /// Input collected since the last frame.
    buffer: InputBuffer,

    /// Converts Winit events to InputEvents.
    input_processor: InputProcessor,

    ctx: GameContext,
    scenes: SceneManager,
    last_frame: Instant,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Wraps a ready game session. The window is created lazily in
    /// `resumed()`.
    pub fn new(ctx: GameContext, scenes: SceneManager) -> Self {
        let (width, height) = ctx.window_size();
        info!(target: "platform", "Platform subsystem initialized ({}x{})", width, height);
        Self {
            window: None,
            surface: None,
            framebuffer: FrameBuffer::new(width, height),
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            ctx,
            scenes,
            last_frame: Instant::now(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// terminates abnormally.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Frame ------------------------------------------------------------

    /// Applies buffered input, updates the scene and paints the frame.
    fn advance(&mut self, dt: f32) {
        if !self.buffer.is_empty() {
            trace!(target: "platform::input", "Dispatching {} events", self.buffer.len());
        }
        let events = self.buffer.drain();
        for event in &events {
            self.scenes.dispatch(event, &mut self.ctx);
        }

        self.scenes.tick(dt, &mut self.ctx);
        self.scenes.paint(&mut self.framebuffer, &self.ctx);
    }

    /// One full frame at the redraw boundary.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        self.advance(dt);

        if let Err(e) = self.present() {
            error!(target: "platform", "{}", e);
            event_loop.exit();
            return;
        }

        if let Some(config) = self.ctx.take_config_change() {
            self.apply_window_config(config);
        }
        if self.ctx.exit_requested() {
            info!(target: "platform", "Exit requested, closing event loop");
            event_loop.exit();
        }
    }

    /// Copies the frame buffer into the window surface.
    fn present(&mut self) -> Result<(), PlatformError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let (width, height) = self.ctx.window_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };

        surface.resize(width, height)?;
        let mut buffer = surface.buffer_mut()?;
        let pixels = self.framebuffer.pixels();
        if buffer.len() == pixels.len() {
            buffer.copy_from_slice(pixels);
        }
        buffer.present()?;
        Ok(())
    }

    //--- Window -----------------------------------------------------------

    fn window_attributes(config: &GameConfig) -> WindowAttributes {
        let fullscreen = config.fullscreen.then_some(Fullscreen::Borderless(None));
        WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false)
            .with_fullscreen(fullscreen)
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = event_loop
            .create_window(Self::window_attributes(&self.ctx.config))
            .map_err(PlatformError::WindowCreation)?;
        let window = Rc::new(window);

        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );
        self.resize(size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.surface = Some(surface);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!(target: "platform", "Resized to {}x{}", width, height);
        self.ctx.set_window_size(width, height);
        self.framebuffer.resize(width, height);
    }

    /// Re-applies size and fullscreen after the settings changed.
    fn apply_window_config(&mut self, config: GameConfig) {
        info!(target: "platform", "Applying window settings: {}x{}, fullscreen {}, vsync {}",
            config.width, config.height, config.fullscreen, config.vsync);

        let Some(window) = self.window.clone() else {
            self.resize(config.width, config.height);
            return;
        };

        window.set_fullscreen(config.fullscreen.then_some(Fullscreen::Borderless(None)));
        if !config.fullscreen {
            if let Some(size) = window.request_inner_size(PhysicalSize::new(config.width, config.height)) {
                self.resize(size.width, size.height);
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            error!(target: "platform", "{}", e);
            event_loop.exit();
        }
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.resize(size.width, size.height),

            WindowEvent::ModifiersChanged(state) => {
                self.input_processor.update_modifiers(state.state());
                trace!(
                    target: "platform::input",
                    "Modifiers changed: {:?}",
                    self.input_processor.current_modifiers()
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
                for text in self.input_processor.process_text(key_event) {
                    self.buffer.push_discrete(text);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    /// Schedules the next frame according to the vsync setting.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        if !self.ctx.config.vsync {
            event_loop.set_control_flow(ControlFlow::Poll);
            window.request_redraw();
            return;
        }

        let deadline = self.last_frame + FRAME_INTERVAL;
        if Instant::now() >= deadline {
            window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
