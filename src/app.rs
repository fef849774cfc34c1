//! Window, event loop and the fixed-rate frame loop driving the viewer

use log::{error, info};
use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::ViewerError,
    gfx::RenderEngine,
    pacing::FramePacer,
    view::{InputEvent, InputOutcome, InputTranslator, ViewController, ViewState},
};

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Running,
    /// Terminal; no further events are applied and nothing is rendered
    Terminated,
}

/// The windowing-independent half of the loop: view state plus its lifecycle
pub struct FrameLoop {
    phase: LoopPhase,
    view: ViewState,
    controller: ViewController,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Running,
            view: ViewState::new(),
            controller: ViewController::new(),
        }
    }

    /// Applies one input event, returning the phase afterwards
    pub fn apply(&mut self, event: &InputEvent) -> LoopPhase {
        if self.phase == LoopPhase::Terminated {
            return self.phase;
        }
        if self.controller.process_event(event, &mut self.view) == InputOutcome::Quit {
            info!("Quit requested");
            self.phase = LoopPhase::Terminated;
        }
        self.phase
    }

    /// Stops the loop without a quit event, e.g. after a fatal error
    pub fn terminate(&mut self) {
        self.phase = LoopPhase::Terminated;
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

/// The viewer application: one window, one cube, a fixed-rate frame loop
pub struct ViewerApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    // Dropped before the window it renders into
    render_engine: Option<RenderEngine>,
    window: Option<Arc<Window>>,
    frame_loop: FrameLoop,
    translator: InputTranslator,
    pacer: FramePacer,
    fatal: Option<ViewerError>,
}

impl ViewerApp {
    /// Creates the event loop; the window and GPU context follow on the first resume
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let event_loop = EventLoop::new()?;
        let pacer = FramePacer::new(config.target_fps, Instant::now());

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                render_engine: None,
                window: None,
                frame_loop: FrameLoop::new(),
                translator: InputTranslator::new(),
                pacer,
                fatal: None,
            },
        })
    }

    /// Runs until the user quits or a fatal error occurs
    pub fn run(self) -> Result<(), ViewerError> {
        let ViewerApp {
            event_loop,
            mut app_state,
        } = self;

        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut app_state)?;

        match app_state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Consumes the pacer's frame slot and reports whether there is anything to draw
///
/// A minimized (zero-sized) window still uses up its slot, so the loop keeps
/// sleeping until the next deadline instead of spinning.
fn start_frame(pacer: &mut FramePacer, size: PhysicalSize<u32>, now: Instant) -> bool {
    pacer.frame_started(now);
    size.width > 0 && size.height > 0
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        error!("{}", err);
        self.fatal = Some(err);
        self.frame_loop.terminate();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            return;
        }
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if !start_frame(&mut self.pacer, window.inner_size(), Instant::now()) {
            return;
        }
        if let Err(err) = render_engine.render_frame(self.frame_loop.view()) {
            self.fail(event_loop, err.into());
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let config = &self.config;
        let renderer =
            pollster::block_on(async move { RenderEngine::new(window, config, width, height).await });

        match renderer {
            Ok(renderer) => {
                info!("Viewer ready at {}x{}", width, height);
                self.render_engine = Some(renderer);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.frame_loop.is_running() {
            return;
        }

        if let Some(input) = self.translator.translate(&event) {
            if self.frame_loop.apply(&input) == LoopPhase::Terminated {
                event_loop.exit();
                return;
            }
        }

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            return;
        }
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if self.pacer.is_due(Instant::now()) {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
        }
    }
}
