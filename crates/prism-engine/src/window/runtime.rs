use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{default_uniforms, App as CoreApp, AppControl, FrameCtx, InitCtx, ResizeCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app.init` to completion, then drives frames
    /// until the window closes or the app exits.
    ///
    /// The first fatal error (GPU setup, init, resize or frame) ends the loop
    /// and is returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let app = &mut self.app;
        entry
            .with_mut(|fields| {
                let window = WindowCtx { id: fields.window.id(), window: fields.window };
                let viewport = window.viewport();
                let mut ctx = InitCtx { window, gpu: &*fields.gpu, viewport };
                app.init(&mut ctx)
            })
            .context("application initialization failed")?;

        // Time spent loading must not show up as the first frame's delta.
        entry.with_clock_mut(|clock| clock.reset());
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) -> Result<()> {
        let Some(entry) = self.entry.as_mut() else { return Ok(()) };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            fields.gpu.resize(new_size);
            if new_size.width == 0 || new_size.height == 0 {
                log::debug!("ignoring zero-sized resize");
                return Ok(());
            }
            let window = WindowCtx { id: fields.window.id(), window: fields.window };
            let viewport = window.viewport();
            log::debug!(
                "resize to {}x{} @ {}",
                viewport.width,
                viewport.height,
                viewport.scale_factor
            );
            let mut ctx = ResizeCtx { window, gpu: &*fields.gpu, viewport };
            app.on_resize(&mut ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        Ok(())
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let Some(entry) = self.entry.as_mut() else { return Ok(AppControl::Continue) };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();
            let window = WindowCtx { id: fields.window.id(), window: fields.window };
            let viewport = window.viewport();
            let defaults = default_uniforms(&ft, viewport, fields.input_state);

            // Scope to ensure `ctx` is dropped before mutating frame state.
            let control = {
                let mut ctx = FrameCtx {
                    window,
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time: ft,
                    viewport,
                    defaults,
                };
                app.on_frame(&mut ctx)
            };

            // Clear per-frame deltas after the frame is consumed.
            fields.input_frame.clear();
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }
        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw: the model animates every frame.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return };

        let exit_from_app_event = entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window.scale_factor(), fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            app.on_window_event(window_id, &event) == AppControl::Exit
        });

        if exit_from_app_event {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Err(e) = self.resize(*new_size) {
                    self.fail(event_loop, e.context("resize failed"));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(size) = new_size {
                    if let Err(e) = self.resize(size) {
                        self.fail(event_loop, e.context("resize failed"));
                    }
                }
            }

            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => {
                    self.exit_requested = true;
                    event_loop.exit();
                }
                Err(e) => self.fail(event_loop, e.context("frame failed")),
            },

            _ => {}
        }
    }
}
