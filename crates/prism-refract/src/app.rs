use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use prism_engine::assets::FsAssetLoader;
use prism_engine::core::{App, AppControl, FrameCtx, InitCtx, ResizeCtx};
use prism_engine::render::GpuRenderer;
use prism_engine::scene::DefaultUniforms;
use prism_engine::time::FpsCounter;
use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::frame::{run_frame, FrameInput};
use crate::{initialize, resize, RenderContext, SceneConfig};

/// Window-hosted refraction scene.
///
/// Assets are read relative to `asset_root`. Initialization blocks the
/// window's first frame until both the backdrop and the model are loaded.
pub struct RefractionApp {
    config: SceneConfig,
    loader: FsAssetLoader,
    renderer: Option<GpuRenderer>,
    session: Option<RenderContext>,
    fps: FpsCounter,
}

impl RefractionApp {
    pub fn new(config: SceneConfig, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            loader: FsAssetLoader::new(asset_root),
            renderer: None,
            session: None,
            fps: FpsCounter::new(Duration::from_secs(1)),
        }
    }
}

impl App for RefractionApp {
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<()> {
        let mut renderer = GpuRenderer::new(ctx.gpu);
        let session = pollster::block_on(initialize(
            &self.loader,
            &mut renderer,
            &self.config,
            ctx.viewport,
            DefaultUniforms::default(),
        ))
        .context("failed to initialize the refraction scene")?;

        log::info!(
            "scene ready: {} nodes, target {:?}",
            session.scene.len(),
            session.env_target.size()
        );
        self.renderer = Some(renderer);
        self.session = Some(session);
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut ResizeCtx<'_, '_>) -> anyhow::Result<()> {
        if let (Some(renderer), Some(session)) = (self.renderer.as_mut(), self.session.as_mut()) {
            resize(session, renderer, ctx.viewport)?;
        }
        Ok(())
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(session) = self.session.as_mut() {
                session.dispose();
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl> {
        let (Some(renderer), Some(session)) = (self.renderer.as_mut(), self.session.as_mut()) else {
            return Ok(AppControl::Continue);
        };

        if let Some(fps) = self.fps.record(ctx.time.now) {
            log::debug!("{fps:.1} fps");
        }

        let frame = FrameInput {
            dt: ctx.time.dt,
            defaults: ctx.defaults,
            input: ctx.input,
            input_frame: ctx.input_frame,
        };
        let control = ctx.render(renderer, |r| run_frame(session, r, frame))?;
        Ok(control)
    }
}
