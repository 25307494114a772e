use spritewalk_engine::assets::AssetStore;
use spritewalk_engine::coords::Viewport;
use spritewalk_engine::core::{App, AppControl, CancelToken, FrameCtx};
use spritewalk_engine::input::InputEvent;
use spritewalk_engine::render::{ProgramSource, RenderCtx, SpriteRenderer};

use crate::config::DemoConfig;
use crate::frame::{build_frame, FrameLoop};
use crate::scene::Scene;

pub struct DemoApp {
    config: DemoConfig,
    assets: AssetStore,
    scene: Scene,
    frame_loop: FrameLoop,

    /// Projection viewport, fixed at the first frame.
    viewport: Option<Viewport>,
    renderer: Option<SpriteRenderer>,
}

impl DemoApp {
    /// Starts loading both images and places the character at its start position.
    pub fn new(config: DemoConfig, cancel: CancelToken) -> Self {
        let mut assets = AssetStore::new();
        let background = assets.load(config.background_path.clone());
        let character = assets.load(config.character_path.clone());
        let scene = Scene::new(&config, background, character);

        Self {
            config,
            assets,
            scene,
            frame_loop: FrameLoop::new(cancel),
            viewport: None,
            renderer: None,
        }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl App for DemoApp {
    fn on_start(&mut self, ctx: &RenderCtx<'_>) {
        self.viewport = Some(ctx.viewport);
        self.renderer = Some(SpriteRenderer::new(ctx, ProgramSource::SPRITE));
        log::info!(
            "viewport latched at {}x{}",
            ctx.viewport.width,
            ctx.viewport.height
        );
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        if let Some(key) = event.pressed_key() {
            if self.scene.handle_key(key) {
                let pos = self.scene.character;
                log::trace!("character moved to ({}, {})", pos.x, pos.y);
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.frame_loop.tick() == AppControl::Exit {
            return AppControl::Exit;
        }

        self.assets.poll();

        let viewport = *self
            .viewport
            .get_or_insert_with(|| ctx.window.viewport().at_least_one_px());
        let draw_list = build_frame(&self.scene, &self.assets, viewport, self.config.sizing);

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        ctx.render(|rctx, target| renderer.render(rctx, target, &draw_list))
    }
}
