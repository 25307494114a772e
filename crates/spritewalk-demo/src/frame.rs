use std::sync::Arc;

use spritewalk_engine::assets::{AssetId, AssetStore};
use spritewalk_engine::coords::{ortho_projection, Rect, Viewport};
use spritewalk_engine::core::{AppControl, CancelToken};
use spritewalk_engine::scene::{DrawList, SpriteCmd, SpriteSizing};

use crate::scene::Scene;

/// Builds the draw list for one tick.
///
/// Order is fixed: clear, background at the origin sized to the viewport, then the
/// character at its position. A sprite whose image is not ready yet (or failed to
/// load) is left out.
pub fn build_frame(
    scene: &Scene,
    assets: &AssetStore,
    viewport: Viewport,
    sizing: SpriteSizing,
) -> DrawList {
    let viewport = viewport.at_least_one_px();
    let mut list = DrawList::new(ortho_projection(viewport));

    list.clear_to(scene.clear);

    push_sprite(
        &mut list,
        assets,
        scene.background_image,
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        sizing,
    );

    let pos = scene.character;
    push_sprite(
        &mut list,
        assets,
        scene.character_image,
        Rect::new(pos.x as f32, pos.y as f32, scene.character_size, scene.character_size),
        sizing,
    );

    list
}

fn push_sprite(
    list: &mut DrawList,
    assets: &AssetStore,
    id: AssetId,
    rect: Rect,
    sizing: SpriteSizing,
) {
    if let Some(image) = assets.image(id) {
        list.sprite(SpriteCmd::new(id, Arc::clone(image), rect, sizing));
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    /// Terminal.
    Stopped,
}

/// Tick gate for the render loop.
///
/// Every tick continues until the token is cancelled; after that every tick
/// returns `Exit`.
#[derive(Debug)]
pub struct FrameLoop {
    cancel: CancelToken,
    state: LoopState,
    ticks: u64,
}

impl FrameLoop {
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            cancel,
            state: LoopState::Running,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> AppControl {
        if self.state == LoopState::Running && self.cancel.is_cancelled() {
            log::info!("frame loop stopped after {} ticks", self.ticks);
            self.state = LoopState::Stopped;
        }

        match self.state {
            LoopState::Running => {
                self.ticks += 1;
                AppControl::Continue
            }
            LoopState::Stopped => AppControl::Exit,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
