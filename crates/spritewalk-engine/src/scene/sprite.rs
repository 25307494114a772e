use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::assets::{AssetId, ImageData};
use crate::coords::{translation, Rect};
use crate::paint::Color;

/// How a sprite's requested rectangle maps onto the unit quad.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SpriteSizing {
    /// Translate the unit quad to the rectangle origin and ignore the requested
    /// size. Every sprite then covers the same `[-1, 1]` square around its origin.
    #[default]
    UnitQuad,
    /// Scale the unit quad to cover the requested rectangle exactly.
    Requested,
}

/// One textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    /// Texture identity; the renderer caches GPU textures by this id.
    pub image_id: AssetId,
    /// Pixels to upload the first time `image_id` is seen.
    pub image: Arc<ImageData>,
    /// Requested placement in logical pixels.
    pub rect: Rect,
    /// Model-view matrix applied to the quad corners.
    pub model_view: Mat4,
    /// Multiplied with the sampled texel.
    pub tint: Color,
}

impl SpriteCmd {
    pub fn new(image_id: AssetId, image: Arc<ImageData>, rect: Rect, sizing: SpriteSizing) -> Self {
        Self {
            image_id,
            image,
            rect,
            model_view: model_view(rect, sizing),
            tint: Color::WHITE,
        }
    }
}

/// Model-view matrix for a quad with corners at `(±1, ±1)`.
pub(crate) fn model_view(rect: Rect, sizing: SpriteSizing) -> Mat4 {
    match sizing {
        SpriteSizing::UnitQuad => translation(rect.origin.x, rect.origin.y),
        SpriteSizing::Requested => {
            let center = rect.center();
            let half = rect.size * 0.5;
            translation(center.x, center.y) * Mat4::from_scale(Vec3::new(half.x, half.y, 1.0))
        }
    }
}
