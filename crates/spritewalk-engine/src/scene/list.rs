use glam::Mat4;

use super::{DrawCmd, SpriteCmd};
use crate::paint::Color;

/// Recorded draw stream for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    projection: Mat4,
    items: Vec<DrawCmd>,
}

impl DrawList {
    /// Creates an empty list drawn with `projection`.
    pub fn new(projection: Mat4) -> Self {
        Self {
            projection,
            items: Vec::new(),
        }
    }

    /// Clears recorded items and replaces the projection. Keeps allocated capacity.
    pub fn reset(&mut self, projection: Mat4) {
        self.projection = projection;
        self.items.clear();
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    #[inline]
    pub fn clear_to(&mut self, color: Color) {
        self.push(DrawCmd::Clear(color));
    }

    #[inline]
    pub fn sprite(&mut self, cmd: SpriteCmd) {
        self.push(DrawCmd::Sprite(cmd));
    }

    /// Color of the last `Clear` command, if any.
    ///
    /// A clear discards everything before it, so only the last one matters.
    pub fn clear_color(&self) -> Option<Color> {
        self.items.iter().rev().find_map(|cmd| match cmd {
            DrawCmd::Clear(c) => Some(*c),
            _ => None,
        })
    }

    /// Sprites painted after the last clear, in paint order.
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteCmd> {
        let start = self
            .items
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCmd::Clear(_)))
            .map_or(0, |i| i + 1);

        self.items[start..].iter().filter_map(|cmd| match cmd {
            DrawCmd::Sprite(s) => Some(s),
            _ => None,
        })
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assets::{AssetStore, ImageData};
    use crate::coords::Rect;
    use crate::scene::SpriteSizing;

    fn sprite(store: &mut AssetStore, x: f32) -> SpriteCmd {
        let id = store.insert("s", ImageData::solid(1, 1, [255; 4]));
        let image = Arc::clone(store.image(id).expect("ready"));
        SpriteCmd::new(id, image, Rect::new(x, 0.0, 1.0, 1.0), SpriteSizing::UnitQuad)
    }

    #[test]
    fn sprites_before_last_clear_are_skipped() {
        let mut store = AssetStore::new();
        let mut list = DrawList::default();
        list.sprite(sprite(&mut store, 1.0));
        list.clear_to(Color::BLACK);
        list.sprite(sprite(&mut store, 2.0));
        list.sprite(sprite(&mut store, 3.0));

        let xs: Vec<f32> = list.sprites().map(|s| s.rect.origin.x).collect();
        assert_eq!(xs, vec![2.0, 3.0]);
        assert_eq!(list.clear_color(), Some(Color::BLACK));
    }

    #[test]
    fn reset_keeps_nothing() {
        let mut list = DrawList::default();
        list.clear_to(Color::WHITE);
        list.reset(Mat4::from_scale(glam::Vec3::splat(2.0)));
        assert!(list.is_empty());
        assert_eq!(list.clear_color(), None);
        assert_ne!(list.projection(), Mat4::IDENTITY);
    }
}
