use spritewalk_engine::assets::AssetId;
use spritewalk_engine::input::Key;
use spritewalk_engine::paint::Color;

use crate::config::DemoConfig;

/// Character position in logical pixels. Unbounded; may leave the viewport.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Everything a frame is built from.
#[derive(Debug, Clone)]
pub struct Scene {
    pub character: Position,
    pub character_size: f32,
    pub background_image: AssetId,
    pub character_image: AssetId,
    pub clear: Color,
    step: i32,
}

impl Scene {
    pub fn new(config: &DemoConfig, background_image: AssetId, character_image: AssetId) -> Self {
        let (x, y) = config.start;
        Self {
            character: Position::new(x, y),
            character_size: config.character_size,
            background_image,
            character_image,
            clear: config.clear,
            step: config.step,
        }
    }

    /// Moves the character one step for an arrow key. Returns whether it moved.
    ///
    /// Up/down change `y` (screen space, down is positive), left/right change `x`.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let pos = &mut self.character;
        match key {
            Key::ArrowUp => pos.y = pos.y.wrapping_sub(self.step),
            Key::ArrowDown => pos.y = pos.y.wrapping_add(self.step),
            Key::ArrowLeft => pos.x = pos.x.wrapping_sub(self.step),
            Key::ArrowRight => pos.x = pos.x.wrapping_add(self.step),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use spritewalk_engine::assets::{AssetStore, ImageData};

    use super::*;

    fn scene() -> Scene {
        let mut store = AssetStore::new();
        let bg = store.insert("bg", ImageData::solid(1, 1, [0, 0, 0, 255]));
        let fg = store.insert("fg", ImageData::solid(1, 1, [255; 4]));
        Scene::new(&DemoConfig::default(), bg, fg)
    }

    #[test]
    fn starts_at_100_100() {
        assert_eq!(scene().character, Position::new(100, 100));
    }

    #[test]
    fn each_arrow_moves_five_on_its_axis() {
        let cases = [
            (Key::ArrowUp, Position::new(100, 95)),
            (Key::ArrowDown, Position::new(100, 105)),
            (Key::ArrowLeft, Position::new(95, 100)),
            (Key::ArrowRight, Position::new(105, 100)),
        ];
        for (key, expected) in cases {
            let mut s = scene();
            assert!(s.handle_key(key));
            assert_eq!(s.character, expected, "{key:?}");
        }
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut s = scene();
        for key in [Key::Space, Key::Enter, Key::Escape, Key::Character('w'), Key::Unknown] {
            assert!(!s.handle_key(key));
        }
        assert_eq!(s.character, Position::new(100, 100));
    }

    #[test]
    fn repeated_presses_are_not_clamped() {
        let mut s = scene();
        for _ in 0..40 {
            s.handle_key(Key::ArrowLeft);
        }
        assert_eq!(s.character.x, 100 - 5 * 40);

        for _ in 0..1000 {
            s.handle_key(Key::ArrowDown);
        }
        assert_eq!(s.character.y, 100 + 5 * 1000);
    }

    #[test]
    fn position_wraps_instead_of_overflowing() {
        let mut s = scene();
        s.character.x = i32::MAX;
        s.handle_key(Key::ArrowRight);
        assert_eq!(s.character.x, i32::MIN + 4);
    }
}
