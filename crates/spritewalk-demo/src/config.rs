use std::path::PathBuf;

use spritewalk_engine::paint::Color;
use spritewalk_engine::scene::SpriteSizing;

/// Demo settings. Fixed at startup; there is no way to change them at runtime.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Drawn at the top-left corner, sized to the viewport.
    pub background_path: PathBuf,
    /// The movable character.
    pub character_path: PathBuf,
    pub start: (i32, i32),
    /// Distance moved per arrow-key press, in logical pixels.
    pub step: i32,
    pub character_size: f32,
    pub sizing: SpriteSizing,
    pub clear: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            background_path: PathBuf::from("assets/6.png"),
            character_path: PathBuf::from("assets/player.png"),
            start: (100, 100),
            step: 5,
            character_size: 50.0,
            sizing: SpriteSizing::UnitQuad,
            clear: Color::BLACK,
        }
    }
}
