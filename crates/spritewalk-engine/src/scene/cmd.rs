use crate::paint::Color;

use super::SpriteCmd;

/// Renderer-agnostic draw command.
///
/// Commands execute in insertion order; later sprites paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clears the whole target.
    Clear(Color),
    /// Draws one textured quad.
    Sprite(SpriteCmd),
}
