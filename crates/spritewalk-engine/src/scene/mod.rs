//! Scene (draw stream) types.
//!
//! A frame is described as a [`DrawList`]: a projection plus an ordered list of
//! renderer-agnostic commands. Building the list is pure; executing it is the
//! renderer's job.

mod cmd;
mod list;
mod sprite;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use sprite::{SpriteCmd, SpriteSizing};
