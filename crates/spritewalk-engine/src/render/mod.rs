//! GPU rendering subsystem.
//!
//! The [`SpriteRenderer`] consumes a [`DrawList`](crate::scene::DrawList) and issues
//! wgpu commands. It owns every GPU resource it needs: the shader program, the
//! static quad buffer, cached sprite textures and the per-frame instance buffer.
//!
//! Convention:
//! - quad corners are `(±1, ±1)`
//! - the CPU composes `projection * model_view` per sprite; shaders only apply it

mod ctx;
mod program;
mod quad;
mod sprite;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use program::{ProgramSource, ShaderError, ShaderProgram, Stage, ValidatedProgram};
pub use quad::{QuadBuffer, QuadVertex, QUAD_VERTICES};
pub use sprite::{RenderStats, SpriteRenderer};
pub use texture::{GpuTexture, TextureCache};
