//! Coordinate and geometry types shared by the scene builder and renderers.
//!
//! Canonical CPU space:
//! - logical pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Conversion to clip space happens on the CPU through [`ortho_projection`]; the
//! vertex shader only applies the final matrix.

mod rect;
mod transform;
mod viewport;

pub use glam::{Mat4, Vec2, Vec4};
pub use rect::Rect;
pub use transform::{ortho_projection, translation};
pub use viewport::Viewport;
