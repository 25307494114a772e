use glam::{Mat4, Vec3};

use super::Viewport;

/// Orthographic projection spanning `viewport`.
///
/// Left/right = `0..width`, bottom/top = `height..0` (origin top-left, +Y down),
/// near/far = `-1..1`.
pub fn ortho_projection(viewport: Viewport) -> Mat4 {
    let vp = viewport.at_least_one_px();
    Mat4::orthographic_rh_gl(0.0, vp.width, vp.height, 0.0, -1.0, 1.0)
}

/// Translation-only model-view matrix placing a quad at `(x, y)`.
pub fn translation(x: f32, y: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, 0.0))
}
