/// Viewport size in logical pixels.
///
/// The projection for a frame is derived from this size; see
/// [`ortho_projection`](super::ortho_projection).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the viewport clamped to at least one pixel per axis.
    ///
    /// Minimized windows report a zero size; projections built from that would divide by zero.
    #[inline]
    pub fn at_least_one_px(self) -> Self {
        Self::new(self.width.max(1.0), self.height.max(1.0))
    }
}
