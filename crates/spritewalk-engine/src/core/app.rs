use crate::input::InputEvent;
use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once, right after the GPU context is created.
    ///
    /// Not called when GPU initialization fails.
    fn on_start(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Called for every translated input event, as it arrives.
    ///
    /// Runs whether or not a GPU context exists.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw while a GPU context exists.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
