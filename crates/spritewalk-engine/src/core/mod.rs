//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and the
//! application layer, plus the per-frame context handed to it.

mod app;
mod cancel;
mod ctx;

pub use app::{App, AppControl};
pub use cancel::CancelToken;
pub use ctx::{FrameCtx, WindowCtx};
