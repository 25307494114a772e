//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s via [`platform`] and
//! hands each one to the app as it arrives.

mod types;

pub mod platform;

pub use types::{InputEvent, Key, KeyState};
