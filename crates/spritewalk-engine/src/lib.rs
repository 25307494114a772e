//! spritewalk engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demo: window loop, input
//! translation, asset loading and the textured-quad sprite renderer.

pub mod assets;
pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
