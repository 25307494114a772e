//! Color model shared by the scene builder and renderers.

pub mod color;

pub use color::Color;
