//! Image assets.
//!
//! Images are decoded off the event-loop thread. The frame builder asks the
//! [`AssetStore`] whether an image is ready before drawing it; pending and failed
//! images are simply not drawn.

mod error;
mod image_data;
mod store;

pub use error::AssetError;
pub use image_data::ImageData;
pub use store::{AssetId, AssetStore, LoadState};
