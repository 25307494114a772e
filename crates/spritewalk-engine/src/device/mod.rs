//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) for the window
//! - acquiring frames and providing encoders/views for rendering
//!
//! [`HeadlessGpu`] offers the same device/queue pair without a window, for
//! offscreen rendering in tests and tools.

mod gpu;
mod headless;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use headless::HeadlessGpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
