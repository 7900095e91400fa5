//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - negotiating and configuring the Surface (swapchain)
//! - classifying surface acquisition failures

mod context;
mod error;
mod init;
mod surface;

pub use context::Gpu;
pub use error::AcquireError;
pub use init::GpuInit;
