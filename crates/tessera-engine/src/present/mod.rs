//! Frame presentation.
//!
//! `FramePresenter` runs "acquire → render pass → submit → present" against a
//! `PresentBackend` and turns acquisition failures into a recovery decision:
//! - Lost / Outdated: rebuild the surface at the last known size
//! - Timeout: skip the frame, retry next tick
//! - anything else: fatal, stop the loop
//!
//! `WgpuBackend` is the wgpu implementation of the backend seam.

mod backend;
mod config;
mod driver;
mod outcome;
mod presenter;
mod targets;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::PresentBackend;
pub use config::SurfaceConfig;
pub use driver::{LoopControl, run_loop};
pub use outcome::{FrameOutcome, FrameStatus, PresentStats, Recovery, SurfaceLoss};
pub use presenter::FramePresenter;
pub use targets::{AuxTargets, DEPTH_FORMAT, TargetSpec};
pub use wgpu_backend::{SurfaceImage, WgpuBackend};
