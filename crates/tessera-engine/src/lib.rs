//! Tessera engine crate.
//!
//! Resize-safe frame presentation on top of wgpu and winit: the GPU context,
//! the frame presenter and its recovery rules, the single-window runtime, and
//! the small set of GPU helpers the tutorial scenes are written against.

pub mod camera;
pub mod device;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod present;
pub mod scene;
pub mod time;
pub mod window;
