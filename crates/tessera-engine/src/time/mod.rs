//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per iteration and hand
//! the resulting `FrameTime` to the scene update.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
