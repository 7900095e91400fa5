//! Scene contract.
//!
//! A scene is what an instantiating program puts on screen: its pipelines,
//! buffers and bind groups, plus the per-frame state it animates. The wgpu
//! backend owns the scene and calls into it while presenting.

mod ctx;

pub use ctx::SceneCtx;

use crate::input::InputState;
use crate::present::TargetSpec;
use crate::time::FrameTime;

pub trait Scene {
    /// Auxiliary targets the scene's pipelines were built for.
    fn targets(&self) -> TargetSpec {
        TargetSpec::default()
    }

    /// Color the render pass clears to.
    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::BLACK
    }

    /// Called after every successful surface (re)configuration.
    fn resize(&mut self, ctx: &SceneCtx<'_>) {
        let _ = ctx;
    }

    /// Called once per loop iteration, before the frame is presented.
    ///
    /// `input` reflects every event received since the previous frame.
    fn update(&mut self, ctx: &SceneCtx<'_>, time: FrameTime, input: &InputState) {
        let _ = (ctx, time, input);
    }

    /// Issues the scene's draw calls into the already-begun render pass.
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>);
}
