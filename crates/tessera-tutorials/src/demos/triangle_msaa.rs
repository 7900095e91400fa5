use anyhow::Result;

use tessera_engine::present::TargetSpec;
use tessera_engine::scene::{Scene, SceneCtx};

use super::pipeline::{self, PipelineDesc};

const SAMPLE_COUNT: u32 = 4;

/// One triangle drawn into a 4x multisampled target and resolved on present.
pub struct TriangleMsaa {
    pipeline: wgpu::RenderPipeline,
}

impl TriangleMsaa {
    pub fn new(ctx: &SceneCtx<'_>) -> Result<Self> {
        let pipeline = pipeline::build(
            ctx.device,
            &PipelineDesc {
                label: "triangle-msaa",
                shader: include_str!("shaders/triangle.wgsl"),
                bind_group_layouts: &[],
                buffers: &[],
                format: ctx.surface_format(),
                targets: Self::target_spec(),
            },
        );

        Ok(Self { pipeline })
    }

    fn target_spec() -> TargetSpec {
        TargetSpec::default().with_msaa(SAMPLE_COUNT)
    }
}

impl Scene for TriangleMsaa {
    fn targets(&self) -> TargetSpec {
        Self::target_spec()
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::GREEN
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.draw(0..3, 0..1);
    }
}
