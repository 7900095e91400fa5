use anyhow::Result;

use tessera_engine::gfx::{ColorVertex, Mesh, polygon};
use tessera_engine::input::{InputState, Key};
use tessera_engine::present::TargetSpec;
use tessera_engine::scene::{Scene, SceneCtx};
use tessera_engine::time::FrameTime;

use super::pentagon;
use super::pipeline::{self, PipelineDesc};

const POLYGON_SIDES: usize = 100;

/// Colored pentagon; a 100-sided polygon while Space is held.
pub struct PolygonDemo {
    pipeline: wgpu::RenderPipeline,
    pentagon: Mesh,
    polygon: Mesh,
    show_polygon: bool,
}

impl PolygonDemo {
    pub fn new(ctx: &SceneCtx<'_>) -> Result<Self> {
        let pipeline = pipeline::build(
            ctx.device,
            &PipelineDesc {
                label: "polygon",
                shader: include_str!("shaders/color.wgsl"),
                bind_group_layouts: &[],
                buffers: &[ColorVertex::layout()],
                format: ctx.surface_format(),
                targets: TargetSpec::default(),
            },
        );

        let pentagon = Mesh::upload(ctx.device, "pentagon", &pentagon::colored(), &pentagon::INDICES)?;

        let (vertices, indices) = polygon(POLYGON_SIDES, 0.5)?;
        let polygon = Mesh::upload(ctx.device, "polygon", &vertices, &indices)?;

        Ok(Self {
            pipeline,
            pentagon,
            polygon,
            show_polygon: false,
        })
    }
}

impl Scene for PolygonDemo {
    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 0.1,
            g: 0.2,
            b: 0.3,
            a: 1.0,
        }
    }

    fn update(&mut self, _ctx: &SceneCtx<'_>, _time: FrameTime, input: &InputState) {
        self.show_polygon = input.is_down(Key::Space);
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        if self.show_polygon {
            self.polygon.draw(pass);
        } else {
            self.pentagon.draw(pass);
        }
    }
}
