use anyhow::Result;

use tessera_engine::gfx::{Mesh, TexVertex, Texture};
use tessera_engine::input::{InputState, Key};
use tessera_engine::present::TargetSpec;
use tessera_engine::scene::{Scene, SceneCtx};
use tessera_engine::time::FrameTime;

use super::pipeline::{self, PipelineDesc};
use super::{pentagon, textures};

/// Textured pentagon; the alternate texture is bound while Space is held.
pub struct TexturedDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    primary: wgpu::BindGroup,
    alternate: wgpu::BindGroup,
    show_alternate: bool,
}

impl TexturedDemo {
    pub fn new(ctx: &SceneCtx<'_>) -> Result<Self> {
        let layout = Texture::bind_group_layout(ctx.device);

        let primary = Texture::from_bytes(ctx.device, ctx.queue, textures::CHECKER_PNG, "checker.png")?
            .bind_group(ctx.device, &layout, "primary texture bind group");
        let alternate =
            Texture::from_rgba(ctx.device, ctx.queue, &textures::alternate(), "alternate texture")?
                .bind_group(ctx.device, &layout, "alternate texture bind group");

        let pipeline = pipeline::build(
            ctx.device,
            &PipelineDesc {
                label: "textured",
                shader: include_str!("shaders/texture.wgsl"),
                bind_group_layouts: &[&layout],
                buffers: &[TexVertex::layout()],
                format: ctx.surface_format(),
                targets: TargetSpec::default(),
            },
        );

        let mesh = Mesh::upload(ctx.device, "pentagon", &pentagon::textured(), &pentagon::INDICES)?;

        Ok(Self {
            pipeline,
            mesh,
            primary,
            alternate,
            show_alternate: false,
        })
    }
}

impl Scene for TexturedDemo {
    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 0.1,
            g: 0.2,
            b: 0.3,
            a: 1.0,
        }
    }

    fn update(&mut self, _ctx: &SceneCtx<'_>, _time: FrameTime, input: &InputState) {
        self.show_alternate = input.is_down(Key::Space);
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let bind_group = if self.show_alternate { &self.alternate } else { &self.primary };

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        self.mesh.draw(pass);
    }
}
