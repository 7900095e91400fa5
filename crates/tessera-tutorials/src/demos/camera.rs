use anyhow::Result;
use glam::Mat4;
use wgpu::util::DeviceExt;

use tessera_engine::camera::{Camera, CameraController, CameraUniform};
use tessera_engine::gfx::{Mesh, TexVertex, Texture};
use tessera_engine::input::InputState;
use tessera_engine::present::{DEPTH_FORMAT, TargetSpec};
use tessera_engine::scene::{Scene, SceneCtx};
use tessera_engine::time::FrameTime;

use super::pipeline::{self, PipelineDesc};
use super::{pentagon, textures};

const CAMERA_SPEED: f32 = 0.2;

/// Degrees added to the model rotation every frame.
const SPIN_PER_FRAME: f32 = 2.0;

/// Textured pentagon spinning about Z, seen through a keyboard-driven camera.
pub struct CameraDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    texture_bind_group: wgpu::BindGroup,

    camera: Camera,
    controller: CameraController,
    uniform: CameraUniform,
    uniform_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    rotation: f32,
}

impl CameraDemo {
    pub fn new(ctx: &SceneCtx<'_>) -> Result<Self> {
        let texture_layout = Texture::bind_group_layout(ctx.device);
        let texture_bind_group =
            Texture::from_bytes(ctx.device, ctx.queue, textures::CHECKER_PNG, "checker.png")?
                .bind_group(ctx.device, &texture_layout, "camera demo texture bind group");

        let camera = Camera::new(ctx.config.aspect());
        let mut uniform = CameraUniform::default();
        uniform.update(&camera, Mat4::IDENTITY);

        let uniform_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera ubo"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let camera_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<CameraUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let camera_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline = pipeline::build(
            ctx.device,
            &PipelineDesc {
                label: "camera",
                shader: include_str!("shaders/camera.wgsl"),
                bind_group_layouts: &[&texture_layout, &camera_layout],
                buffers: &[TexVertex::layout()],
                format: ctx.surface_format(),
                targets: Self::target_spec(),
            },
        );

        let mesh = Mesh::upload(ctx.device, "pentagon", &pentagon::textured(), &pentagon::INDICES)?;

        Ok(Self {
            pipeline,
            mesh,
            texture_bind_group,
            camera,
            controller: CameraController::new(CAMERA_SPEED),
            uniform,
            uniform_buffer,
            camera_bind_group,
            rotation: 0.0,
        })
    }

    fn target_spec() -> TargetSpec {
        TargetSpec::default().with_depth(DEPTH_FORMAT)
    }
}

impl Scene for CameraDemo {
    fn targets(&self) -> TargetSpec {
        Self::target_spec()
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 0.1,
            g: 0.2,
            b: 0.3,
            a: 1.0,
        }
    }

    fn resize(&mut self, ctx: &SceneCtx<'_>) {
        self.camera.set_viewport(ctx.config.width, ctx.config.height);
    }

    fn update(&mut self, ctx: &SceneCtx<'_>, _time: FrameTime, input: &InputState) {
        self.controller.update_camera(input, &mut self.camera);
        self.rotation = (self.rotation + SPIN_PER_FRAME) % 360.0;

        let model = Mat4::from_rotation_z(self.rotation.to_radians());
        self.uniform.update(&self.camera, model);
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.texture_bind_group, &[]);
        pass.set_bind_group(1, &self.camera_bind_group, &[]);
        self.mesh.draw(pass);
    }
}
