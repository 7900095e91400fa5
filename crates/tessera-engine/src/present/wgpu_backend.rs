use anyhow::{Context, Result, bail, ensure};
use winit::window::Window;

use super::backend::PresentBackend;
use super::config::SurfaceConfig;
use super::targets::AuxTargets;
use crate::device::{AcquireError, Gpu, GpuInit};
use crate::input::InputState;
use crate::scene::{Scene, SceneCtx};
use crate::time::FrameTime;

/// Swapchain image acquired for one frame.
///
/// Dropping it without calling `present` discards the image.
pub struct SurfaceImage {
    view: wgpu::TextureView,
    texture: wgpu::SurfaceTexture,
}

/// [`PresentBackend`] over wgpu, owning the GPU context, the scene and the
/// size-dependent targets.
///
/// Every slot is an `Option` so `release` can tear down in order and leave
/// the backend safely empty. Fields also drop in declaration order.
pub struct WgpuBackend<'w, S: Scene> {
    targets: Option<AuxTargets>,
    scene: Option<S>,
    gpu: Option<Gpu<'w>>,
    window: &'w Window,
}

impl<'w, S: Scene> WgpuBackend<'w, S> {
    /// Acquires the GPU for `window` and builds the scene on it.
    ///
    /// Nothing is configured yet; hand the backend to a
    /// [`FramePresenter`](super::FramePresenter) together with
    /// [`initial_config`](Self::initial_config). If the scene fails to build,
    /// the GPU context is dropped before the error is returned.
    pub fn new<F>(window: &'w Window, init: &GpuInit, build_scene: F) -> Result<Self>
    where
        F: FnOnce(&SceneCtx<'_>) -> Result<S>,
    {
        let gpu = pollster::block_on(Gpu::new(window, init))?;

        let config = Self::config_for(&gpu, window);
        let scene = build_scene(&SceneCtx::new(&gpu, config)).context("failed to build scene")?;

        Ok(Self {
            targets: None,
            scene: Some(scene),
            gpu: Some(gpu),
            window,
        })
    }

    /// Surface config matching the window's current physical size.
    pub fn initial_config(&self) -> Result<SurfaceConfig> {
        let Some(gpu) = self.gpu.as_ref() else {
            bail!("backend has been released");
        };
        Ok(Self::config_for(gpu, self.window))
    }

    fn config_for(gpu: &Gpu<'_>, window: &Window) -> SurfaceConfig {
        let size = window.inner_size();
        SurfaceConfig::new(size.width, size.height, gpu.surface_format())
    }

    pub fn gpu(&self) -> Option<&Gpu<'w>> {
        self.gpu.as_ref()
    }

    /// Runs the scene's per-frame update against the last configured surface.
    pub fn update(&mut self, config: SurfaceConfig, time: FrameTime, input: &InputState) {
        if let (Some(gpu), Some(scene)) = (self.gpu.as_ref(), self.scene.as_mut()) {
            scene.update(&SceneCtx::new(gpu, config), time, input);
        }
    }
}

impl<'w, S: Scene> PresentBackend for WgpuBackend<'w, S> {
    type Image = SurfaceImage;

    fn configure(&mut self, config: &SurfaceConfig) -> Result<()> {
        let (Some(gpu), Some(scene)) = (self.gpu.as_ref(), self.scene.as_mut()) else {
            bail!("backend has been released");
        };

        gpu.configure(config)?;

        // Replacing the slot drops the previous targets.
        self.targets = Some(AuxTargets::build(gpu.device(), config, &scene.targets()));
        scene.resize(&SceneCtx::new(gpu, *config));
        Ok(())
    }

    fn acquire(&mut self) -> std::result::Result<SurfaceImage, AcquireError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(AcquireError::Other("backend has been released".to_string()));
        };

        let texture = gpu.acquire()?;
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok(SurfaceImage { view, texture })
    }

    fn render(&mut self, image: &SurfaceImage) -> Result<()> {
        let (Some(gpu), Some(scene), Some(targets)) =
            (self.gpu.as_ref(), self.scene.as_ref(), self.targets.as_ref())
        else {
            bail!("backend is not configured");
        };
        ensure!(!gpu.is_lost(), "GPU device lost");

        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera frame encoder"),
            });

        // Multisampled scenes draw into the MSAA target and resolve into the
        // swapchain image; the multisampled contents are not kept.
        let (view, resolve_target, store) = match targets.msaa_view() {
            Some(msaa) => (msaa, Some(&image.view), wgpu::StoreOp::Discard),
            None => (&image.view, None, wgpu::StoreOp::Store),
        };

        let depth_stencil_attachment =
            targets
                .depth_view()
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        // Pass is dropped before the encoder is finished.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessera scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.clear_color()),
                        store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            scene.draw(&mut pass);
        }

        gpu.queue().submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn present(&mut self, image: SurfaceImage) {
        let SurfaceImage { view, texture } = image;
        drop(view);

        self.window.pre_present_notify();
        texture.present();
    }

    fn release(&mut self) {
        if self.targets.take().is_some() {
            log::trace!("released auxiliary targets");
        }
        if self.scene.take().is_some() {
            log::trace!("released scene resources");
        }
        if self.gpu.take().is_some() {
            log::trace!("released GPU context");
        }
    }
}
