use crate::device::Gpu;
use crate::present::SurfaceConfig;

/// Scene-facing context (device/queue + surface configuration).
///
/// This is intentionally small and stable.
pub struct SceneCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub config: SurfaceConfig,
}

impl<'a> SceneCtx<'a> {
    #[inline]
    pub fn new(gpu: &'a Gpu<'_>, config: SurfaceConfig) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            config,
        }
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}
