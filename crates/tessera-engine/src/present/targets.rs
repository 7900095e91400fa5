use super::config::SurfaceConfig;

/// Depth format used by [`TargetSpec::with_depth`] callers that have no preference.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Size-dependent render targets a scene asks for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetSpec {
    /// MSAA sample count. `1` renders straight into the swapchain image.
    pub sample_count: u32,
    pub depth_format: Option<wgpu::TextureFormat>,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            sample_count: 1,
            depth_format: None,
        }
    }
}

impl TargetSpec {
    pub fn with_msaa(self, sample_count: u32) -> Self {
        Self {
            sample_count: sample_count.max(1),
            ..self
        }
    }

    pub fn with_depth(self, format: wgpu::TextureFormat) -> Self {
        Self {
            depth_format: Some(format),
            ..self
        }
    }

    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }

    /// Multisample state matching these targets, for pipeline descriptors.
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}

/// Multisample color target and depth buffer sized to the surface.
///
/// Rebuilt on every reconfigure; the previous set is dropped when replaced.
pub struct AuxTargets {
    msaa: Option<wgpu::TextureView>,
    depth: Option<wgpu::TextureView>,
}

impl AuxTargets {
    pub fn build(device: &wgpu::Device, config: &SurfaceConfig, spec: &TargetSpec) -> Self {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let msaa = spec.is_multisampled().then(|| {
            create_view(
                device,
                "tessera msaa color target",
                size,
                spec.sample_count,
                config.format,
            )
        });

        let depth = spec.depth_format.map(|format| {
            create_view(device, "tessera depth target", size, spec.sample_count, format)
        });

        log::debug!(
            "aux targets {}x{}: msaa={} depth={}",
            config.width,
            config.height,
            msaa.is_some(),
            depth.is_some()
        );

        Self { msaa, depth }
    }

    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa.as_ref()
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref()
    }
}

fn create_view(
    device: &wgpu::Device,
    label: &str,
    size: wgpu::Extent3d,
    sample_count: u32,
    format: wgpu::TextureFormat,
) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_renders_straight_to_the_swapchain() {
        let spec = TargetSpec::default();
        assert!(!spec.is_multisampled());
        assert_eq!(spec.depth_format, None);
        assert_eq!(spec.multisample_state().count, 1);
    }

    #[test]
    fn builders_compose() {
        let spec = TargetSpec::default().with_msaa(4).with_depth(DEPTH_FORMAT);
        assert!(spec.is_multisampled());
        assert_eq!(spec.sample_count, 4);
        assert_eq!(spec.depth_format, Some(DEPTH_FORMAT));
        assert_eq!(spec.multisample_state().mask, u64::MAX);
    }

    #[test]
    fn zero_sample_count_is_clamped() {
        assert_eq!(TargetSpec::default().with_msaa(0).sample_count, 1);
    }
}
