use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use winit::window::Window;

use super::error::AcquireError;
use super::init::GpuInit;
use super::surface;
use crate::present::SurfaceConfig;

/// Owns the wgpu core objects bound to one window.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - negotiates the surface format, alpha and present modes
/// - configures the Surface (swapchain) on request
/// - acquires surface textures
///
/// Fields drop in declaration order, dependents first.
pub struct Gpu<'w> {
    /// Command queue.
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Surface bound to the window.
    ///
    /// The window must outlive the `Gpu`; `'w` enforces it.
    surface: wgpu::Surface<'w>,

    /// wgpu instance used to create the adapter and surface.
    instance: wgpu::Instance,

    caps: wgpu::SurfaceCapabilities,
    format: wgpu::TextureFormat,
    alpha_mode: wgpu::CompositeAlphaMode,
    present_mode: wgpu::PresentMode,
    desired_maximum_frame_latency: u32,

    /// Set by the device-lost callback.
    lost: Arc<AtomicBool>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// The surface is not configured here; the presenter does that once the
    /// initial `SurfaceConfig` is known. If any step fails, everything built
    /// before it is dropped in reverse order before the error is returned.
    pub async fn new(window: &'w Window, init: &GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: init.force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tessera device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let lost = Arc::new(AtomicBool::new(false));
        let lost_flag = Arc::clone(&lost);
        device.set_device_lost_callback(move |reason, message| {
            lost_flag.store(true, Ordering::Release);
            log::error!("GPU device lost ({reason:?}): {message}");
        });

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);
        let present_mode = surface::choose_present_mode(&caps, init.present_mode);

        log::debug!("surface format {format:?}, alpha {alpha_mode:?}, present {present_mode:?}");

        Ok(Self {
            queue,
            device,
            adapter,
            surface,
            instance,
            caps,
            format,
            alpha_mode,
            present_mode,
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
            lost,
        })
    }

    /// Returns the negotiated surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Whether the device reported itself lost. A lost device never recovers.
    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// (Re)creates the swapchain for `config`.
    pub fn configure(&self, config: &SurfaceConfig) -> Result<()> {
        anyhow::ensure!(!self.is_lost(), "GPU device lost");

        let max_dimension = self.device.limits().max_texture_dimension_2d;
        surface::validate_config(&self.caps, max_dimension, config)?;

        self.surface.configure(
            &self.device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: config.format,
                width: config.width,
                height: config.height,
                present_mode: self.present_mode,
                alpha_mode: self.alpha_mode,
                view_formats: vec![],
                desired_maximum_frame_latency: self.desired_maximum_frame_latency,
            },
        );
        Ok(())
    }

    /// Acquires the next surface texture.
    pub fn acquire(&self) -> std::result::Result<wgpu::SurfaceTexture, AcquireError> {
        let texture = self.surface.get_current_texture()?;
        if texture.suboptimal {
            log::debug!("acquired a suboptimal surface texture");
        }
        Ok(texture)
    }

    /// Logs wgpu's global resource report.
    pub fn log_resource_report(&self) {
        match self.instance.generate_report() {
            Some(report) => log::info!("wgpu resource report: {report:#?}"),
            None => log::info!("wgpu resource report unavailable on this backend"),
        }
    }
}
