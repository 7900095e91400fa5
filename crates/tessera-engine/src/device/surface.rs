use anyhow::{Result, ensure};

use crate::present::SurfaceConfig;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = caps.formats.first().copied()?;

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }

    Some(first)
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Falls back to FIFO when the requested mode is not offered.
pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Checks a configuration against what the surface and device accept.
///
/// wgpu reports an invalid `Surface::configure` through the device error
/// handler rather than a return value, so mismatches are caught here first.
pub(crate) fn validate_config(
    caps: &wgpu::SurfaceCapabilities,
    max_dimension: u32,
    config: &SurfaceConfig,
) -> Result<()> {
    ensure!(
        config.is_drawable(),
        "surface size {}x{} has a zero dimension",
        config.width,
        config.height
    );
    ensure!(
        config.width <= max_dimension && config.height <= max_dimension,
        "surface size {}x{} exceeds the device limit of {max_dimension}",
        config.width,
        config.height
    );
    ensure!(
        caps.formats.contains(&config.format),
        "surface format {:?} is not supported (supported: {:?})",
        config.format,
        caps.formats
    );
    Ok(())
}
