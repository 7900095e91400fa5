/// Geometry and format of the presentable surface.
///
/// Invariant: the presenter only hands a config to the backend when both
/// dimensions are non-zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

impl SurfaceConfig {
    #[inline]
    pub const fn new(width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        Self { width, height, format }
    }

    /// Whether a swapchain can be created at this size.
    #[inline]
    pub const fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns a copy resized to `width` x `height`, or `None` for a zero dimension.
    pub fn resized(&self, width: u32, height: u32) -> Option<Self> {
        let next = Self { width, height, ..*self };
        next.is_drawable().then_some(next)
    }

    /// Width over height. Only meaningful for drawable configs.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FMT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

    #[test]
    fn resized_keeps_format() {
        let c = SurfaceConfig::new(640, 480, FMT);
        let r = c.resized(800, 600).unwrap();
        assert_eq!(r, SurfaceConfig::new(800, 600, FMT));
    }

    #[test]
    fn resized_rejects_zero_dimensions() {
        let c = SurfaceConfig::new(640, 480, FMT);
        assert!(c.resized(0, 600).is_none());
        assert!(c.resized(800, 0).is_none());
        assert!(c.resized(0, 0).is_none());
    }

    #[test]
    fn aspect_ratio() {
        assert_eq!(SurfaceConfig::new(640, 480, FMT).aspect(), 640.0 / 480.0);
    }
}
