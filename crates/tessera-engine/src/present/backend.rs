use anyhow::Result;

use super::config::SurfaceConfig;
use crate::device::AcquireError;

/// Graphics API seam used by [`FramePresenter`](super::FramePresenter).
///
/// The presenter owns the backend exclusively and calls it from one thread.
/// [`WgpuBackend`](super::WgpuBackend) is the real implementation.
pub trait PresentBackend {
    /// An acquired presentable image. Dropping it without presenting releases it.
    type Image;

    /// Rebuilds the presentable surface and every size-dependent target.
    ///
    /// An error means the device rejected the configuration.
    fn configure(&mut self, config: &SurfaceConfig) -> Result<()>;

    /// Acquires the next presentable image.
    fn acquire(&mut self) -> std::result::Result<Self::Image, AcquireError>;

    /// Records one render pass (clear + scene draws) into `image` and submits it.
    fn render(&mut self, image: &Self::Image) -> Result<()>;

    /// Queues `image` for presentation.
    fn present(&mut self, image: Self::Image);

    /// Releases every owned GPU object, dependents first.
    ///
    /// Must tolerate being called on a partially released backend.
    fn release(&mut self);
}
