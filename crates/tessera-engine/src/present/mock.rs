//! Scriptable in-memory backend for presenter tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Result, bail};

use super::backend::PresentBackend;
use super::config::SurfaceConfig;
use crate::device::AcquireError;

pub(crate) const FMT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

/// Everything the backend observed. Shared so it outlives the presenter.
#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub configures: Vec<SurfaceConfig>,
    pub acquires: usize,
    pub renders: usize,
    pub presented: Vec<(u32, u32)>,
    pub releases: usize,
    pub live_images: usize,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    pub calls: Rc<RefCell<Calls>>,
    /// Failures returned by the next acquisitions, in order. Empty means success.
    pub acquire_failures: VecDeque<AcquireError>,
    pub reject_configure: bool,
    pub fail_render: bool,
    size: (u32, u32),
}

impl MockBackend {
    pub fn new() -> (Self, Rc<RefCell<Calls>>) {
        let backend = Self::default();
        let calls = Rc::clone(&backend.calls);
        (backend, calls)
    }

    pub fn failing_with(errors: impl IntoIterator<Item = AcquireError>) -> (Self, Rc<RefCell<Calls>>) {
        let (mut backend, calls) = Self::new();
        backend.acquire_failures = errors.into_iter().collect();
        (backend, calls)
    }
}

pub(crate) struct MockImage {
    size: (u32, u32),
    calls: Rc<RefCell<Calls>>,
}

impl Drop for MockImage {
    fn drop(&mut self) {
        self.calls.borrow_mut().live_images -= 1;
    }
}

impl PresentBackend for MockBackend {
    type Image = MockImage;

    fn configure(&mut self, config: &SurfaceConfig) -> Result<()> {
        if self.reject_configure {
            bail!("device rejected {}x{}", config.width, config.height);
        }
        self.calls.borrow_mut().configures.push(*config);
        self.size = (config.width, config.height);
        Ok(())
    }

    fn acquire(&mut self) -> std::result::Result<MockImage, AcquireError> {
        let mut calls = self.calls.borrow_mut();
        calls.acquires += 1;
        if let Some(err) = self.acquire_failures.pop_front() {
            return Err(err);
        }
        calls.live_images += 1;
        Ok(MockImage {
            size: self.size,
            calls: Rc::clone(&self.calls),
        })
    }

    fn render(&mut self, _image: &MockImage) -> Result<()> {
        if self.fail_render {
            bail!("queue submission failed");
        }
        self.calls.borrow_mut().renders += 1;
        Ok(())
    }

    fn present(&mut self, image: MockImage) {
        self.calls.borrow_mut().presented.push(image.size);
    }

    fn release(&mut self) {
        self.calls.borrow_mut().releases += 1;
    }
}
