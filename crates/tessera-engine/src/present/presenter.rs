use anyhow::{Context, Result, anyhow, ensure};

use super::backend::PresentBackend;
use super::config::SurfaceConfig;
use super::outcome::{FrameOutcome, FrameStatus, PresentStats, Recovery};

/// Drives "render one frame, react to failure" on top of a [`PresentBackend`].
///
/// Owns the backend (and through it every GPU object) plus the current
/// [`SurfaceConfig`]. Not meant to be shared: the loop that calls it is the
/// only mutator.
pub struct FramePresenter<B: PresentBackend> {
    backend: B,

    /// Last configuration the backend accepted.
    config: SurfaceConfig,

    /// Last size reported by the window, possibly with a zero dimension.
    window_size: (u32, u32),

    stats: PresentStats,
    released: bool,
}

impl<B: PresentBackend> FramePresenter<B> {
    /// Configures `backend` for `config` and takes ownership of it.
    ///
    /// On failure the backend is released before the error is returned.
    pub fn new(mut backend: B, config: SurfaceConfig) -> Result<Self> {
        let configured = if config.is_drawable() {
            backend
                .configure(&config)
                .context("initial surface configuration failed")
        } else {
            Err(anyhow!(
                "initial surface size {}x{} has a zero dimension",
                config.width,
                config.height
            ))
        };

        if let Err(err) = configured {
            backend.release();
            return Err(err);
        }

        log::info!(
            "surface configured: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            backend,
            config,
            window_size: (config.width, config.height),
            stats: PresentStats::default(),
            released: false,
        })
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn stats(&self) -> PresentStats {
        self.stats
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// True while the last reported window size has a zero dimension.
    pub fn is_suspended(&self) -> bool {
        let (width, height) = self.window_size;
        width == 0 || height == 0
    }

    /// Acquires, renders, submits and presents one frame.
    ///
    /// The acquired image is dropped whether or not drawing succeeded.
    pub fn present_frame(&mut self) -> FrameOutcome {
        if self.released {
            return FrameOutcome::Fatal(anyhow!("frame presenter has been shut down"));
        }

        let image = match self.backend.acquire() {
            Ok(image) => image,
            Err(err) => {
                log::debug!("surface acquisition failed: {err}");
                return FrameOutcome::from_acquire_error(err);
            }
        };

        if let Err(err) = self.backend.render(&image) {
            drop(image);
            return FrameOutcome::Fatal(err.context("failed to record or submit the frame"));
        }

        self.backend.present(image);
        self.stats.presented += 1;
        FrameOutcome::Presented
    }

    /// Rebuilds the surface at `width` x `height`.
    ///
    /// A zero dimension (minimized window) is a no-op: the config is left
    /// untouched and the backend is not called. So is a size equal to the
    /// current config. The config is only replaced once the backend accepted
    /// the new one.
    pub fn reconfigure(&mut self, width: u32, height: u32) -> Result<()> {
        ensure!(!self.released, "frame presenter has been shut down");

        self.window_size = (width, height);

        if (width, height) == (self.config.width, self.config.height) {
            log::trace!("surface already {width}x{height}; skipping reconfigure");
            return Ok(());
        }
        self.rebuild(width, height)
    }

    /// Reconfigures even when the size is unchanged; a lost or outdated
    /// surface has to be rebuilt at its current size.
    fn rebuild(&mut self, width: u32, height: u32) -> Result<()> {
        let Some(next) = self.config.resized(width, height) else {
            log::debug!("deferring surface reconfigure to {width}x{height}");
            return Ok(());
        };

        self.backend
            .configure(&next)
            .with_context(|| format!("failed to reconfigure surface to {width}x{height}"))?;

        log::debug!("surface reconfigured to {width}x{height}");
        self.config = next;
        self.stats.reconfigures += 1;
        Ok(())
    }

    /// One loop iteration: present, then apply the recovery the outcome asks for.
    ///
    /// Only fatal failures come back as `Err`.
    pub fn tick(&mut self) -> Result<FrameStatus> {
        if self.is_suspended() {
            return Ok(FrameStatus::Suspended);
        }
        let (width, height) = self.window_size;

        match self.present_frame() {
            FrameOutcome::Presented => Ok(FrameStatus::Presented),
            FrameOutcome::Recoverable(Recovery::Retry) => {
                log::debug!("surface image not ready; retrying next frame");
                self.stats.skipped += 1;
                Ok(FrameStatus::Skipped)
            }
            FrameOutcome::Recoverable(Recovery::Reconfigure(loss)) => {
                log::warn!("surface {loss:?}; reconfiguring at {width}x{height}");
                self.stats.skipped += 1;
                self.rebuild(width, height)?;
                Ok(FrameStatus::Reconfigured)
            }
            FrameOutcome::Fatal(err) => {
                log::error!("fatal frame error: {err:#}");
                Err(err)
            }
        }
    }

    /// Releases the backend. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.backend.release();

        let PresentStats { presented, skipped, reconfigures } = self.stats;
        log::info!(
            "presenter shut down ({presented} presented, {skipped} skipped, {reconfigures} reconfigures)"
        );
    }
}

impl<B: PresentBackend> Drop for FramePresenter<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::AcquireError;
    use crate::present::mock::{FMT, MockBackend};

    fn presenter(backend: MockBackend) -> FramePresenter<MockBackend> {
        FramePresenter::new(backend, SurfaceConfig::new(640, 480, FMT)).unwrap()
    }

    // ── reconfigure ───────────────────────────────────────────────────────

    #[test]
    fn zero_dimension_reconfigure_is_a_no_op() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        for (w, h) in [(0, 0), (0, 480), (640, 0), (0, 1080)] {
            p.reconfigure(w, h).unwrap();
            assert_eq!(*p.config(), SurfaceConfig::new(640, 480, FMT));
        }

        // Only the initial configure reached the backend.
        assert_eq!(calls.borrow().configures.len(), 1);
    }

    #[test]
    fn reconfigure_then_present_uses_the_new_size() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        for (w, h) in [(1, 1), (800, 600), (1920, 1080), (3, 7)] {
            p.reconfigure(w, h).unwrap();
            assert!(p.present_frame().is_presented());
            assert_eq!(calls.borrow().presented.last(), Some(&(w, h)));
            assert_eq!(*p.config(), SurfaceConfig::new(w, h, FMT));
        }
        assert_eq!(p.stats().reconfigures, 4);
    }

    #[test]
    fn same_size_reconfigure_skips_the_backend() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        p.reconfigure(640, 480).unwrap();
        p.reconfigure(640, 480).unwrap();

        assert_eq!(calls.borrow().configures.len(), 1);
        assert_eq!(p.stats().reconfigures, 0);
        assert_eq!(p.tick().unwrap(), FrameStatus::Presented);
    }

    #[test]
    fn outdated_rebuilds_even_at_the_same_size() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);
        p.reconfigure(640, 480).unwrap();

        p.backend_mut().acquire_failures.push_back(AcquireError::Outdated);
        assert_eq!(p.tick().unwrap(), FrameStatus::Reconfigured);

        let calls = calls.borrow();
        assert_eq!(calls.configures.len(), 2);
        assert_eq!(calls.configures[1], SurfaceConfig::new(640, 480, FMT));
        assert_eq!(p.stats().reconfigures, 1);
    }

    #[test]
    fn restoring_the_size_after_minimize_resumes_without_rebuild() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        p.reconfigure(0, 0).unwrap();
        assert!(p.is_suspended());

        p.reconfigure(640, 480).unwrap();
        assert!(!p.is_suspended());
        assert_eq!(calls.borrow().configures.len(), 1);
        assert_eq!(p.tick().unwrap(), FrameStatus::Presented);
    }

    #[test]
    fn rejected_reconfigure_keeps_last_good_config() {
        let (backend, _calls) = MockBackend::new();
        let mut p = presenter(backend);

        p.backend_mut().reject_configure = true;
        assert!(p.reconfigure(800, 600).is_err());
        assert_eq!(*p.config(), SurfaceConfig::new(640, 480, FMT));
    }

    // ── failure classification ────────────────────────────────────────────

    #[test]
    fn outdated_reconfigures_once_before_next_present() {
        let (backend, calls) = MockBackend::failing_with([AcquireError::Outdated]);
        let mut p = presenter(backend);

        assert_eq!(p.tick().unwrap(), FrameStatus::Reconfigured);
        assert_eq!(p.tick().unwrap(), FrameStatus::Presented);

        let calls = calls.borrow();
        assert_eq!(calls.configures.len(), 2);
        assert_eq!(calls.configures[1], SurfaceConfig::new(640, 480, FMT));
        assert_eq!(calls.presented, vec![(640, 480)]);
    }

    #[test]
    fn outdated_outcome_is_recoverable() {
        let (backend, _calls) = MockBackend::failing_with([AcquireError::Outdated]);
        let mut p = presenter(backend);
        assert!(p.present_frame().needs_reconfigure());
    }

    #[test]
    fn lost_after_resize_reconfigures_at_latest_size() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);
        p.reconfigure(1024, 768).unwrap();

        p.backend_mut().acquire_failures.push_back(AcquireError::Lost);
        assert_eq!(p.tick().unwrap(), FrameStatus::Reconfigured);
        assert_eq!(
            calls.borrow().configures.last(),
            Some(&SurfaceConfig::new(1024, 768, FMT))
        );
    }

    #[test]
    fn timeout_never_reconfigures() {
        let (backend, calls) = MockBackend::failing_with([AcquireError::Timeout]);
        let mut p = presenter(backend);

        assert!(matches!(
            p.present_frame(),
            FrameOutcome::Recoverable(Recovery::Retry)
        ));
        p.backend_mut().acquire_failures.push_back(AcquireError::Timeout);
        assert_eq!(p.tick().unwrap(), FrameStatus::Skipped);

        assert_eq!(calls.borrow().configures.len(), 1);
        assert_eq!(p.stats().reconfigures, 0);
        assert_eq!(p.stats().skipped, 1);
    }

    #[test]
    fn unrecognized_failure_is_fatal() {
        let (backend, calls) =
            MockBackend::failing_with([AcquireError::classify("device removed")]);
        let mut p = presenter(backend);

        assert!(p.tick().is_err());
        assert_eq!(calls.borrow().renders, 0);
    }

    #[test]
    fn render_failure_is_fatal_and_releases_the_image() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);
        p.backend_mut().fail_render = true;

        assert!(matches!(p.present_frame(), FrameOutcome::Fatal(_)));

        let calls = calls.borrow();
        assert_eq!(calls.live_images, 0);
        assert!(calls.presented.is_empty());
    }

    #[test]
    fn minimized_window_suspends_without_acquiring() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        assert!(!p.is_suspended());
        p.reconfigure(0, 0).unwrap();
        assert!(p.is_suspended());
        assert_eq!(p.tick().unwrap(), FrameStatus::Suspended);
        assert_eq!(calls.borrow().acquires, 0);

        p.reconfigure(320, 240).unwrap();
        assert_eq!(p.tick().unwrap(), FrameStatus::Presented);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn backend_reads_what_backend_mut_wrote() {
        let (backend, _calls) = MockBackend::new();
        let mut p = presenter(backend);
        p.backend_mut().fail_render = true;
        assert!(p.backend().fail_render);
    }

    #[test]
    fn zero_sized_init_fails_and_releases() {
        let (backend, calls) = MockBackend::new();
        let result = FramePresenter::new(backend, SurfaceConfig::new(0, 480, FMT));
        assert!(result.is_err());

        let calls = calls.borrow();
        assert!(calls.configures.is_empty());
        assert_eq!(calls.releases, 1);
    }

    #[test]
    fn rejected_init_releases_backend() {
        let (mut backend, calls) = MockBackend::new();
        backend.reject_configure = true;
        assert!(FramePresenter::new(backend, SurfaceConfig::new(640, 480, FMT)).is_err());
        assert_eq!(calls.borrow().releases, 1);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        p.shutdown();
        p.shutdown();
        assert!(p.is_released());
        drop(p);

        assert_eq!(calls.borrow().releases, 1);
    }

    #[test]
    fn drop_releases_once() {
        let (backend, calls) = MockBackend::new();
        drop(presenter(backend));
        assert_eq!(calls.borrow().releases, 1);
    }

    #[test]
    fn present_after_shutdown_is_fatal_without_backend_calls() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);
        p.shutdown();

        assert!(matches!(p.present_frame(), FrameOutcome::Fatal(_)));
        assert!(p.reconfigure(800, 600).is_err());
        assert_eq!(calls.borrow().acquires, 0);
    }

    #[test]
    fn ten_healthy_frames_configure_once() {
        let (backend, calls) = MockBackend::new();
        let mut p = presenter(backend);

        let outcomes: Vec<_> = (0..10).map(|_| p.present_frame()).collect();
        assert!(outcomes.iter().all(FrameOutcome::is_presented));

        let calls = calls.borrow();
        assert_eq!(calls.presented.len(), 10);
        assert_eq!(calls.configures.len(), 1);
        assert_eq!(calls.live_images, 0);
        assert_eq!(p.stats().presented, 10);
    }
}
