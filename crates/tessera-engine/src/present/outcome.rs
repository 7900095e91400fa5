use crate::device::AcquireError;

/// Why the surface has to be rebuilt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceLoss {
    Lost,
    Outdated,
}

/// What the loop has to do after a recoverable frame failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Recovery {
    /// Rebuild the surface at the last known size, then try again next tick.
    Reconfigure(SurfaceLoss),
    /// Nothing to repair; try again next tick.
    Retry,
}

/// Result of one presentation attempt.
#[derive(Debug)]
pub enum FrameOutcome {
    Presented,
    Recoverable(Recovery),
    /// Unexpected driver error; the loop must stop.
    Fatal(anyhow::Error),
}

impl FrameOutcome {
    /// Maps an acquisition failure onto the recovery taxonomy.
    ///
    /// - Lost / Outdated: reconfigure
    /// - Timeout: retry
    /// - anything else: fatal
    pub fn from_acquire_error(err: AcquireError) -> Self {
        match err {
            AcquireError::Lost => Self::Recoverable(Recovery::Reconfigure(SurfaceLoss::Lost)),
            AcquireError::Outdated => {
                Self::Recoverable(Recovery::Reconfigure(SurfaceLoss::Outdated))
            }
            AcquireError::Timeout => Self::Recoverable(Recovery::Retry),
            err @ (AcquireError::OutOfMemory | AcquireError::Other(_)) => {
                Self::Fatal(anyhow::Error::new(err))
            }
        }
    }

    pub fn is_presented(&self) -> bool {
        matches!(self, Self::Presented)
    }

    pub fn needs_reconfigure(&self) -> bool {
        matches!(self, Self::Recoverable(Recovery::Reconfigure(_)))
    }
}

/// Loop-level result of one [`FramePresenter::tick`](super::FramePresenter::tick).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Presented,
    /// Acquisition timed out; nothing was drawn.
    Skipped,
    /// The surface was rebuilt after a loss; nothing was drawn.
    Reconfigured,
    /// The window has a zero dimension; no acquisition was attempted.
    Suspended,
}

/// Running counters kept by the presenter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PresentStats {
    pub presented: u64,
    pub skipped: u64,
    pub reconfigures: u64,
}
