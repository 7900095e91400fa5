use std::time::{Duration, Instant};

/// Timing for one loop iteration.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

/// Produces a `FrameTime` per loop iteration.
///
/// Delta time is clamped so a stall (debugger, minimized window, long
/// reconfigure) does not turn into one huge animation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    max_dt: Duration,
}

impl FrameClock {
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_max_dt(Self::DEFAULT_MAX_DT)
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self {
            last: None,
            frame_index: 0,
            max_dt,
        }
    }

    /// Forgets the previous tick so the next one reports `dt = 0`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last))
            .min(self.max_dt);

        self.last = Some(now);

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
