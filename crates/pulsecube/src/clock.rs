//! Frame timing.

use std::time::Instant;

/// Longest frame delta handed to the simulation, in seconds.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Timing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped to [`MAX_FRAME_DT`].
    pub dt: f32,
    /// Seconds since the clock started.
    pub now: f64,
}

/// Produces clamped frame deltas from a monotonic clock.
///
/// The first frame after creation or [`reset`](Self::reset) has a zero delta,
/// so resuming after a pause never replays the time spent hidden.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a clock starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose time origin is `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: None }
    }

    /// Forgets the previous frame.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Timing for a frame happening now.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Timing for a frame happening at `at`.
    pub fn tick_at(&mut self, at: Instant) -> FrameTime {
        let dt = self
            .last
            .map_or(0.0, |last| at.saturating_duration_since(last).as_secs_f32())
            .min(MAX_FRAME_DT);
        self.last = Some(at);
        FrameTime {
            dt,
            now: at.saturating_duration_since(self.start).as_secs_f64(),
        }
    }
}
