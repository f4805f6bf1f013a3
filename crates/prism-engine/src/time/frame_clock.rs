use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Time elapsed since the clock was created (or last reset), in seconds.
    ///
    /// Accumulated from clamped deltas, so long stalls do not make it jump.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without touching `elapsed`.
    ///
    /// Call after initialization finishes so that the first frame does not see
    /// the asset-loading time as its interval.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        self.advance(now, now.saturating_duration_since(self.last))
    }

    fn advance(&mut self, now: Instant, raw: Duration) -> FrameTime {
        let dt = raw.clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_clamped_to_max() {
        let mut clock = FrameClock::new();
        let ft = clock.advance(Instant::now(), Duration::from_secs(5));
        assert_eq!(ft.dt, 0.25);
    }

    #[test]
    fn delta_is_clamped_to_min() {
        let mut clock = FrameClock::new();
        let ft = clock.advance(Instant::now(), Duration::ZERO);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn elapsed_accumulates_clamped_deltas() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        clock.advance(now, Duration::from_millis(100));
        clock.advance(now, Duration::from_secs(10)); // clamped to 0.25
        let ft = clock.advance(now, Duration::from_millis(50));
        assert!((ft.elapsed - 0.4).abs() < 1e-5);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }
}
