use std::time::{Duration, Instant};

/// Rolling frames-per-second counter.
///
/// Counts frames over a fixed window and reports the rate once per window.
/// The studio logs the reported value instead of drawing a stats overlay.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    last_fps: Option<f32>,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
            last_fps: None,
        }
    }

    /// Records one presented frame at `now`.
    ///
    /// Returns `Some(fps)` when a window just closed.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let span = now.saturating_duration_since(start);
        if span < self.window {
            return None;
        }

        let fps = self.frames as f32 / span.as_secs_f32();
        self.window_start = Some(now);
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Most recently reported rate.
    pub fn last(&self) -> Option<f32> {
        self.last_fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut fps = FpsCounter::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert_eq!(fps.record(t0), None);
        for i in 1..60 {
            assert_eq!(fps.record(t0 + Duration::from_millis(i * 16)), None);
        }
        let rate = fps.record(t0 + Duration::from_secs(1)).unwrap();
        assert!((rate - 61.0).abs() < 0.01);
        assert_eq!(fps.last(), Some(rate));
    }

    #[test]
    fn window_restarts_after_report() {
        let mut fps = FpsCounter::new(Duration::from_millis(500));
        let t0 = Instant::now();
        fps.record(t0);
        assert!(fps.record(t0 + Duration::from_millis(500)).is_some());
        assert_eq!(fps.record(t0 + Duration::from_millis(600)), None);
    }
}
