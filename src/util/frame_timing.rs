//! Frame pacing and smoothed FPS measurement.

use web_time::{Duration, Instant};

/// Frame timing with FPS calculation and frame limiting.
///
/// The redraw loop asks [`should_render`](Self::should_render) before each
/// paint and calls [`end_frame`](Self::end_frame) after it; retargeting via
/// [`set_target_fps`](Self::set_target_fps) simply replaces the minimum
/// frame duration, so reconfiguring an already-active limiter is
/// idempotent.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: f64,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Duration of the most recent frame
    last_frame_time: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: f64) -> Self {
        let mut timing = Self {
            target_fps: 0.0,
            min_frame_duration: Duration::ZERO,
            last_frame: Instant::now(),
            last_frame_time: Duration::ZERO,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        };
        timing.set_target_fps(target_fps);
        timing
    }

    /// Reconfigure the redraw interval to `1/fps` seconds (0 = unlimited).
    ///
    /// Non-finite or negative targets are treated as unlimited.
    pub fn set_target_fps(&mut self, fps: f64) {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 0.0 };
        self.target_fps = fps;
        self.min_frame_duration = if fps > 0.0 {
            Duration::from_secs_f64(1.0 / fps)
        } else {
            Duration::ZERO
        };
    }

    /// The current FPS target (0 = unlimited).
    #[must_use]
    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    /// Call at the start of each frame. Returns true if enough time has
    /// passed to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0.0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.last_frame_time = elapsed;

        // Calculate instantaneous FPS
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Duration of the most recent frame, in milliseconds.
    #[must_use]
    pub fn frame_time_ms(&self) -> f32 {
        self.last_frame_time.as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_target_always_renders() {
        let timing = FrameTiming::new(0.0);
        assert!(timing.should_render());
    }

    #[test]
    fn retargeting_replaces_the_interval() {
        let mut timing = FrameTiming::new(60.0);
        timing.set_target_fps(30.0);
        timing.set_target_fps(30.0); // idempotent
        assert_eq!(timing.target_fps(), 30.0);
    }

    #[test]
    fn degenerate_targets_fall_back_to_unlimited() {
        let mut timing = FrameTiming::new(-5.0);
        assert_eq!(timing.target_fps(), 0.0);
        timing.set_target_fps(f64::NAN);
        assert_eq!(timing.target_fps(), 0.0);
        assert!(timing.should_render());
    }

    #[test]
    fn end_frame_records_frame_time() {
        let mut timing = FrameTiming::new(0.0);
        std::thread::sleep(Duration::from_millis(2));
        timing.end_frame();
        assert!(timing.frame_time_ms() >= 1.0);
        assert!(timing.fps() > 0.0);
    }
}
