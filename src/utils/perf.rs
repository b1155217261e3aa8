//! Frame timing statistics for the debug overlay

use std::collections::VecDeque;

/// Sliding window over recent frame times, in seconds
#[derive(Debug)]
pub struct FrameStats {
    samples: VecDeque<f64>,
    max_samples: usize,
    last_frame_at: Option<f64>,
}

impl FrameStats {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            last_frame_at: None,
        }
    }

    /// Record a frame boundary. `now` is the UI clock in seconds.
    pub fn on_frame(&mut self, now: f64) {
        if let Some(prev) = self.last_frame_at {
            let dt = now - prev;
            if dt > 0.0 {
                if self.samples.len() >= self.max_samples {
                    self.samples.pop_front();
                }
                self.samples.push_back(dt);
            }
        }
        self.last_frame_at = Some(now);
    }

    /// Average frames per second over the window
    pub fn fps(&self) -> f64 {
        let avg = self.average_frame_time();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Average frame time in seconds
    pub fn average_frame_time(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Worst frame time in the window, in seconds
    pub fn max_frame_time(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_frame_at = None;
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_over_steady_frames() {
        let mut stats = FrameStats::new(10);
        for i in 0..=10 {
            stats.on_frame(i as f64 / 60.0);
        }

        assert_eq!(stats.sample_count(), 10);
        assert!((stats.fps() - 60.0).abs() < 0.5);
        assert!((stats.average_frame_time() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut stats = FrameStats::new(3);
        // One slow frame followed by fast ones
        stats.on_frame(0.0);
        stats.on_frame(1.0);
        stats.on_frame(1.01);
        stats.on_frame(1.02);
        stats.on_frame(1.03);

        assert_eq!(stats.sample_count(), 3);
        assert!(stats.max_frame_time() < 0.5);
    }

    #[test]
    fn test_empty_stats_report_zero() {
        let stats = FrameStats::default();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.average_frame_time(), 0.0);
        assert_eq!(stats.max_frame_time(), 0.0);
    }

    #[test]
    fn test_clear_resets_reference_frame() {
        let mut stats = FrameStats::new(10);
        stats.on_frame(0.0);
        stats.on_frame(0.016);
        stats.clear();
        assert_eq!(stats.sample_count(), 0);

        // First frame after clear establishes a new baseline only
        stats.on_frame(100.0);
        assert_eq!(stats.sample_count(), 0);
        stats.on_frame(100.016);
        assert_eq!(stats.sample_count(), 1);
    }
}
