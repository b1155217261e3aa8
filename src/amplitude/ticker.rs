//! Frame loop lifecycle
//!
//! The per-frame amplitude tick runs while this ticker is running and
//! stops when it is cancelled. Cancellation is idempotent: cancelling a
//! ticker that never started, or twice, is a no-op.

#[derive(Debug, Default)]
pub struct FrameTicker {
    running: bool,
    started_at: Option<f64>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking; a second start while running keeps the original
    /// start time
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.started_at = Some(now);
    }

    /// Stop ticking
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since start, if running
    pub fn uptime(&self, now: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.started_at.map(|t| now - t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped() {
        let ticker = FrameTicker::new();
        assert!(!ticker.is_running());
        assert_eq!(ticker.uptime(5.0), None);
    }

    #[test]
    fn test_cancel_before_start_is_noop() {
        let mut ticker = FrameTicker::new();
        ticker.cancel();
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_start_and_cancel() {
        let mut ticker = FrameTicker::new();
        ticker.start(1.0);
        assert!(ticker.is_running());
        assert_eq!(ticker.uptime(3.5), Some(2.5));

        ticker.cancel();
        assert!(!ticker.is_running());

        // Second cancel is harmless
        ticker.cancel();
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_restart_keeps_original_start_while_running() {
        let mut ticker = FrameTicker::new();
        ticker.start(1.0);
        ticker.start(9.0);
        assert_eq!(ticker.uptime(10.0), Some(9.0));

        ticker.cancel();
        ticker.start(20.0);
        assert_eq!(ticker.uptime(21.0), Some(1.0));
    }
}
