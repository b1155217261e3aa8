//! Amplitude smoothing
//!
//! Derives the waveform's displayed amplitude from intermittent volume
//! samples, falling back to a slow breathing oscillation when the signal
//! goes quiet. The tick takes an explicit `now` in seconds so tests can
//! drive it with virtual time; in the app it is fed the egui input clock
//! once per frame.

/// Amplitude floor, also the resting value between calls
pub const BREATHING_BASE: f32 = 1.0;

/// Peak deviation of the idle oscillation
pub const BREATHING_RANGE: f32 = 1.5;

/// Angular speed of the idle oscillation, radians per second
pub const BREATHING_SPEED: f64 = 1.5;

/// Scale from a 0..1 volume level to waveform amplitude
pub const AMPLITUDE_MULTIPLIER: f32 = 5.0;

/// Seconds without a volume sample before falling back to breathing
pub const IDLE_TIMEOUT: f64 = 0.3;

/// Per-tick fraction of the remaining distance to the target
pub const SMOOTHING_FACTOR: f32 = 0.1;

/// Smoothed amplitude signal
///
/// Volume samples set the target directly; every tick moves the displayed
/// value a fixed fraction of the way toward it. The breathing target is a
/// function of wall-clock time, not tick count, so its period does not
/// depend on the frame rate.
#[derive(Debug, Clone)]
pub struct AmplitudeController {
    last_volume: f32,
    last_volume_at: f64,
    idle: bool,
    target: f32,
    displayed: f32,
}

impl AmplitudeController {
    pub fn new() -> Self {
        Self {
            last_volume: 0.0,
            last_volume_at: 0.0,
            idle: true,
            target: BREATHING_BASE,
            displayed: BREATHING_BASE,
        }
    }

    /// Feed one volume sample from the session.
    ///
    /// The target is floored at [`BREATHING_BASE`] so silence never drops
    /// the waveform below its resting height.
    pub fn volume_sample(&mut self, volume: f32, now: f64) {
        self.last_volume = volume;
        self.last_volume_at = now;
        self.idle = false;
        self.target = (volume * AMPLITUDE_MULTIPLIER).max(BREATHING_BASE);
    }

    /// Advance one frame, returning the new displayed amplitude
    pub fn tick(&mut self, now: f64) -> f32 {
        if now - self.last_volume_at > IDLE_TIMEOUT {
            self.idle = true;
        }

        if self.idle {
            self.target =
                BREATHING_BASE + ((now * BREATHING_SPEED).sin() as f32) * BREATHING_RANGE;
        }

        self.displayed += (self.target - self.displayed) * SMOOTHING_FACTOR;
        self.displayed
    }

    /// Leave idle mode without a volume sample (session start)
    pub fn wake(&mut self) {
        self.idle = false;
    }

    /// Snap back to the resting state (session end)
    pub fn reset(&mut self) {
        self.idle = true;
        self.target = BREATHING_BASE;
        self.displayed = BREATHING_BASE;
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    pub fn last_volume(&self) -> f32 {
        self.last_volume
    }
}

impl Default for AmplitudeController {
    fn default() -> Self {
        Self::new()
    }
}
