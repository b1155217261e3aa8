//! Application configuration
//!
//! Centralized configuration for the session client and the waveform
//! surface. Animation tuning constants live in the amplitude module.

use uuid::Uuid;

/// Credentials handed opaquely to the session backend
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Public API key for the voice backend
    pub public_key: Uuid,

    /// Assistant to connect to when a call starts
    pub assistant_id: Uuid,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            public_key: Uuid::nil(),
            assistant_id: Uuid::nil(),
        }
    }
}

impl SessionConfig {
    /// Read credentials from `MURMUR_PUBLIC_KEY` / `MURMUR_ASSISTANT_ID`,
    /// keeping the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("MURMUR_PUBLIC_KEY") {
            if let Ok(key) = raw.parse() {
                config.public_key = key;
            }
        }
        if let Ok(raw) = std::env::var("MURMUR_ASSISTANT_ID") {
            if let Ok(id) = raw.parse() {
                config.assistant_id = id;
            }
        }
        config
    }
}

/// Geometry and pacing of the rendered waveform
#[derive(Clone, Debug, PartialEq)]
pub struct WaveformConfig {
    /// Height of the waveform strip in points
    pub height: f32,

    /// Horizontal phase speed of the curves
    pub speed: f32,

    /// Master scale applied on top of the smoothed amplitude
    pub master_amplitude: f32,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            height: 120.0,
            speed: 0.15,
            master_amplitude: 2.0,
        }
    }
}

/// Configuration for the complete application
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Session credentials
    pub session: SessionConfig,

    /// Waveform surface settings
    pub waveform: WaveformConfig,

    /// How long an error message overrides the transcript area, in seconds
    pub error_display_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            waveform: WaveformConfig::default(),
            error_display_secs: 5.0,
        }
    }
}

impl AppConfig {
    /// Build a configuration with credentials from the environment
    pub fn from_env() -> Self {
        Self {
            session: SessionConfig::from_env(),
            ..Self::default()
        }
    }

    /// Set the session credentials
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Set the waveform strip height
    pub fn with_waveform_height(mut self, height: f32) -> Self {
        self.waveform.height = height;
        self
    }

    /// Set the error display duration
    pub fn with_error_display_secs(mut self, secs: f64) -> Self {
        self.error_display_secs = secs;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.waveform.height <= 0.0 {
            return Err(format!(
                "Waveform height must be positive, got {}",
                self.waveform.height
            ));
        }
        if self.waveform.speed <= 0.0 {
            return Err(format!(
                "Waveform speed must be positive, got {}",
                self.waveform.speed
            ));
        }
        if self.waveform.master_amplitude <= 0.0 {
            return Err(format!(
                "Waveform master amplitude must be positive, got {}",
                self.waveform.master_amplitude
            ));
        }
        if self.error_display_secs <= 0.0 {
            return Err(format!(
                "Error display duration must be positive, got {}",
                self.error_display_secs
            ));
        }
        Ok(())
    }
}
