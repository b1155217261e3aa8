//! Waveform renderer boundary
//!
//! The event bridge drives whatever draws the waveform through this
//! trait, so the mapping logic stays testable without a window.

use crate::amplitude::BREATHING_BASE;
use crate::state::Speaker;
use parking_lot::Mutex;
use std::sync::Arc;

/// Color role for the waveform; the theme resolves it to a real color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaveColor {
    #[default]
    Idle,
    User,
    Assistant,
}

impl From<Speaker> for WaveColor {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => WaveColor::User,
            Speaker::Assistant => WaveColor::Assistant,
        }
    }
}

/// Operations the event bridge needs from a waveform renderer
pub trait WaveRenderer {
    fn start(&mut self);
    fn stop(&mut self);
    fn set_amplitude(&mut self, amplitude: f32);
    fn set_color(&mut self, color: WaveColor);
}

/// What the waveform should draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveFrame {
    pub running: bool,
    pub amplitude: f32,
    pub color: WaveColor,
}

impl Default for WaveFrame {
    fn default() -> Self {
        Self {
            running: false,
            amplitude: BREATHING_BASE,
            color: WaveColor::Idle,
        }
    }
}

/// Shared renderer target. The bridge writes into it from the event
/// side; the wave view widget reads it back when painting.
#[derive(Clone, Default)]
pub struct WaveSurface {
    inner: Arc<Mutex<WaveFrame>>,
}

impl WaveSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> WaveFrame {
        *self.inner.lock()
    }
}

impl WaveRenderer for WaveSurface {
    fn start(&mut self) {
        self.inner.lock().running = true;
    }

    fn stop(&mut self) {
        self.inner.lock().running = false;
    }

    fn set_amplitude(&mut self, amplitude: f32) {
        self.inner.lock().amplitude = amplitude;
    }

    fn set_color(&mut self, color: WaveColor) {
        self.inner.lock().color = color;
    }
}
