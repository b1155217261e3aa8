//! Waveform amplitude signal: smoothing controller and the frame-loop
//! ticker that drives it.

pub mod controller;
pub mod ticker;

pub use controller::{
    AmplitudeController, AMPLITUDE_MULTIPLIER, BREATHING_BASE, BREATHING_RANGE, BREATHING_SPEED,
    IDLE_TIMEOUT, SMOOTHING_FACTOR,
};
pub use ticker::FrameTicker;
