pub mod bridge;
pub mod renderer;

pub use bridge::{EventAdapter, LISTENING_TEXT};
pub use renderer::{WaveColor, WaveFrame, WaveRenderer, WaveSurface};
