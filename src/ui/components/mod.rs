//! Reusable UI components

pub mod call_button;
pub mod debug_panel;
pub mod status_badge;
pub mod transcript_card;
pub mod wave_view;

pub use call_button::{CallButton, CallButtonState};
pub use debug_panel::DebugPanel;
pub use status_badge::StatusBadge;
pub use transcript_card::{TranscriptCard, PLACEHOLDER_TEXT};
pub use wave_view::WaveView;
