pub mod channels;
pub mod perf;
pub mod prefs;

pub use channels::SessionChannels;
pub use perf::FrameStats;
pub use prefs::UserPrefs;
