pub mod client;
pub mod events;
pub mod scripted;

pub use client::SessionHandle;
pub use events::{SessionCommand, SessionEvent};
pub use scripted::ScriptedSession;
