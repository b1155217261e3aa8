//! Application state: snapshot types, partial updates, and the reactive
//! store that fans changes out to subscribers.

pub mod snapshot;
pub mod store;

pub use snapshot::{
    AssistantSnapshot, HistoryEntry, Speaker, StateKey, StateUpdate, StatusKind, ThemeMode,
};
pub use store::{StateStore, SubscriptionId};
