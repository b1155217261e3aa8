//! Reactive state store
//!
//! One mutable [`AssistantSnapshot`] behind a cheaply cloneable handle,
//! mutated only through partial merges. Every update appends a history
//! entry and synchronously notifies subscribers: key-scoped callbacks
//! first (for keys whose value actually changed, in field declaration
//! order, registration order within a key), then every wildcard callback
//! exactly once.
//!
//! Callbacks run after the internal lock is released, on a drained list,
//! so a callback may unsubscribe or issue a nested `update` without
//! deadlocking; such re-entrant effects apply from the next update.

use super::snapshot::{AssistantSnapshot, HistoryEntry, StateKey, StateUpdate, ThemeMode};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Most recent history entries retained
const HISTORY_CAP: usize = 256;

/// Callback invoked with the new and previous snapshots
pub type StateCallback = Arc<dyn Fn(&AssistantSnapshot, &AssistantSnapshot) + Send + Sync>;

/// Token returned by `subscribe`/`subscribe_all`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct KeySubscriber {
    id: SubscriptionId,
    key: StateKey,
    callback: StateCallback,
}

struct WildcardSubscriber {
    id: SubscriptionId,
    callback: StateCallback,
}

struct StoreInner {
    state: AssistantSnapshot,
    history: VecDeque<HistoryEntry>,
    key_subscribers: Vec<KeySubscriber>,
    wildcard_subscribers: Vec<WildcardSubscriber>,
    next_id: u64,
}

impl StoreInner {
    /// Merge the partial into the live state, returning the keys whose
    /// value changed, in field declaration order.
    fn apply(&mut self, partial: StateUpdate) -> Vec<StateKey> {
        let mut changed = Vec::new();
        let state = &mut self.state;

        if let Some(v) = partial.is_active {
            if state.is_active != v {
                state.is_active = v;
                changed.push(StateKey::IsActive);
            }
        }
        if let Some(v) = partial.is_speaking {
            if state.is_speaking != v {
                state.is_speaking = v;
                changed.push(StateKey::IsSpeaking);
            }
        }
        if let Some(v) = partial.is_listening {
            if state.is_listening != v {
                state.is_listening = v;
                changed.push(StateKey::IsListening);
            }
        }
        if let Some(v) = partial.current_transcript {
            if state.current_transcript != v {
                state.current_transcript = v;
                changed.push(StateKey::CurrentTranscript);
            }
        }
        if let Some(v) = partial.current_speaker {
            if state.current_speaker != v {
                state.current_speaker = v;
                changed.push(StateKey::CurrentSpeaker);
            }
        }
        if let Some(v) = partial.theme {
            if state.theme != v {
                state.theme = v;
                changed.push(StateKey::Theme);
            }
        }
        if let Some(v) = partial.volume {
            if state.volume != v {
                state.volume = v;
                changed.push(StateKey::Volume);
            }
        }
        if let Some(v) = partial.error {
            if state.error != v {
                state.error = v;
                changed.push(StateKey::Error);
            }
        }

        changed
    }

    fn push_history(&mut self, previous: AssistantSnapshot, current: AssistantSnapshot) {
        if self.history.len() >= HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            timestamp: Utc::now(),
            previous,
            current,
        });
    }
}

/// Handle to the shared state store
///
/// Constructed explicitly and passed to whoever needs it; clones share
/// the same underlying state.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl StateStore {
    /// Create a store with the given initial theme; everything else
    /// starts at its default value
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state: AssistantSnapshot {
                    theme,
                    ..Default::default()
                },
                history: VecDeque::new(),
                key_subscribers: Vec::new(),
                wildcard_subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> AssistantSnapshot {
        self.inner.lock().state.clone()
    }

    /// Merge a partial update, record history, notify subscribers.
    ///
    /// Key-specific callbacks fire for each changed key; wildcard
    /// callbacks fire once per call whether or not anything changed.
    pub fn update(&self, partial: StateUpdate) {
        let (old, new, to_notify) = {
            let mut inner = self.inner.lock();
            let old = inner.state.clone();
            let changed = inner.apply(partial);
            let new = inner.state.clone();
            inner.push_history(old.clone(), new.clone());

            let mut to_notify: Vec<StateCallback> = Vec::new();
            for key in &changed {
                for sub in inner.key_subscribers.iter().filter(|s| s.key == *key) {
                    to_notify.push(Arc::clone(&sub.callback));
                }
            }
            for sub in &inner.wildcard_subscribers {
                to_notify.push(Arc::clone(&sub.callback));
            }
            (old, new, to_notify)
        };

        for callback in to_notify {
            callback(&new, &old);
        }
    }

    /// Register a callback for one state key.
    ///
    /// It fires whenever an update changes that key's value, receiving
    /// the new and previous snapshots. Multiple registrations, including
    /// duplicates of the same callback, fire in registration order.
    pub fn subscribe<F>(&self, key: StateKey, callback: F) -> SubscriptionId
    where
        F: Fn(&AssistantSnapshot, &AssistantSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.key_subscribers.push(KeySubscriber {
            id,
            key,
            callback: Arc::new(callback),
        });
        id
    }

    /// Register a callback for every update call.
    ///
    /// Wildcard callbacks live in their own list (no reserved key) and
    /// fire after all key-specific callbacks of the same update.
    pub fn subscribe_all<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&AssistantSnapshot, &AssistantSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.wildcard_subscribers.push(WildcardSubscriber {
            id,
            callback: Arc::new(callback),
        });
        id
    }

    /// Remove a subscription; returns whether it was found.
    ///
    /// Safe to call from inside a callback; delivery already collected
    /// for the in-flight update still completes.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        if let Some(pos) = inner.key_subscribers.iter().position(|s| s.id == id) {
            inner.key_subscribers.remove(pos);
            return true;
        }
        if let Some(pos) = inner.wildcard_subscribers.iter().position(|s| s.id == id) {
            inner.wildcard_subscribers.remove(pos);
            return true;
        }
        false
    }

    /// Restore every field except `theme` to its initial value
    pub fn reset(&self) {
        self.update(StateUpdate::reset_fields());
    }

    /// Change the theme through the normal update path
    pub fn set_theme(&self, theme: ThemeMode) {
        self.update(StateUpdate::default().theme(theme));
    }

    /// Flip the theme, returning the new mode
    pub fn toggle_theme(&self) -> ThemeMode {
        let next = self.snapshot().theme.toggled();
        self.set_theme(next);
        next
    }

    /// Cloned copy of the retained history
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.inner.lock().history.iter().cloned().collect()
    }

    /// Number of retained history entries
    pub fn history_len(&self) -> usize {
        self.inner.lock().history.len()
    }

    /// Drop all history entries
    pub fn clear_history(&self) {
        self.inner.lock().history.clear();
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::snapshot::Speaker;

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let store = StateStore::default();
        store.update(StateUpdate::default().active(true).transcript("hello"));

        let snapshot = store.snapshot();
        assert!(snapshot.is_active);
        assert_eq!(snapshot.current_transcript, "hello");
        assert!(!snapshot.is_speaking);
        assert_eq!(snapshot.volume, 0.0);
    }

    #[test]
    fn test_sequential_updates_compose() {
        let store = StateStore::default();
        store.update(StateUpdate::default().active(true));
        store.update(StateUpdate::default().speaking(true).speaker(Some(Speaker::User)));
        store.update(StateUpdate::default().volume(0.4));

        let snapshot = store.snapshot();
        assert!(snapshot.is_active);
        assert!(snapshot.is_speaking);
        assert_eq!(snapshot.current_speaker, Some(Speaker::User));
        assert_eq!(snapshot.volume, 0.4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = StateStore::default();
        let before = store.snapshot();
        store.update(StateUpdate::default().active(true));
        assert!(!before.is_active);
        assert!(store.snapshot().is_active);
    }

    #[test]
    fn test_merge_result_independent_of_subscribers() {
        let bare = StateStore::default();
        let observed = StateStore::default();
        let _ = observed.subscribe(StateKey::IsActive, |_, _| {});
        let _ = observed.subscribe_all(|_, _| {});

        for store in [&bare, &observed] {
            store.update(StateUpdate::default().active(true).volume(0.7));
            store.update(StateUpdate::default().transcript("abc"));
        }
        assert_eq!(bare.snapshot(), observed.snapshot());
    }

    #[test]
    fn test_key_callback_receives_new_and_old() {
        let store = StateStore::default();
        let seen: Arc<Mutex<Vec<(bool, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_in_cb = Arc::clone(&seen);

        store.subscribe(StateKey::IsActive, move |new, old| {
            seen_in_cb.lock().push((new.is_active, old.is_active));
        });

        store.update(StateUpdate::default().active(true));
        store.update(StateUpdate::default().active(false));

        assert_eq!(*seen.lock(), vec![(true, false), (false, true)]);
    }

    #[test]
    fn test_key_callback_skipped_when_value_unchanged() {
        let store = StateStore::default();
        let count = Arc::new(Mutex::new(0usize));
        let count_in_cb = Arc::clone(&count);

        store.subscribe(StateKey::Volume, move |_, _| {
            *count_in_cb.lock() += 1;
        });

        store.update(StateUpdate::default().volume(0.5));
        store.update(StateUpdate::default().volume(0.5));
        store.update(StateUpdate::default().volume(0.6));

        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_wildcard_fires_once_per_update_even_without_changes() {
        let store = StateStore::default();
        let count = Arc::new(Mutex::new(0usize));
        let count_in_cb = Arc::clone(&count);

        store.subscribe_all(move |_, _| {
            *count_in_cb.lock() += 1;
        });

        store.update(StateUpdate::default());
        store.update(StateUpdate::default().active(true).volume(0.9));
        store.update(StateUpdate::default().active(true));

        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn test_key_callbacks_before_wildcard_in_declaration_order() {
        let store = StateStore::default();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&order);
        store.subscribe(StateKey::Volume, move |_, _| log.lock().push("volume"));
        let log = Arc::clone(&order);
        store.subscribe(StateKey::IsActive, move |_, _| log.lock().push("active"));
        let log = Arc::clone(&order);
        store.subscribe_all(move |_, _| log.lock().push("wildcard"));

        // Volume was registered first, but IsActive is declared earlier
        store.update(StateUpdate::default().volume(0.3).active(true));

        assert_eq!(*order.lock(), vec!["active", "volume", "wildcard"]);
    }

    #[test]
    fn test_registration_order_within_one_key() {
        let store = StateStore::default();
        let order: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));

        for tag in 0u8..3 {
            let log = Arc::clone(&order);
            store.subscribe(StateKey::IsActive, move |_, _| log.lock().push(tag));
        }

        store.update(StateUpdate::default().active(true));
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_registration_is_independent() {
        let store = StateStore::default();
        let count = Arc::new(Mutex::new(0usize));

        let bump = {
            let count = Arc::clone(&count);
            move |_: &AssistantSnapshot, _: &AssistantSnapshot| {
                *count.lock() += 1;
            }
        };
        let first = store.subscribe(StateKey::IsActive, bump.clone());
        let _second = store.subscribe(StateKey::IsActive, bump);

        store.update(StateUpdate::default().active(true));
        assert_eq!(*count.lock(), 2);

        assert!(store.unsubscribe(first));
        store.update(StateUpdate::default().active(false));
        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = StateStore::default();
        let count = Arc::new(Mutex::new(0usize));
        let count_in_cb = Arc::clone(&count);

        let id = store.subscribe(StateKey::Volume, move |_, _| {
            *count_in_cb.lock() += 1;
        });

        store.update(StateUpdate::default().volume(0.1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        for i in 0..10 {
            store.update(StateUpdate::default().volume(0.2 + i as f32 * 0.01));
        }
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_unsubscribe_inside_callback_applies_next_update() {
        let store = StateStore::default();
        let count = Arc::new(Mutex::new(0usize));
        let id_cell: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let count_in_cb = Arc::clone(&count);
        let id_in_cb = Arc::clone(&id_cell);
        let store_in_cb = store.clone();
        let id = store.subscribe(StateKey::IsActive, move |_, _| {
            *count_in_cb.lock() += 1;
            if let Some(id) = id_in_cb.lock().take() {
                store_in_cb.unsubscribe(id);
            }
        });
        *id_cell.lock() = Some(id);

        store.update(StateUpdate::default().active(true));
        store.update(StateUpdate::default().active(false));

        // First update delivered, then the self-removal took effect
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_nested_update_from_callback_does_not_deadlock() {
        let store = StateStore::default();
        let store_in_cb = store.clone();
        store.subscribe(StateKey::Error, move |new, _| {
            if new.error.is_some() {
                store_in_cb.update(StateUpdate::default().listening(false));
            }
        });

        store.update(
            StateUpdate::default()
                .listening(true)
                .error(Some("boom".to_string())),
        );

        let snapshot = store.snapshot();
        assert!(!snapshot.is_listening);
        assert_eq!(snapshot.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_reset_restores_defaults_but_keeps_theme() {
        let store = StateStore::new(ThemeMode::Light);
        store.update(
            StateUpdate::default()
                .active(true)
                .speaking(true)
                .speaker(Some(Speaker::Assistant))
                .transcript("hi there")
                .volume(0.8)
                .error(Some("x".to_string())),
        );

        store.reset();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.theme, ThemeMode::Light);
        assert!(!snapshot.is_active);
        assert!(!snapshot.is_speaking);
        assert!(snapshot.current_transcript.is_empty());
        assert_eq!(snapshot.current_speaker, None);
        assert_eq!(snapshot.volume, 0.0);
        assert_eq!(snapshot.error, None);
    }

    #[test]
    fn test_reset_twice_is_idempotent() {
        let store = StateStore::default();
        store.update(StateUpdate::default().active(true).volume(0.5));

        store.reset();
        let after_first = store.snapshot();

        let key_hits = Arc::new(Mutex::new(0usize));
        let hits_in_cb = Arc::clone(&key_hits);
        store.subscribe(StateKey::IsActive, move |_, _| {
            *hits_in_cb.lock() += 1;
        });

        store.reset();
        assert_eq!(store.snapshot(), after_first);
        // Nothing changed, so no key notification fired
        assert_eq!(*key_hits.lock(), 0);
    }

    #[test]
    fn test_history_appended_on_every_update() {
        let store = StateStore::default();
        store.update(StateUpdate::default().active(true));
        store.update(StateUpdate::default());
        store.update(StateUpdate::default().active(true));

        assert_eq!(store.history_len(), 3);

        let history = store.history();
        assert!(!history[0].previous.is_active);
        assert!(history[0].current.is_active);
        // No-change entries still record identical before/after pairs
        assert_eq!(history[1].previous, history[1].current);
    }

    #[test]
    fn test_history_capped() {
        let store = StateStore::default();
        for i in 0..(HISTORY_CAP + 40) {
            store.update(StateUpdate::default().volume(i as f32));
        }
        assert_eq!(store.history_len(), HISTORY_CAP);

        // Oldest entries were discarded
        let history = store.history();
        assert_eq!(history[0].current.volume, 40.0);
    }

    #[test]
    fn test_clear_history() {
        let store = StateStore::default();
        store.update(StateUpdate::default().active(true));
        assert_eq!(store.history_len(), 1);
        store.clear_history();
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        let store = StateStore::new(ThemeMode::Dark);
        assert_eq!(store.toggle_theme(), ThemeMode::Light);
        assert_eq!(store.snapshot().theme, ThemeMode::Light);
        assert_eq!(store.toggle_theme(), ThemeMode::Dark);
    }
}
