//! Store-to-widget bindings
//!
//! The widgets never poll the store directly for text. Instead this
//! binding layer subscribes to the keys it cares about and caches the
//! derived strings, so what the screen shows is exactly what the
//! notification path delivered. Errors are latched here for a fixed
//! display window, outliving the store reset that follows them.

use crate::state::{Speaker, StateKey, StateStore, StateUpdate, StatusKind, SubscriptionId};
use parking_lot::Mutex;
use std::sync::Arc;

/// An error being displayed; `shown_at` is stamped on the first frame
/// that renders it
#[derive(Debug, Clone)]
struct ErrorFlash {
    message: String,
    shown_at: Option<f64>,
}

#[derive(Debug, Default)]
struct BindingCache {
    status_line: String,
    status_kind: Option<StatusKind>,
    transcript: String,
    speaker: Option<Speaker>,
    error_flash: Option<ErrorFlash>,
}

/// Subscription-backed cache of everything the widgets display
pub struct UiBindings {
    store: StateStore,
    cache: Arc<Mutex<BindingCache>>,
    subscriptions: Vec<SubscriptionId>,
    error_display_secs: f64,
}

impl UiBindings {
    pub fn new(store: StateStore, error_display_secs: f64) -> Self {
        let cache = Arc::new(Mutex::new(BindingCache::default()));

        // Seed from whatever the store already holds
        {
            let snapshot = store.snapshot();
            let mut seeded = cache.lock();
            seeded.status_line = snapshot.status_text().to_string();
            seeded.status_kind = Some(snapshot.status_kind());
            seeded.transcript = snapshot.current_transcript.clone();
            seeded.speaker = snapshot.current_speaker;
        }

        let mut subscriptions = Vec::new();

        let transcript_cache = Arc::clone(&cache);
        subscriptions.push(store.subscribe(StateKey::CurrentTranscript, move |new, _old| {
            transcript_cache.lock().transcript = new.current_transcript.clone();
        }));

        let speaker_cache = Arc::clone(&cache);
        subscriptions.push(store.subscribe(StateKey::CurrentSpeaker, move |new, _old| {
            speaker_cache.lock().speaker = new.current_speaker;
        }));

        // Errors latch a flash; the reset that follows clears the store
        // field but must not blank the message mid-display
        let error_cache = Arc::clone(&cache);
        subscriptions.push(store.subscribe(StateKey::Error, move |new, _old| {
            if let Some(message) = &new.error {
                error_cache.lock().error_flash = Some(ErrorFlash {
                    message: message.clone(),
                    shown_at: None,
                });
            }
        }));

        // The status line mixes several flags, so derive it on every
        // update rather than tracking each input key
        let status_cache = Arc::clone(&cache);
        subscriptions.push(store.subscribe_all(move |new, _old| {
            let mut cache = status_cache.lock();
            cache.status_line = new.status_text().to_string();
            cache.status_kind = Some(new.status_kind());
        }));

        Self {
            store,
            cache,
            subscriptions,
            error_display_secs,
        }
    }

    /// Advance the error display window. Call once per frame before
    /// reading [`error_message`](Self::error_message). When the window
    /// closes, any error still sitting in the store is cleared too.
    pub fn tick(&self, now: f64) {
        let expired = {
            let mut cache = self.cache.lock();
            match cache.error_flash.as_mut() {
                Some(flash) => match flash.shown_at {
                    None => {
                        flash.shown_at = Some(now);
                        false
                    }
                    Some(shown_at) if now - shown_at > self.error_display_secs => {
                        cache.error_flash = None;
                        true
                    }
                    Some(_) => false,
                },
                None => false,
            }
        };
        // The store callbacks take the cache lock, so it must be
        // released before updating
        if expired && self.store.snapshot().error.is_some() {
            self.store.update(StateUpdate::default().error(None));
        }
    }

    pub fn status_line(&self) -> String {
        self.cache.lock().status_line.clone()
    }

    pub fn status_kind(&self) -> StatusKind {
        self.cache.lock().status_kind.unwrap_or(StatusKind::Idle)
    }

    pub fn transcript(&self) -> String {
        self.cache.lock().transcript.clone()
    }

    pub fn speaker(&self) -> Option<Speaker> {
        self.cache.lock().speaker
    }

    pub fn speaker_label(&self) -> Option<&'static str> {
        self.cache.lock().speaker.map(|s| s.label())
    }

    /// The error currently being flashed, if its window is still open
    pub fn error_message(&self) -> Option<String> {
        self.cache
            .lock()
            .error_flash
            .as_ref()
            .map(|flash| flash.message.clone())
    }

    pub fn has_error(&self) -> bool {
        self.cache.lock().error_flash.is_some()
    }
}

impl Drop for UiBindings {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.store.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Speaker, StateUpdate, ThemeMode};

    fn store() -> StateStore {
        StateStore::new(ThemeMode::Dark)
    }

    #[test]
    fn test_initial_cache_matches_snapshot() {
        let store = store();
        let bindings = UiBindings::new(store, 5.0);

        assert_eq!(bindings.status_line(), "Ready");
        assert_eq!(bindings.status_kind(), StatusKind::Idle);
        assert_eq!(bindings.transcript(), "");
        assert_eq!(bindings.speaker_label(), None);
        assert!(!bindings.has_error());
    }

    #[test]
    fn test_transcript_and_speaker_follow_updates() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        store.update(
            StateUpdate::default()
                .transcript("hello world")
                .speaker(Some(Speaker::Assistant)),
        );

        assert_eq!(bindings.transcript(), "hello world");
        assert_eq!(bindings.speaker_label(), Some("Assistant"));
    }

    #[test]
    fn test_status_line_tracks_activity() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        store.update(StateUpdate::default().active(true));
        assert_eq!(bindings.status_line(), "Active");
        assert_eq!(bindings.status_kind(), StatusKind::Active);

        store.update(
            StateUpdate::default()
                .speaking(true)
                .speaker(Some(Speaker::User)),
        );
        assert_eq!(bindings.status_line(), "You are speaking");
        assert_eq!(bindings.status_kind(), StatusKind::UserSpeaking);
    }

    #[test]
    fn test_error_flash_expires_after_window() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        store.update(StateUpdate::default().error(Some("boom".to_string())));
        assert_eq!(bindings.error_message().as_deref(), Some("boom"));

        // First rendered frame stamps the start of the window
        bindings.tick(10.0);
        bindings.tick(14.9);
        assert_eq!(bindings.error_message().as_deref(), Some("boom"));

        bindings.tick(15.1);
        assert_eq!(bindings.error_message(), None);
    }

    #[test]
    fn test_error_flash_survives_reset() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        store.update(StateUpdate::default().error(Some("network down".to_string())));
        store.reset();

        assert_eq!(store.snapshot().error, None);
        assert_eq!(bindings.error_message().as_deref(), Some("network down"));
    }

    #[test]
    fn test_new_error_replaces_flash_and_restarts_window() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        store.update(StateUpdate::default().error(Some("first".to_string())));
        bindings.tick(0.0);

        store.update(StateUpdate::default().error(Some("second".to_string())));
        bindings.tick(4.0);

        // The window restarted with the replacement message
        bindings.tick(8.9);
        assert_eq!(bindings.error_message().as_deref(), Some("second"));
        bindings.tick(9.1);
        assert_eq!(bindings.error_message(), None);
    }

    #[test]
    fn test_expiry_clears_lingering_store_error() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);

        // No reset follows this one, unlike a session error
        store.update(StateUpdate::default().error(Some("no microphone".to_string())));
        bindings.tick(0.0);
        bindings.tick(5.1);

        assert_eq!(bindings.error_message(), None);
        assert_eq!(store.snapshot().error, None);
    }

    #[test]
    fn test_drop_unsubscribes_from_store() {
        let store = store();
        let bindings = UiBindings::new(store.clone(), 5.0);
        drop(bindings);

        // Updates after teardown must not panic or deadlock
        store.update(StateUpdate::default().transcript("still fine"));
        assert_eq!(store.snapshot().current_transcript, "still fine");
    }
}
