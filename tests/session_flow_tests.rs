//! End-to-end session flow tests
//!
//! These drive the real event adapter, store, and waveform surface with
//! injected session events and a virtual clock, with no window attached.

use std::time::{Duration, Instant};

use murmur::adapter::{EventAdapter, WaveColor, WaveSurface};
use murmur::amplitude::{BREATHING_BASE, BREATHING_RANGE};
use murmur::config::SessionConfig;
use murmur::session::{ScriptedSession, SessionEvent, SessionHandle};
use murmur::state::{Speaker, StateStore, StateUpdate, ThemeMode};
use murmur::ui::UiBindings;
use uuid::Uuid;

const FRAME: f64 = 1.0 / 60.0;

/// Adapter plus everything it feeds, with the driver kept alive so the
/// command channel stays open
struct Rig {
    _driver: ScriptedSession,
    session: SessionHandle,
    store: StateStore,
    surface: WaveSurface,
    adapter: EventAdapter,
}

impl Rig {
    fn new() -> Self {
        let (driver, session) = ScriptedSession::new();
        let store = StateStore::new(ThemeMode::Dark);
        let surface = WaveSurface::new();
        let adapter = EventAdapter::new(
            session.clone(),
            store.clone(),
            Some(Box::new(surface.clone())),
        );

        Self {
            _driver: driver,
            session,
            store,
            surface,
            adapter,
        }
    }
}

#[test]
fn test_call_lifecycle_end_to_end() {
    let mut rig = Rig::new();
    let events = rig.session.event_sender();

    let mut now = 0.0;
    rig.adapter.pump(now);
    assert!(!rig.store.snapshot().is_active);
    assert!(!rig.surface.frame().running);

    // Connect
    events
        .send(SessionEvent::CallStarted {
            session_id: Uuid::new_v4(),
        })
        .unwrap();
    now += FRAME;
    rig.adapter.pump(now);

    let snapshot = rig.store.snapshot();
    assert!(snapshot.is_active);
    assert_eq!(snapshot.current_transcript, "Listening...");
    assert_eq!(snapshot.current_speaker, None);
    assert!(rig.surface.frame().running);

    // User starts speaking
    events
        .send(SessionEvent::SpeechStarted {
            speaker: Speaker::User,
        })
        .unwrap();
    now += FRAME;
    rig.adapter.pump(now);

    let snapshot = rig.store.snapshot();
    assert!(snapshot.is_speaking);
    assert_eq!(snapshot.current_speaker, Some(Speaker::User));
    assert_eq!(rig.surface.frame().color, WaveColor::User);

    // Sustained loud input pushes the wave well above the breathing band
    for _ in 0..120 {
        events.send(SessionEvent::VolumeLevel(0.8)).unwrap();
        now += FRAME;
        rig.adapter.pump(now);
    }
    assert!(rig.surface.frame().amplitude > BREATHING_BASE + BREATHING_RANGE);
    assert_eq!(rig.store.snapshot().volume, 0.8);

    // Words arrive
    events
        .send(SessionEvent::Transcript {
            text: "hello".to_string(),
            speaker: Some(Speaker::User),
            is_final: false,
        })
        .unwrap();
    now += FRAME;
    rig.adapter.pump(now);
    assert_eq!(rig.store.snapshot().current_transcript, "hello");

    // Speech ends; attribution and color drop together
    events.send(SessionEvent::SpeechEnded).unwrap();
    now += FRAME;
    rig.adapter.pump(now);

    let snapshot = rig.store.snapshot();
    assert!(!snapshot.is_speaking);
    assert_eq!(snapshot.current_speaker, None);
    assert_eq!(rig.surface.frame().color, WaveColor::Idle);

    // Hang up
    events.send(SessionEvent::CallEnded).unwrap();
    now += FRAME;
    rig.adapter.pump(now);

    let snapshot = rig.store.snapshot();
    assert!(!snapshot.is_active);
    assert_eq!(snapshot.current_transcript, "");
    assert!(!rig.surface.frame().running);
}

#[test]
fn test_session_error_resets_and_flashes() {
    let mut rig = Rig::new();
    let events = rig.session.event_sender();
    let bindings = UiBindings::new(rig.store.clone(), 5.0);

    events
        .send(SessionEvent::CallStarted {
            session_id: Uuid::new_v4(),
        })
        .unwrap();
    rig.adapter.pump(10.0);
    assert!(rig.store.snapshot().is_active);

    events
        .send(SessionEvent::SessionError("auth failed".to_string()))
        .unwrap();
    rig.adapter.pump(10.1);

    // The store is back to idle while the flash holds the message
    let snapshot = rig.store.snapshot();
    assert!(!snapshot.is_active);
    assert_eq!(snapshot.error, None);
    assert!(!rig.surface.frame().running);
    assert_eq!(bindings.error_message().as_deref(), Some("auth failed"));

    // The display window runs from the first rendered frame
    bindings.tick(11.0);
    bindings.tick(15.9);
    assert!(bindings.has_error());
    bindings.tick(16.1);
    assert!(!bindings.has_error());
}

#[test]
fn test_wave_returns_to_breathing_after_silence() {
    let mut rig = Rig::new();
    let events = rig.session.event_sender();

    events
        .send(SessionEvent::CallStarted {
            session_id: Uuid::new_v4(),
        })
        .unwrap();

    // Drive the wave up with steady volume
    let mut now = 0.0;
    for _ in 0..120 {
        events.send(SessionEvent::VolumeLevel(0.9)).unwrap();
        now += FRAME;
        rig.adapter.pump(now);
    }
    assert!(rig.surface.frame().amplitude > BREATHING_BASE + BREATHING_RANGE);

    // A second of silence drops it back into the breathing band
    for _ in 0..60 {
        now += FRAME;
        rig.adapter.pump(now);
    }
    assert!(rig.adapter.amplitude().is_idle());

    let amplitude = rig.surface.frame().amplitude;
    assert!(amplitude <= BREATHING_BASE + BREATHING_RANGE + 0.1);
    assert!(amplitude >= BREATHING_BASE - BREATHING_RANGE - 0.1);
}

#[test]
fn test_transcript_updates_preserve_listening_status() {
    let rig = Rig::new();

    // listening is owned by the store's callers, not the adapter
    rig.store.update(
        StateUpdate::default()
            .active(true)
            .listening(true)
            .transcript("Listening..."),
    );
    assert_eq!(rig.store.snapshot().status_text(), "Listening");

    rig.store
        .update(StateUpdate::default().speaking(true).speaker(Some(Speaker::Assistant)));
    assert_eq!(rig.store.snapshot().status_text(), "Assistant is speaking");

    rig.store
        .update(StateUpdate::default().speaking(false).speaker(None));
    assert_eq!(rig.store.snapshot().status_text(), "Listening");
}

/// Full round trip through the scripted backend worker thread
#[test]
fn test_scripted_backend_drives_store() {
    let (driver, session) = ScriptedSession::new();
    let worker = driver.start();
    let store = StateStore::new(ThemeMode::Dark);
    let surface = WaveSurface::new();
    let mut adapter = EventAdapter::new(
        session.clone(),
        store.clone(),
        Some(Box::new(surface.clone())),
    );

    session.start_call(&SessionConfig::default()).unwrap();

    let mut now = 0.0;
    let deadline = Instant::now() + Duration::from_secs(5);
    while !store.snapshot().is_active {
        assert!(Instant::now() < deadline, "Call never became active");
        std::thread::sleep(Duration::from_millis(10));
        now += 0.01;
        adapter.pump(now);
    }
    assert!(surface.frame().running);

    session.stop_call().unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while store.snapshot().is_active {
        assert!(Instant::now() < deadline, "Call never ended");
        std::thread::sleep(Duration::from_millis(10));
        now += 0.01;
        adapter.pump(now);
    }
    assert!(!surface.frame().running);

    session.shutdown().unwrap();
    worker.join().unwrap();
}
