//! Bridge from session events to application state
//!
//! Drains the session event stream once per frame and translates each
//! event into store updates, amplitude signals, and renderer calls.
//! The mapping here is the contract the rest of the app relies on.

use super::renderer::{WaveColor, WaveRenderer};
use crate::amplitude::AmplitudeController;
use crate::session::{SessionEvent, SessionHandle};
use crate::state::{StateStore, StateUpdate};
use tracing::{debug, info, warn};

/// Transcript shown while the call is connected but nobody has spoken
pub const LISTENING_TEXT: &str = "Listening...";

/// Routes session events into the store, the amplitude controller, and
/// the waveform renderer
pub struct EventAdapter {
    /// Session backend handle, polled for events
    session: SessionHandle,

    /// Application state store
    store: StateStore,

    /// Smoothed waveform amplitude
    amplitude: AmplitudeController,

    /// Waveform renderer, absent in degraded mode
    renderer: Option<Box<dyn WaveRenderer>>,

    /// Whether the missing-renderer warning has been logged
    renderer_warned: bool,
}

impl EventAdapter {
    /// Create a bridge over the given collaborators. Passing `None` for
    /// the renderer runs degraded: state keeps updating, nothing draws.
    pub fn new(
        session: SessionHandle,
        store: StateStore,
        renderer: Option<Box<dyn WaveRenderer>>,
    ) -> Self {
        if renderer.is_none() {
            warn!("No waveform renderer attached, running degraded");
        }
        Self {
            session,
            store,
            amplitude: AmplitudeController::new(),
            renderer,
            renderer_warned: false,
        }
    }

    /// Drain pending events, then advance the amplitude by one frame and
    /// push it to the renderer. Returns how many events were handled so
    /// the caller can decide whether to keep repainting eagerly.
    pub fn pump(&mut self, now: f64) -> usize {
        let mut handled = 0;
        while let Some(event) = self.session.try_recv_event() {
            self.handle_event(event, now);
            handled += 1;
        }

        let amplitude = self.amplitude.tick(now);
        self.with_renderer(|r| r.set_amplitude(amplitude));
        handled
    }

    /// Apply one session event. `now` is the UI clock in seconds and
    /// timestamps any volume sample carried by the event.
    pub fn handle_event(&mut self, event: SessionEvent, now: f64) {
        match event {
            SessionEvent::CallStarted { session_id } => {
                info!("Call started: {}", session_id);
                self.store.update(
                    StateUpdate::default()
                        .active(true)
                        .transcript(LISTENING_TEXT)
                        .speaker(None),
                );
                self.with_renderer(|r| r.start());
                self.amplitude.wake();
            }
            SessionEvent::CallEnded => {
                info!("Call ended");
                self.teardown_to_idle();
            }
            SessionEvent::SpeechStarted { speaker } => {
                debug!("Speech started: {}", speaker.label());
                self.store.update(
                    StateUpdate::default()
                        .speaking(true)
                        .speaker(Some(speaker)),
                );
                self.with_renderer(|r| r.set_color(WaveColor::from(speaker)));
            }
            SessionEvent::SpeechEnded => {
                debug!("Speech ended");
                self.store
                    .update(StateUpdate::default().speaking(false).speaker(None));
                self.with_renderer(|r| r.set_color(WaveColor::Idle));
            }
            SessionEvent::Transcript {
                text,
                speaker,
                is_final,
            } => {
                if text.is_empty() {
                    return;
                }
                debug!(
                    "Transcript ({}): {} chars",
                    if is_final { "final" } else { "partial" },
                    text.len()
                );
                let mut update = StateUpdate::default().transcript(text);
                // Without a speaker tag the current attribution stands
                if let Some(speaker) = speaker {
                    update = update.speaker(Some(speaker));
                }
                self.store.update(update);
            }
            SessionEvent::VolumeLevel(volume) => {
                self.amplitude.volume_sample(volume, now);
                self.store.update(StateUpdate::default().volume(volume));
            }
            SessionEvent::SessionError(message) => {
                warn!("Session error: {}", message);
                self.store
                    .update(StateUpdate::default().error(Some(message)));
                self.teardown_to_idle();
            }
        }
    }

    /// Everything a hang-up implies: state back to initial (theme kept),
    /// renderer stopped and recolored, amplitude at rest
    fn teardown_to_idle(&mut self) {
        self.store.reset();
        self.store
            .update(StateUpdate::default().transcript("").speaker(None));
        self.with_renderer(|r| {
            r.stop();
            r.set_color(WaveColor::Idle);
        });
        self.amplitude.reset();
    }

    fn with_renderer(&mut self, f: impl FnOnce(&mut dyn WaveRenderer)) {
        match self.renderer.as_deref_mut() {
            Some(renderer) => f(renderer),
            None => {
                if !self.renderer_warned {
                    debug!("Renderer call skipped, none attached");
                    self.renderer_warned = true;
                }
            }
        }
    }

    pub fn amplitude(&self) -> &AmplitudeController {
        &self.amplitude
    }
}
