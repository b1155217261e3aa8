//! Scripted session driver
//!
//! Plays a canned conversation over the session event channel so the
//! widget can run end to end without a live voice backend. The worker
//! owns the backend side of the channels and exits on `Shutdown` or
//! when the UI side disappears.

use super::client::SessionHandle;
use super::events::{SessionCommand, SessionEvent};
use crate::state::Speaker;
use crate::utils::channels::SessionChannels;
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Simulated connect delay before `CallStarted`
const CONNECT_DELAY: Duration = Duration::from_millis(300);

/// Pause between transcript chunks within an utterance
const WORD_DELAY: Duration = Duration::from_millis(140);

/// Pause between conversation turns
const TURN_DELAY: Duration = Duration::from_millis(600);

/// The canned conversation
const SCRIPT: &[(Speaker, &str)] = &[
    (Speaker::Assistant, "Hello! How can I help you today?"),
    (Speaker::User, "What will the weather be like tomorrow?"),
    (
        Speaker::Assistant,
        "Tomorrow looks sunny with a high of around 22 degrees.",
    ),
    (Speaker::User, "Great, thanks a lot."),
    (Speaker::Assistant, "You're welcome. Anything else?"),
];

/// How the worker should proceed after handling interruptions
enum Flow {
    Continue,
    EndCall,
    Exit,
}

/// Stand-in session backend playing a scripted conversation
pub struct ScriptedSession {
    command_rx: Receiver<SessionCommand>,
    event_tx: Sender<SessionEvent>,
}

impl ScriptedSession {
    /// Create the driver and the handle the UI talks to it through
    pub fn new() -> (Self, SessionHandle) {
        let channels = SessionChannels::new();
        let handle = SessionHandle::new(
            channels.command_tx,
            channels.event_rx,
            channels.event_tx.clone(),
        );
        let driver = Self {
            command_rx: channels.command_rx,
            event_tx: channels.event_tx,
        };
        (driver, handle)
    }

    /// Spawn the worker thread
    pub fn start(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    fn run(self) {
        info!("Scripted session worker started");
        loop {
            match self.command_rx.recv() {
                Ok(SessionCommand::Start { assistant_id, .. }) => {
                    debug!("Starting scripted call to assistant {}", assistant_id);
                    if !self.play_call() {
                        break;
                    }
                }
                Ok(SessionCommand::Stop) => {
                    debug!("Stop with no active call, ignoring");
                }
                Ok(SessionCommand::Shutdown) => {
                    info!("Session worker shutdown requested");
                    break;
                }
                Err(_) => {
                    warn!("Command channel disconnected");
                    break;
                }
            }
        }
        info!("Scripted session worker stopped");
    }

    /// Run one call from connect to hang-up. Returns false when the
    /// worker should exit entirely.
    fn play_call(&self) -> bool {
        thread::sleep(CONNECT_DELAY);
        if !self.emit(SessionEvent::CallStarted {
            session_id: uuid::Uuid::new_v4(),
        }) {
            return false;
        }

        for (turn, (speaker, line)) in SCRIPT.iter().enumerate() {
            match self.pause(TURN_DELAY) {
                Flow::Continue => {}
                Flow::EndCall => return self.emit(SessionEvent::CallEnded),
                Flow::Exit => return self.hang_up_and_exit(),
            }
            match self.play_utterance(*speaker, line, turn) {
                Flow::Continue => {}
                Flow::EndCall => return self.emit(SessionEvent::CallEnded),
                Flow::Exit => return self.hang_up_and_exit(),
            }
        }

        // Script exhausted; hold the line open until told otherwise
        debug!("Script finished, call stays open");
        loop {
            match self.command_rx.recv() {
                Ok(SessionCommand::Stop) => return self.emit(SessionEvent::CallEnded),
                Ok(SessionCommand::Shutdown) => return self.hang_up_and_exit(),
                Ok(SessionCommand::Start { .. }) => {
                    debug!("Call already active, ignoring start");
                }
                Err(_) => return false,
            }
        }
    }

    /// One speech turn: speech start, volume envelope with cumulative
    /// transcript chunks, speech end.
    fn play_utterance(&self, speaker: Speaker, line: &str, turn: usize) -> Flow {
        if !self.emit(SessionEvent::SpeechStarted { speaker }) {
            return Flow::Exit;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        for i in 1..=words.len() {
            // Rough per-word level: a slow swell with per-word ripple
            let phase = (turn * 7 + i) as f32;
            let volume = (0.35 + 0.25 * (phase * 0.9).sin().abs()).min(1.0);
            if !self.emit(SessionEvent::VolumeLevel(volume)) {
                return Flow::Exit;
            }

            let is_final = i == words.len();
            if !self.emit(SessionEvent::Transcript {
                text: words[..i].join(" "),
                speaker: Some(speaker),
                is_final,
            }) {
                return Flow::Exit;
            }

            match self.pause(WORD_DELAY) {
                Flow::Continue => {}
                other => return other,
            }
        }

        if !self.emit(SessionEvent::SpeechEnded) {
            return Flow::Exit;
        }
        Flow::Continue
    }

    /// Sleep while watching for interrupting commands
    fn pause(&self, duration: Duration) -> Flow {
        match self.command_rx.recv_timeout(duration) {
            Ok(SessionCommand::Stop) => Flow::EndCall,
            Ok(SessionCommand::Shutdown) => Flow::Exit,
            Ok(SessionCommand::Start { .. }) => {
                debug!("Call already active, ignoring start");
                Flow::Continue
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => Flow::Continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Flow::Exit,
        }
    }

    fn hang_up_and_exit(&self) -> bool {
        let _ = self.event_tx.send(SessionEvent::CallEnded);
        false
    }

    /// Send an event; false once the UI side is gone
    fn emit(&self, event: SessionEvent) -> bool {
        if self.event_tx.send(event).is_err() {
            warn!("Event channel disconnected");
            return false;
        }
        true
    }
}
