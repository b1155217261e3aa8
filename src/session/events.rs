//! Session command and event types
//!
//! The wire surface between the UI and the voice session backend. The
//! core only ever sees these shapes, never backend internals.

use crate::state::Speaker;
use uuid::Uuid;

/// Commands sent to the session worker
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Open a call to an assistant, credentials passed through opaquely
    Start {
        assistant_id: Uuid,
        public_key: Uuid,
    },

    /// End the current call
    Stop,

    /// Shut the session worker down
    Shutdown,
}

/// Events emitted by the session backend
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The call is connected and audio is flowing
    CallStarted { session_id: Uuid },

    /// The call has ended
    CallEnded,

    /// An utterance began
    SpeechStarted { speaker: Speaker },

    /// The current utterance finished; carries no speaker on purpose,
    /// ending speech always reverts to the no-speaker state
    SpeechEnded,

    /// A transcript chunk; `speaker` may be absent on some backends
    Transcript {
        text: String,
        speaker: Option<Speaker>,
        is_final: bool,
    },

    /// Input/output level sample, nominally 0.0 to 1.0
    VolumeLevel(f32),

    /// The backend reported a failure
    SessionError(String),
}
