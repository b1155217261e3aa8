//! State snapshot types
//!
//! Defines the application state record, the typed partial update used to
//! mutate it, and the history entry recorded for every update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who is currently speaking in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The person in front of the microphone
    User,
    /// The voice assistant
    Assistant,
}

impl Speaker {
    /// Label shown next to the transcript
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Assistant => "Assistant",
        }
    }
}

/// Visual theme choice, persisted across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Coarse activity classification derived from the snapshot, used by the
/// status badge to pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    UserSpeaking,
    AssistantSpeaking,
    Listening,
    Active,
}

/// One complete application state record
///
/// Owned by the store; callers only ever see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSnapshot {
    /// Whether a voice session is open
    pub is_active: bool,

    /// Whether anyone is speaking right now
    pub is_speaking: bool,

    /// Whether the assistant is waiting for user speech
    pub is_listening: bool,

    /// Latest transcript text (may be a partial utterance)
    pub current_transcript: String,

    /// Who the transcript/speech belongs to, if anyone
    pub current_speaker: Option<Speaker>,

    /// Visual theme; survives `reset()`
    pub theme: ThemeMode,

    /// Most recent volume level, 0.0 and up
    pub volume: f32,

    /// Error message surfaced from the session backend
    pub error: Option<String>,
}

impl Default for AssistantSnapshot {
    fn default() -> Self {
        Self {
            is_active: false,
            is_speaking: false,
            is_listening: false,
            current_transcript: String::new(),
            current_speaker: None,
            theme: ThemeMode::default(),
            volume: 0.0,
            error: None,
        }
    }
}

impl AssistantSnapshot {
    /// Human-readable status line for the badge
    pub fn status_text(&self) -> &'static str {
        if !self.is_active {
            return "Ready";
        }
        if self.is_speaking {
            return match self.current_speaker {
                Some(Speaker::User) => "You are speaking",
                _ => "Assistant is speaking",
            };
        }
        if self.is_listening {
            return "Listening";
        }
        "Active"
    }

    /// Status classification matching `status_text`
    pub fn status_kind(&self) -> StatusKind {
        if !self.is_active {
            return StatusKind::Idle;
        }
        if self.is_speaking {
            return match self.current_speaker {
                Some(Speaker::User) => StatusKind::UserSpeaking,
                _ => StatusKind::AssistantSpeaking,
            };
        }
        if self.is_listening {
            return StatusKind::Listening;
        }
        StatusKind::Active
    }
}

/// Identifies one field of [`AssistantSnapshot`] for key-scoped
/// subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    IsActive,
    IsSpeaking,
    IsListening,
    CurrentTranscript,
    CurrentSpeaker,
    Theme,
    Volume,
    Error,
}

/// A partial state update: `None` fields are left untouched by the merge
///
/// `current_speaker` and `error` are optional in the snapshot itself, so
/// their entries are doubly wrapped: the outer `Option` distinguishes
/// "leave unchanged" from "set", the inner one carries the new value.
/// Field declaration order is the notification order for changed keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub is_active: Option<bool>,
    pub is_speaking: Option<bool>,
    pub is_listening: Option<bool>,
    pub current_transcript: Option<String>,
    pub current_speaker: Option<Option<Speaker>>,
    pub theme: Option<ThemeMode>,
    pub volume: Option<f32>,
    pub error: Option<Option<String>>,
}

impl StateUpdate {
    /// Set the session-active flag
    pub fn active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Set the speaking flag
    pub fn speaking(mut self, speaking: bool) -> Self {
        self.is_speaking = Some(speaking);
        self
    }

    /// Set the listening flag
    pub fn listening(mut self, listening: bool) -> Self {
        self.is_listening = Some(listening);
        self
    }

    /// Set the transcript text
    pub fn transcript(mut self, text: impl Into<String>) -> Self {
        self.current_transcript = Some(text.into());
        self
    }

    /// Set (or clear, with `None`) the current speaker
    pub fn speaker(mut self, speaker: Option<Speaker>) -> Self {
        self.current_speaker = Some(speaker);
        self
    }

    /// Set the theme
    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the volume level
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Set (or clear, with `None`) the error message
    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = Some(error);
        self
    }

    /// The update applied by `reset()`: every field back to its initial
    /// value except `theme`
    pub fn reset_fields() -> Self {
        Self::default()
            .active(false)
            .speaking(false)
            .listening(false)
            .transcript("")
            .speaker(None)
            .volume(0.0)
            .error(None)
    }
}

/// Before/after record appended to the store history on every update
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// When the update was applied
    pub timestamp: DateTime<Utc>,

    /// State before the merge
    pub previous: AssistantSnapshot,

    /// State after the merge
    pub current: AssistantSnapshot,
}
