//! Session handle
//!
//! The UI-side endpoint of the session channels: commands go out,
//! events come back. Obtained from whichever backend driver is in use.

use super::events::{SessionCommand, SessionEvent};
use crate::config::SessionConfig;
use crate::{MurmurError, Result};
use crossbeam_channel::{Receiver, Sender};

/// Handle for controlling a session backend
#[derive(Clone)]
pub struct SessionHandle {
    /// Command sender
    command_tx: Sender<SessionCommand>,

    /// Event receiver
    event_rx: Receiver<SessionEvent>,

    /// Event sender, kept so tests and in-process drivers can inject
    /// events through the same stream the backend uses
    event_tx: Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn new(
        command_tx: Sender<SessionCommand>,
        event_rx: Receiver<SessionEvent>,
        event_tx: Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_rx,
            event_tx,
        }
    }

    /// Send a command to the session worker
    pub fn send_command(&self, cmd: SessionCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| MurmurError::ChannelError(format!("Failed to send command: {}", e)))
    }

    /// Open a call with the configured credentials
    pub fn start_call(&self, config: &SessionConfig) -> Result<()> {
        self.send_command(SessionCommand::Start {
            assistant_id: config.assistant_id,
            public_key: config.public_key,
        })
    }

    /// End the current call
    pub fn stop_call(&self) -> Result<()> {
        self.send_command(SessionCommand::Stop)
    }

    /// Tell the worker to exit
    pub fn shutdown(&self) -> Result<()> {
        self.send_command(SessionCommand::Shutdown)
    }

    /// Try to receive an event without blocking
    pub fn try_recv_event(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Get the event sender for direct injection
    pub fn event_sender(&self) -> Sender<SessionEvent> {
        self.event_tx.clone()
    }
}
