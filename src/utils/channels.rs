use crossbeam_channel::{bounded, Receiver, Sender};

use crate::session::events::{SessionCommand, SessionEvent};

/// Paired channels connecting the UI to a session backend
pub struct SessionChannels {
    pub command_tx: Sender<SessionCommand>,
    pub command_rx: Receiver<SessionCommand>,
    pub event_tx: Sender<SessionEvent>,
    pub event_rx: Receiver<SessionEvent>,
}

impl SessionChannels {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(buffer_size: usize) -> Self {
        let (command_tx, command_rx) = bounded(buffer_size);
        let (event_tx, event_rx) = bounded(buffer_size);

        Self {
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }
}

impl Default for SessionChannels {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_connected() {
        let channels = SessionChannels::new();

        channels.command_tx.send(SessionCommand::Stop).unwrap();
        assert!(matches!(
            channels.command_rx.recv().unwrap(),
            SessionCommand::Stop
        ));

        channels
            .event_tx
            .send(SessionEvent::VolumeLevel(0.25))
            .unwrap();
        assert!(matches!(
            channels.event_rx.recv().unwrap(),
            SessionEvent::VolumeLevel(v) if (v - 0.25).abs() < f32::EPSILON
        ));
    }
}
