pub mod adapter;
pub mod amplitude;
pub mod config;
pub mod session;
pub mod state;
pub mod ui;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MurmurError {
    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Preferences error: {0}")]
    PersistenceError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for MurmurError {
    fn from(e: std::io::Error) -> Self {
        MurmurError::IOError(e.to_string())
    }
}

impl MurmurError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The session worker can be restarted with a fresh call
            MurmurError::SessionError(_) => true,
            // A dead channel means the worker is gone
            MurmurError::ChannelError(_) => false,
            MurmurError::ConfigError(_) => false,
            // Preferences are cosmetic; the app runs without them
            MurmurError::PersistenceError(_) => true,
            MurmurError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            MurmurError::SessionError(_) => {
                "Voice session error. Please try starting the call again.".to_string()
            }
            MurmurError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            MurmurError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            MurmurError::PersistenceError(_) => {
                "Could not save preferences. Changes apply to this run only.".to_string()
            }
            MurmurError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MurmurError>;
