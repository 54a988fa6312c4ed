//! Resuming a previous session.

use crate::engine::Engine;

/// Failure to restore a saved session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No saved game to load.")]
    NotFound,

    #[error("could not read the saved game: {0}")]
    Io(#[from] std::io::Error),

    #[error("saved game is corrupt: {0}")]
    Corrupt(String),
}

/// Source of saved sessions for the main menu's "continue" entry.
pub trait SessionStore {
    fn load(&mut self) -> Result<Engine, SessionError>;
}

/// A store that never holds a saved game.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSavedGame;

impl SessionStore for NoSavedGame {
    fn load(&mut self) -> Result<Engine, SessionError> {
        Err(SessionError::NotFound)
    }
}
