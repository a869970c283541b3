use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the game before or outside of normal play.
#[derive(Error, Debug)]
pub enum GameError {
    /// A terminal capability could not be acquired
    #[error("could not set up {resource}: {source}")]
    Terminal {
        resource: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The terminal has too few cells to draw the arena
    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    /// Bad or unreadable configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Drawing or input failed mid-game
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Wrap an I/O failure while acquiring `resource`.
    pub fn terminal(resource: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| GameError::Terminal { resource, source }
    }
}
