use std::io;
use thiserror::Error;

/// Everything that can stop a guess, a round or a game.
#[derive(Error, Debug)]
pub enum WordleError {
    /// The board produced a row that cannot be interpreted.
    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),
    /// No candidate survives the accumulated constraints.
    #[error("no candidate words remain")]
    EmptyPool,
    /// The board refused the word, usually because its own dictionary lacks it.
    #[error("guess '{0}' was rejected by the board")]
    SubmissionRejected(String),
    /// The result for this round has not been rendered yet.
    #[error("board has not rendered round {0} yet")]
    BoardNotReady(usize),
    #[error("board is unresponsive: {0}")]
    BoardUnresponsive(String),
    /// A hidden word handed to a simulated board is not playable.
    #[error("invalid answer '{0}'")]
    InvalidAnswer(String),
    /// The board went away (operator quit, input ended).
    #[error("board closed")]
    BoardClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WordleError {
    /// Whether retrying the same board operation may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WordleError::BoardNotReady(_) | WordleError::BoardUnresponsive(_)
        )
    }
}
