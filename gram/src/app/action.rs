use crossterm::event::KeyEvent;
use gram_core::{
    api::{error, AuthResult},
    Session,
};

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// We read the session from disk (or started a fresh one)
    LoadedSession(Session),

    /// We successfully saved the session
    SavedSession,

    /// The login mutation came back. `Err` means we never got a real answer.
    LoginCompleted(SubmissionId, error::Result<AuthResult>),

    /// The signup mutation came back. `Err` means we never got a real answer.
    SignupCompleted(SubmissionId, error::Result<AuthResult>),

    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),
}

/// Which submission a mutation belongs to. Answers only count if they match
/// the one the current screen is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionId(pub u64);
