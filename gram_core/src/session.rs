use crate::login::AuthToken;
use serde::{Deserialize, Serialize};

/// Who's logged in. The app owns exactly one of these and passes it to
/// whatever needs it; there is no global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Set by logging in, cleared by logging out.
    token: Option<AuthToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Remember a token from a successful login. Replaces any previous one.
    pub fn set_token(&mut self, token: AuthToken) {
        tracing::info!("storing new auth token");
        self.token = Some(token);
    }

    /// Forget the token (log out.)
    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}
