use crate::api::AuthResult;
use crate::form::Form;
use crate::submission::Submission;
use crate::valid;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::form_fields!(LoginField {
    Nickname => ("Nickname", valid::NICKNAME, false),
    Password => ("Password", valid::PASSWORD, true),
});

/// What you log in with. Also what signup hands to the login screen so
/// nobody has to type it twice.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub nickname: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("nickname", &self.nickname)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An opaque token from a successful login. Send it along with later
/// requests to prove who you are.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// The login screen's state, minus anything about how it's drawn.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    form: Form<LoginField>,
    submission: Submission<Credentials>,
}

impl LoginFlow {
    /// A blank login form
    pub fn new() -> Self {
        Self {
            form: Form::new(),
            submission: Submission::Idle,
        }
    }

    /// A login form with credentials carried over from somewhere else
    /// (usually a successful signup.)
    pub fn prefilled(credentials: Credentials) -> Self {
        Self {
            form: Form::with_values([
                (LoginField::Nickname, credentials.nickname),
                (LoginField::Password, credentials.password),
            ]),
            submission: Submission::Idle,
        }
    }

    pub fn form(&self) -> &Form<LoginField> {
        &self.form
    }

    /// Someone typed in a field
    pub fn change(&mut self, field: LoginField, value: impl Into<String>) {
        self.form.change(field, value);
    }

    /// Someone moved into a field
    pub fn focus(&mut self, field: LoginField) {
        self.form.focus(field);
    }

    /// Whether a login request is in flight
    pub fn is_loading(&self) -> bool {
        self.submission.is_loading()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.form.is_valid()
    }

    /// What to put on the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Logging in…"
        } else {
            "Log in"
        }
    }

    /// Try to submit. Gives back the credentials to send to the server, or
    /// `None` if the form is invalid or a request is already in flight (in
    /// which case, don't call the server!)
    pub fn submit(&mut self) -> Option<Credentials> {
        if !self.can_submit() {
            return None;
        }

        self.submission.begin(Credentials {
            nickname: self.form.value(LoginField::Nickname).to_owned(),
            password: self.form.value(LoginField::Password).to_owned(),
        })
    }

    /// The server answered. If this gives back a token, the caller should
    /// store it in the session; this screen is done at that point.
    pub fn complete(&mut self, result: AuthResult) -> Option<AuthToken> {
        if !self.is_loading() {
            tracing::warn!("got a login result without a login in flight");
            return None;
        }

        if !result.is_success {
            self.submission.reset();
            self.form.set_server_error(result.error.unwrap_or_default());

            return None;
        }

        match result.token.filter(|token| !token.as_str().is_empty()) {
            Some(token) => {
                self.submission.finish();
                Some(token)
            }
            None => {
                tracing::warn!("login succeeded but the server did not send a token");
                self.submission.reset();
                None
            }
        }
    }

    /// The request never got an answer (network trouble, timeout, etc.) Let
    /// the user try again. The server error slot is left alone since the
    /// server didn't say anything.
    pub fn abort(&mut self) {
        self.submission.reset();
    }

    /// Whether we've logged in and this screen has nothing left to do
    pub fn is_finished(&self) -> bool {
        matches!(self.submission, Submission::Finished)
    }
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}
