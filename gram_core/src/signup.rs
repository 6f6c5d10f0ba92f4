use crate::api::AuthResult;
use crate::form::Form;
use crate::login::Credentials;
use crate::route::{Navigation, Route};
use crate::submission::Submission;
use crate::valid;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::form_fields!(SignupField {
    Name => ("Name", valid::NAME, false),
    Nickname => ("Nickname", valid::NICKNAME, false),
    Email => ("Email", valid::EMAIL, false),
    Password => ("Password", valid::PASSWORD, true),
});

/// Everything we need to create an account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// The part of the request you log in with afterwards
    pub fn credentials(&self) -> Credentials {
        Credentials {
            nickname: self.nickname.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The signup screen's state. Works just like `LoginFlow`, except that
/// success sends you to the login screen instead of giving you a token.
#[derive(Debug, Clone)]
pub struct SignupFlow {
    form: Form<SignupField>,
    submission: Submission<SignupRequest>,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self {
            form: Form::new(),
            submission: Submission::Idle,
        }
    }

    pub fn form(&self) -> &Form<SignupField> {
        &self.form
    }

    pub fn change(&mut self, field: SignupField, value: impl Into<String>) {
        self.form.change(field, value);
    }

    pub fn focus(&mut self, field: SignupField) {
        self.form.focus(field);
    }

    pub fn is_loading(&self) -> bool {
        self.submission.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.form.is_valid()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Signing up…"
        } else {
            "Sign up"
        }
    }

    /// Try to submit. `None` means don't call the server.
    pub fn submit(&mut self) -> Option<SignupRequest> {
        if !self.can_submit() {
            return None;
        }

        self.submission.begin(SignupRequest {
            name: self.form.value(SignupField::Name).to_owned(),
            nickname: self.form.value(SignupField::Nickname).to_owned(),
            email: self.form.value(SignupField::Email).to_owned(),
            password: self.form.value(SignupField::Password).to_owned(),
        })
    }

    /// The server answered. On success we get back where to go next: the
    /// home route (which shows login when logged out) with the nickname and
    /// password that were just submitted filled in.
    pub fn complete(&mut self, result: AuthResult) -> Option<Navigation> {
        if !self.is_loading() {
            tracing::warn!("got a signup result without a signup in flight");
            return None;
        }

        if !result.is_success {
            self.submission.reset();
            self.form.set_server_error(result.error.unwrap_or_default());

            return None;
        }

        self.submission.finish().map(|req| Navigation {
            to: Route::Home,
            state: Some(req.credentials()),
        })
    }

    /// The request never got an answer. Let the user try again.
    pub fn abort(&mut self) {
        self.submission.reset();
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.submission, Submission::Finished)
    }
}

impl Default for SignupFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form::Fields;
    use crate::login::{LoginField, LoginFlow};
    use proptest::prelude::*;

    fn fill(flow: &mut SignupFlow, name: &str, nickname: &str, email: &str, password: &str) {
        flow.change(SignupField::Name, name);
        flow.change(SignupField::Nickname, nickname);
        flow.change(SignupField::Email, email);
        flow.change(SignupField::Password, password);
    }

    fn ready() -> SignupFlow {
        let mut flow = SignupFlow::new();
        fill(&mut flow, "Nick", "nick", "nick@example.com", "hunter2hunter2");
        flow
    }

    mod submit {
        use super::*;

        #[test]
        fn submits_all_four_fields() {
            let mut flow = ready();

            assert_eq!(
                flow.submit(),
                Some(SignupRequest {
                    name: "Nick".to_string(),
                    nickname: "nick".to_string(),
                    email: "nick@example.com".to_string(),
                    password: "hunter2hunter2".to_string(),
                })
            );
            assert_eq!(flow.submit_label(), "Signing up…");
        }

        #[test]
        fn second_submit_while_loading_is_a_no_op() {
            let mut flow = ready();
            flow.submit();

            assert_eq!(flow.submit(), None);
        }

        #[test]
        fn missing_email_blocks_submission() {
            let mut flow = ready();
            flow.change(SignupField::Email, "");

            assert!(!flow.can_submit());
            assert_eq!(flow.submit(), None);
            assert_eq!(
                flow.form().error(SignupField::Email),
                Some("Please enter your email address.")
            );
        }

        proptest! {
            #[test]
            fn valid_in_any_order(
                name in valid::test::name(),
                nickname in valid::test::nickname(),
                email in valid::test::email(),
                password in valid::test::password(),
                order in Just(SignupField::ALL.to_vec()).prop_shuffle(),
            ) {
                let mut flow = SignupFlow::new();

                for field in order {
                    let value = match field {
                        SignupField::Name => &name,
                        SignupField::Nickname => &nickname,
                        SignupField::Email => &email,
                        SignupField::Password => &password,
                    };

                    flow.change(field, value.clone());
                }

                prop_assert!(flow.can_submit());
            }

            #[test]
            fn clearing_any_field_blocks_submission(field in proptest::sample::select(SignupField::ALL)) {
                let mut flow = ready();
                flow.change(field, "");

                prop_assert!(!flow.can_submit());
                prop_assert!(flow.form().error(field).is_some());
            }
        }
    }

    mod complete {
        use super::*;

        #[test]
        fn success_navigates_home_with_credentials() {
            let mut flow = SignupFlow::new();
            fill(&mut flow, "Nick", "nick", "nick@example.com", "password");
            flow.submit();

            let nav = flow.complete(AuthResult::success());

            assert_eq!(
                nav,
                Some(Navigation {
                    to: Route::Home,
                    state: Some(Credentials {
                        nickname: "nick".to_string(),
                        password: "password".to_string(),
                    }),
                })
            );
            assert!(flow.is_finished());
        }

        #[test]
        fn handoff_uses_what_was_submitted_not_later_edits() {
            let mut flow = ready();
            flow.submit();
            flow.change(SignupField::Nickname, "edited");

            let nav = flow.complete(AuthResult::success()).unwrap();

            assert_eq!(nav.state.unwrap().nickname, "nick");
        }

        #[test]
        fn login_screen_starts_with_handed_off_values() {
            let mut flow = ready();
            flow.submit();

            let nav = flow.complete(AuthResult::success()).unwrap();
            let login = LoginFlow::prefilled(nav.state.unwrap());

            assert_eq!(login.form().value(LoginField::Nickname), "nick");
            assert_eq!(login.form().value(LoginField::Password), "hunter2hunter2");
        }

        #[test]
        fn failure_fills_the_server_slot() {
            let mut flow = ready();
            flow.submit();

            assert_eq!(flow.complete(AuthResult::failure("nickname taken")), None);
            assert_eq!(flow.form().server_error(), Some("nickname taken"));
            assert!(flow.can_submit());
        }

        #[test]
        fn failure_without_message_uses_empty_string() {
            let mut flow = ready();
            flow.submit();

            flow.complete(AuthResult {
                is_success: false,
                token: None,
                error: None,
            });

            assert_eq!(flow.form().server_error(), Some(""));
        }

        #[test]
        fn focus_clears_server_error_only() {
            let mut flow = ready();
            flow.submit();
            flow.complete(AuthResult::failure("nickname taken"));
            flow.change(SignupField::Email, "nope");

            flow.focus(SignupField::Name);

            assert_eq!(flow.form().server_error(), None);
            assert!(flow.form().error(SignupField::Email).is_some());
        }

        #[test]
        fn abort_allows_retry() {
            let mut flow = ready();
            flow.submit();
            flow.abort();

            assert!(flow.can_submit());
            assert_eq!(flow.form().server_error(), None);
        }

        #[test]
        fn debug_hides_password() {
            let mut flow = ready();
            let req = flow.submit().unwrap();

            assert!(!format!("{req:?}").contains("hunter2"));
            assert!(!format!("{flow:?}").contains("hunter2"));
        }
    }
}
