mod action;
pub use action::{Action, SubmissionId};

/// Drawing and key handling shared by the login and signup screens
mod auth_form;

mod effect;
pub use effect::{Effect, EffectContext};

use auth_form::{AuthForm, Chrome, FormEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gram_core::{
    api::Client,
    login::LoginField,
    signup::SignupField,
    LoginFlow, Navigation, Route, Session, SignupFlow,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Who's logged in. Saved to disk whenever it changes.
    session: Session,

    /// How we talk to the server. Carries the session's token once there is
    /// one.
    client: Client,

    /// What's on screen right now
    screen: Screen,

    /// Which login or signup answer the current screen is waiting for
    submissions: Submissions,
}

/// Hands out submission ids and remembers the one still in flight. Screens
/// get replaced while requests are out, so an answer only counts if it
/// carries this id.
#[derive(Debug, Default)]
struct Submissions {
    last: u64,
    pending: Option<SubmissionId>,
}

impl Submissions {
    fn begin(&mut self) -> SubmissionId {
        self.last += 1;
        let id = SubmissionId(self.last);
        self.pending = Some(id);

        id
    }

    /// Whether this answer is the one we're waiting for. If it is, we stop
    /// waiting.
    fn take(&mut self, id: SubmissionId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            tracing::warn!(
                ?id,
                pending = ?self.pending,
                "ignoring answer for a submission nobody is waiting on"
            );
            false
        }
    }

    /// The screen went away; whatever it was waiting for doesn't matter now.
    fn forget(&mut self) {
        self.pending = None;
    }
}

/// The screens the app can show. Login and signup carry their flow (the
/// state that matters) and their form (the terminal bits.)
#[derive(Debug)]
enum Screen {
    /// Waiting to find out if we have a saved session
    Loading,
    Login(LoginFlow, AuthForm<LoginField>),
    Signup(SignupFlow, AuthForm<SignupField>),
    Home,
    Exiting(ExitCode),
}

impl App {
    /// Create a new instance of the app, talking to the given GraphQL endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            status_line: None,
            session: Session::new(),
            client: Client::new(endpoint),
            screen: Screen::Loading,
            submissions: Submissions::default(),
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &self.screen {
            Screen::Loading => frame.render_widget(Paragraph::new("Loading…"), body_area),
            Screen::Login(flow, form) => form.render(
                flow.form(),
                &Chrome {
                    title: "Log in",
                    submit_label: flow.submit_label(),
                    submit_enabled: flow.can_submit(),
                    hint: "Ctrl-N: create an account, Esc: quit",
                },
                body_area,
                frame,
            ),
            Screen::Signup(flow, form) => form.render(
                flow.form(),
                &Chrome {
                    title: "Sign up",
                    submit_label: flow.submit_label(),
                    submit_enabled: flow.can_submit(),
                    hint: "Esc: back to login",
                },
                body_area,
                frame,
            ),
            Screen::Home => frame.render_widget(
                Paragraph::new("You're logged in!\n\no: log out\nq: quit")
                    .alignment(Alignment::Center),
                body_area,
            ),
            Screen::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line,
            None => "All good!",
        });

        frame.render_widget(status, status_area);
    }

    /// Produce any side effects as needed to initialize the app.
    #[expect(clippy::unused_self)]
    pub fn init(&self) -> Effect {
        Effect::LoadSession
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadedSession(session) => {
                self.client.auth = session.token().cloned();
                self.session = session;
                self.navigate(Navigation::to(Route::Home));

                vec![]
            }
            Action::SavedSession => {
                tracing::debug!("session saved");

                vec![]
            }
            Action::LoginCompleted(id, result) => {
                if !self.submissions.take(id) {
                    return vec![];
                }

                let Screen::Login(flow, _) = &mut self.screen else {
                    tracing::warn!("login finished but we're not on the login screen");
                    return vec![];
                };

                match result {
                    Ok(result) => match flow.complete(result) {
                        Some(token) => {
                            self.session.set_token(token.clone());
                            self.client.auth = Some(token);
                            self.status_line = Some("Logged in".to_owned());
                            self.navigate(Navigation::to(Route::Home));

                            vec![Effect::SaveSession(self.session.clone())]
                        }
                        None => vec![],
                    },
                    Err(err) => {
                        flow.abort();
                        self.status_line = Some(format!("Couldn't log in: {err}"));

                        vec![]
                    }
                }
            }
            Action::SignupCompleted(id, result) => {
                if !self.submissions.take(id) {
                    return vec![];
                }

                let Screen::Signup(flow, _) = &mut self.screen else {
                    tracing::warn!("signup finished but we're not on the signup screen");
                    return vec![];
                };

                match result {
                    Ok(result) => {
                        if let Some(nav) = flow.complete(result) {
                            self.status_line =
                                Some("Account created! Log in to continue.".to_owned());
                            self.navigate(nav);
                        }
                    }
                    Err(err) => {
                        flow.abort();
                        self.status_line = Some(format!("Couldn't sign up: {err}"));
                    }
                }

                vec![]
            }
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.screen = Screen::Exiting(ExitCode::SUCCESS);
                    return vec![];
                }

                self.handle_key(key)
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                // the only thing that can go wrong before we leave Loading is
                // reading the session, and a fresh one still lets you log in
                if matches!(self.screen, Screen::Loading) {
                    self.navigate(Navigation::to(Route::Home));
                }

                vec![]
            }
        }
    }

    /// Keys mean different things on different screens. Anything a screen
    /// doesn't claim goes to its form.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match &mut self.screen {
            Screen::Login(flow, form) => match key.code {
                KeyCode::Esc => {
                    self.screen = Screen::Exiting(ExitCode::SUCCESS);
                    vec![]
                }
                KeyCode::Char('n') if ctrl => {
                    self.navigate(Navigation::to(Route::Signup));
                    vec![]
                }
                _ => match form.handle_key(key) {
                    FormEvent::Focused(field) => {
                        flow.focus(field);
                        vec![]
                    }
                    FormEvent::Changed(field, value) => {
                        flow.change(field, value);
                        vec![]
                    }
                    FormEvent::Submit => flow
                        .submit()
                        .map(|req| {
                            Effect::LogIn(self.submissions.begin(), self.client.clone(), req)
                        })
                        .into_iter()
                        .collect(),
                    FormEvent::Ignored => vec![],
                },
            },
            Screen::Signup(flow, form) => match key.code {
                KeyCode::Esc => {
                    self.navigate(Navigation::to(Route::Home));
                    vec![]
                }
                _ => match form.handle_key(key) {
                    FormEvent::Focused(field) => {
                        flow.focus(field);
                        vec![]
                    }
                    FormEvent::Changed(field, value) => {
                        flow.change(field, value);
                        vec![]
                    }
                    FormEvent::Submit => flow
                        .submit()
                        .map(|req| {
                            Effect::SignUp(self.submissions.begin(), self.client.clone(), req)
                        })
                        .into_iter()
                        .collect(),
                    FormEvent::Ignored => vec![],
                },
            },
            Screen::Home => match key.code {
                KeyCode::Char('o') => self.log_out(),
                KeyCode::Char('q') => {
                    self.screen = Screen::Exiting(ExitCode::SUCCESS);
                    vec![]
                }
                _ => vec![],
            },
            Screen::Loading | Screen::Exiting(_) => vec![],
        }
    }

    /// Forget the token, both in memory and on disk
    fn log_out(&mut self) -> Vec<Effect> {
        self.session.clear();
        self.client.auth = None;
        self.status_line = Some("Logged out".to_owned());
        self.navigate(Navigation::to(Route::Home));

        vec![Effect::SaveSession(self.session.clone())]
    }

    /// Replace the current screen. Home shows the login screen to anyone
    /// without a token, starting from whatever credentials came along.
    fn navigate(&mut self, nav: Navigation) {
        tracing::debug!(to = nav.to.path(), "navigating");

        self.submissions.forget();

        self.screen = match nav.to {
            Route::Home if self.session.is_logged_in() => Screen::Home,
            Route::Home => {
                let flow = nav.state.map_or_else(LoginFlow::new, LoginFlow::prefilled);
                let form = AuthForm::new(flow.form());

                Screen::Login(flow, form)
            }
            Route::Signup => {
                let flow = SignupFlow::new();
                let form = AuthForm::new(flow.form());

                Screen::Signup(flow, form)
            }
        };
    }

    /// Tell the caller if the app should exit, and with what code.
    pub fn should_exit(&self) -> Option<ExitCode> {
        match self.screen {
            Screen::Exiting(code) => Some(code),
            _ => None,
        }
    }
}
