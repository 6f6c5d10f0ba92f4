use super::{Action, SubmissionId};
use crate::config::Config;
use gram_core::{api::Client, Credentials, Session, SignupRequest};
use tokio::{fs, io};

/// Connections to external services that effects use. We keep these around
/// to have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`, with the request timeout from config.
    ///
    /// ## Errors
    ///
    /// If reqwest can't set up its TLS backend.
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()?,
        })
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Read the session from disk
    LoadSession,

    /// Save the session to disk
    SaveSession(Session),

    /// Log in to an existing account
    LogIn(SubmissionId, Client, Credentials),

    /// Create a new account. This doesn't log in; the app sends you to the
    /// login screen afterwards.
    SignUp(SubmissionId, Client, SignupRequest),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext, config: &Config) -> Option<Action> {
        match self.run_inner(conn, config).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(
        self,
        conn: &EffectContext,
        config: &Config,
    ) -> Result<Option<Action>, Problem> {
        match self {
            Self::LoadSession => {
                tracing::debug!("loading session");

                let store = config.session_file();

                if fs::try_exists(&store).await? {
                    let data = fs::read(&store).await?;
                    let session: Session = serde_json::from_slice(&data)?;

                    Ok(Some(Action::LoadedSession(session)))
                } else {
                    Ok(Some(Action::LoadedSession(Session::new())))
                }
            }

            Self::SaveSession(session) => {
                tracing::info!("saving session");

                fs::create_dir_all(config.data_dir()).await?;

                let data = serde_json::to_vec(&session)?;
                fs::write(config.session_file(), &data).await?;

                Ok(Some(Action::SavedSession))
            }

            Self::LogIn(id, client, req) => {
                tracing::info!(nickname = %req.nickname, "logging in");

                let result = client.login(&conn.http, &req).await;
                if let Err(err) = &result {
                    tracing::error!(?err, "login request failed");
                }

                Ok(Some(Action::LoginCompleted(id, result)))
            }

            Self::SignUp(id, client, req) => {
                tracing::info!(nickname = %req.nickname, "signing up");

                let result = client.signup(&conn.http, &req).await;
                if let Err(err) = &result {
                    tracing::error!(?err, "signup request failed");
                }

                Ok(Some(Action::SignupCompleted(id, result)))
            }
        }
    }
}

/// Problems that can happen while running an `Effect`. Trouble talking to the
/// server isn't here; it goes back to the screen that asked so it can stop
/// loading.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem writing to disk, for example with permissions or
    /// missing files.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We had a problem loading or saving JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
