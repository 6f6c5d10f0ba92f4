use super::AuthResult;
use serde::Deserialize;

/// The variables we send to log in.
pub type Req = crate::login::Credentials;

/// What comes back from logging in.
#[derive(Debug, Deserialize)]
pub struct Resp {
    pub login: AuthResult,
}

/// Name of the operation in `MUTATION`
pub const OPERATION: &str = "login";

/// Log in with a nickname and password.
pub const MUTATION: &str = "mutation login($nickname: String!, $password: String!) {
  login(nickname: $nickname, password: $password) {
    isSuccess
    token
    error
  }
}";
