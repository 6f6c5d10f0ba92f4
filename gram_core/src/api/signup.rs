use super::AuthResult;
use serde::Deserialize;

/// The variables we send to create an account.
pub type Req = crate::signup::SignupRequest;

/// What comes back from creating an account. There's never a token here; you
/// have to log in afterwards.
#[derive(Debug, Deserialize)]
pub struct Resp {
    pub signup: AuthResult,
}

/// Name of the operation in `MUTATION`
pub const OPERATION: &str = "signup";

/// Create a new account.
pub const MUTATION: &str = "mutation signup(
  $name: String!
  $nickname: String!
  $email: String!
  $password: String!
) {
  signup(name: $name, nickname: $nickname, email: $email, password: $password) {
    isSuccess
    error
  }
}";
