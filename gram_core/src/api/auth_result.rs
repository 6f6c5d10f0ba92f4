use crate::login::AuthToken;
use serde::{Deserialize, Serialize};

/// The normalized answer to a login or signup mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    /// Did the server accept the request?
    pub is_success: bool,

    /// Only ever present for successful logins.
    #[serde(default)]
    pub token: Option<AuthToken>,

    /// Why the server said no. Not guaranteed even when `is_success` is
    /// false.
    #[serde(default)]
    pub error: Option<String>,
}

impl AuthResult {
    /// A successful result with no token (what signup returns)
    pub fn success() -> Self {
        Self {
            is_success: true,
            token: None,
            error: None,
        }
    }

    /// A successful login
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(AuthToken::new(token)),
            ..Self::success()
        }
    }

    /// The server turned us down
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            token: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_login_payload() {
        let result: AuthResult = serde_json::from_value(json!({
            "isSuccess": true,
            "token": "T",
            "error": null,
        }))
        .unwrap();

        assert_eq!(result, AuthResult::with_token("T"));
    }

    #[test]
    fn parses_signup_payload_without_token() {
        let result: AuthResult = serde_json::from_value(json!({
            "isSuccess": false,
            "error": "nickname taken",
        }))
        .unwrap();

        assert_eq!(result, AuthResult::failure("nickname taken"));
    }
}
