use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the API. None of these are the
/// server saying "no" to a login or signup; those come back as an
/// unsuccessful `AuthResult` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse the endpoint URL.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't reach the server, or couldn't read what it sent back.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request (4xx)
    #[error("Client error: {0}")]
    Client(String),

    /// The server had a problem (5xx)
    #[error("Server error")]
    Server,

    /// The server returned a status we don't expect, like a redirect.
    #[error("Unexpected status: {0}")]
    Unexpected(reqwest::StatusCode),

    /// The server answered, but only with GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The server answered with neither data nor errors.
    #[error("The server's response had no data")]
    MissingData,
}
