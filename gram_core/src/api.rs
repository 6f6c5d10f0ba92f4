/// Things that can go wrong talking to the API
pub mod error;
pub use error::Error;

/// The GraphQL request and response envelopes
pub mod graphql;

/// What both mutations give back
pub mod auth_result;
pub use auth_result::AuthResult;

/// The login mutation
pub mod login;

/// The signup mutation
pub mod signup;

/// Client for the API
pub mod client;
pub use client::Client;
