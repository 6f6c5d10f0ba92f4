//! Shared logic for the gram login and signup screens. Nothing in here knows
//! about terminals; the `gram` binary is the only UI at the moment.

/// Per-field constraints shared by every form.
pub mod valid;
pub use valid::Rule;

/// Typed form state: values, field errors, and the server error slot.
pub mod form;
pub use form::{FieldError, Fields, Form};

/// The single in-flight request slot each flow uses as its busy guard.
pub mod submission;
pub use submission::Submission;

/// Logging into an existing account.
pub mod login;
pub use login::{AuthToken, Credentials, LoginFlow};

/// Creating a new account.
pub mod signup;
pub use signup::{SignupFlow, SignupRequest};

/// Who is logged in right now.
pub mod session;
pub use session::Session;

/// Named destinations and screen transitions.
pub mod route;
pub use route::{Navigation, Route};

/// Talk to the GraphQL API.
pub mod api;
