use crate::login::Credentials;

/// Named places the app can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login screen when logged out, the main screen otherwise.
    Home,

    /// Create an account
    Signup,
}

impl Route {
    /// Where this route lives, for anything that wants a URL-ish name.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Signup => "/sign-up",
        }
    }
}

/// A request to replace the current screen with another one. `state` rides
/// along and becomes the new screen's initial values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    pub state: Option<Credentials>,
}

impl Navigation {
    /// Go somewhere without carrying anything
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            state: None,
        }
    }
}
