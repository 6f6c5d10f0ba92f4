use regex::Regex;
use std::sync::LazyLock;

/// A length limit and what to tell the user when it's broken.
#[derive(Debug)]
pub struct Limit {
    /// Number of characters (not bytes!)
    pub chars: usize,

    /// Message shown under the field
    pub message: &'static str,
}

/// A regex the whole value has to match.
#[derive(Debug)]
pub struct Pattern {
    /// The compiled pattern. Anchor it yourself; we use `is_match`.
    pub regex: &'static LazyLock<Regex>,

    /// Message shown under the field
    pub message: &'static str,
}

/// Constraints on a single field. Checks run in declaration order and the
/// first one that fails wins.
#[derive(Debug)]
pub struct Rule {
    /// If set, empty values are rejected with this message.
    pub required: Option<&'static str>,

    /// Shortest acceptable value
    pub min_length: Option<Limit>,

    /// Longest acceptable value
    pub max_length: Option<Limit>,

    /// Shape the value has to have
    pub pattern: Option<Pattern>,
}

impl Rule {
    /// Check a value against this rule, giving back the message for the first
    /// constraint it breaks.
    ///
    /// ## Errors
    ///
    /// The message of the first failing constraint.
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        if value.is_empty() {
            return match self.required {
                Some(message) => Err(message),
                None => Ok(()),
            };
        }

        let chars = value.chars().count();

        if let Some(min) = &self.min_length {
            if chars < min.chars {
                return Err(min.message);
            }
        }

        if let Some(max) = &self.max_length {
            if chars > max.chars {
                return Err(max.message);
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.regex.is_match(value) {
                return Err(pattern.message);
            }
        }

        Ok(())
    }

    /// Convenience for when you only care about pass/fail.
    pub fn accepts(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }
}

static NICKNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid nickname pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Your real name, as shown on your profile.
pub static NAME: Rule = Rule {
    required: Some("Please enter your name."),
    min_length: None,
    max_length: Some(Limit {
        chars: 30,
        message: "Names can be at most 30 characters.",
    }),
    pattern: None,
};

/// The handle you log in with.
pub static NICKNAME: Rule = Rule {
    required: Some("Please enter a nickname."),
    min_length: None,
    max_length: Some(Limit {
        chars: 20,
        message: "Nicknames can be at most 20 characters.",
    }),
    pattern: Some(Pattern {
        regex: &NICKNAME_PATTERN,
        message: "Nicknames may only contain letters, numbers, and underscores.",
    }),
};

pub static EMAIL: Rule = Rule {
    required: Some("Please enter your email address."),
    min_length: None,
    max_length: None,
    pattern: Some(Pattern {
        regex: &EMAIL_PATTERN,
        message: "That doesn't look like an email address.",
    }),
};

pub static PASSWORD: Rule = Rule {
    required: Some("Please enter a password."),
    min_length: Some(Limit {
        chars: 8,
        message: "Passwords must be at least 8 characters.",
    }),
    max_length: None,
    pattern: None,
};
