//! The identity on whose behalf a notification operation runs.
//!
//! Session handling lives in the embedding application. It resolves the
//! session once per request and passes the result to every service call.

/// Who is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No authenticated session.
    Anonymous,
    /// An authenticated user, identified by their login name.
    User(String),
}

impl Caller {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User(user_id.into())
    }

    /// The authenticated user id, or `None` for anonymous callers.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<Option<String>> for Caller {
    fn from(user_id: Option<String>) -> Self {
        user_id.map_or(Self::Anonymous, Self::User)
    }
}
