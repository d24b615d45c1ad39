//! Which notifications a read-state update applies to.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Target of a bulk read-state update, always scoped to the calling user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "value", rename_all = "snake_case")]
pub enum ReadSelector {
    /// Every notification of the user.
    All,
    /// The single notification with this id, if the user owns it.
    ById(DbId),
    /// Every notification of the user sent by this app.
    ByApp(String),
}

impl ReadSelector {
    /// Interpret an untyped selector coming from an outer layer
    /// (query string, form field).
    ///
    /// `None` selects everything, an integer selects one notification and any
    /// other text is an app id, taken verbatim. Returns `None` for inputs that
    /// fit none of those shapes: blank strings and numbers that are not valid
    /// ids. Surrounding whitespace is ignored only when reading a number.
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        let Some(raw) = raw else {
            return Some(Self::All);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(id) = trimmed.parse::<DbId>() {
            return Some(Self::ById(id));
        }
        if looks_numeric(trimmed) {
            return None;
        }
        Some(Self::ByApp(raw.to_string()))
    }
}

fn looks_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok() && s.chars().any(|c| c.is_ascii_digit())
}
