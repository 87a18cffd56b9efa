use std::fmt::{Display, Formatter};

/// One-shot feedback for a completed signup/withdraw attempt. Hidden again
/// after the dismiss timer fires.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Banner {
    #[default]
    Hidden,
    Success(String),
    Error(String),
}

impl Banner {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Banner::Hidden)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Banner::Hidden => None,
            Banner::Success(message) | Banner::Error(message) => Some(message),
        }
    }
}

impl Display for Banner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Banner::Hidden => Ok(()),
            Banner::Success(message) => write!(f, "[ok] {message}"),
            Banner::Error(message) => write!(f, "[error] {message}"),
        }
    }
}
