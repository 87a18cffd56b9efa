use std::error::Error;
use std::fmt::{Display, Formatter};

use hyper::StatusCode;

use crate::model::ErrorDetail;

/// Every way a call to the activities backend can go wrong. All variants are
/// recoverable: they are logged, turned into one user-facing string, and
/// never propagated past the service loop.
#[derive(Debug)]
pub enum ApiError {
    /// The request never completed (connect failure, dropped connection,
    /// unbuildable request).
    Transport(String),
    /// Non-2xx reply; `detail` is populated when the body parsed as the
    /// backend's structured error shape.
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    /// 2xx reply whose body could not be read or decoded.
    Malformed(String),
}

impl ApiError {
    pub fn from_failure(status: StatusCode, body: &[u8]) -> ApiError {
        let detail = serde_json::from_slice::<ErrorDetail>(body)
            .ok()
            .map(|e| e.detail);
        ApiError::Server { status, detail }
    }

    /// The single string shown to the user: the server's detail when there
    /// is one, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(message) => write!(f, "transport error: {message}"),
            ApiError::Server { status, detail } => write!(
                f,
                "server error {status}: {}",
                match detail {
                    None => "null",
                    Some(detail) => detail,
                }
            ),
            ApiError::Malformed(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_body_with_detail() {
        let error = ApiError::from_failure(StatusCode::BAD_REQUEST, br#"{"detail":"Already signed up"}"#);
        assert_eq!(error.user_message("An error occurred"), "Already signed up");
    }

    #[test]
    fn failure_body_without_detail_falls_back() {
        let error = ApiError::from_failure(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(error.user_message("An error occurred"), "An error occurred");
    }

    #[test]
    fn transport_and_malformed_fall_back() {
        assert_eq!(
            ApiError::Transport("refused".to_string()).user_message("fallback"),
            "fallback"
        );
        assert_eq!(
            ApiError::Malformed("not json".to_string()).user_message("fallback"),
            "fallback"
        );
    }
}
