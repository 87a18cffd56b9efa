use serde::Deserialize;

/// Success body of the signup endpoint.
#[derive(Deserialize, Debug)]
pub struct SignupMessage {
    pub message: String,
}

/// Failure body of both mutating endpoints.
#[derive(Deserialize, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}
