use std::sync::Arc;

use bytes::BufMut;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{Method, Request, Response};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use urlencoding::encode;

use crate::log;
use crate::model::{RosterSnapshot, SignupMessage};
use crate::service::ApiError;

/// Typed client for the activities backend. The wire contract is owned by
/// the backend; this side only encodes requests and decodes replies.
#[derive(Clone)]
pub struct ActivitiesApi {
    base_url: String,
    client: Arc<Client<HttpsConnector<HttpConnector>, String>>,
}

async fn read_body(response: &mut Response<Incoming>) -> Result<Vec<u8>, ApiError> {
    let mut buf = Vec::with_capacity(1024);
    while let Some(next) = response.frame().await {
        let frame = next.map_err(|e| ApiError::Malformed(e.to_string()))?;
        if let Some(chunk) = frame.data_ref() {
            buf.put_slice(chunk);
        }
    }
    Ok(buf)
}

impl ActivitiesApi {
    pub fn create(base_url: String) -> ActivitiesApi {
        ActivitiesApi {
            base_url,
            client: Arc::new(Client::builder(TokioExecutor::new()).build(HttpsConnector::new())),
        }
    }

    /// GET /activities
    pub async fn fetch_activities(&self) -> Result<RosterSnapshot, ApiError> {
        let uri = format!("{}/activities", self.base_url);
        let mut response = self.request(Method::GET, uri).await?;
        let body = read_body(&mut response).await?;
        if response.status().is_success() {
            serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))
        } else {
            Err(ApiError::from_failure(response.status(), &body))
        }
    }

    /// POST /activities/{activity}/signup?email={email}; returns the
    /// server's confirmation message.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<String, ApiError> {
        let uri = self.action_uri(activity, "signup", email);
        let mut response = self.request(Method::POST, uri).await?;
        let body = read_body(&mut response).await?;
        if response.status().is_success() {
            let parsed: SignupMessage =
                serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
            Ok(parsed.message)
        } else {
            Err(ApiError::from_failure(response.status(), &body))
        }
    }

    /// POST /activities/{activity}/unregister?email={email}; any 2xx is
    /// success, the body is not consulted.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<(), ApiError> {
        let uri = self.action_uri(activity, "unregister", email);
        let mut response = self.request(Method::POST, uri).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let body = read_body(&mut response).await.unwrap_or_default();
            Err(ApiError::from_failure(response.status(), &body))
        }
    }

    fn action_uri(&self, activity: &str, action: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/{action}?email={}",
            self.base_url,
            encode(activity),
            encode(email)
        )
    }

    async fn request(&self, method: Method, uri: String) -> Result<Response<Incoming>, ApiError> {
        log!("{method} {uri}");
        let request = Request::builder()
            .uri(uri)
            .method(method)
            .body(String::new())
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.client
            .request(request)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_uri_is_percent_encoded() {
        let api = ActivitiesApi::create("http://localhost:8000".to_string());
        assert_eq!(
            api.action_uri("Chess Club", "signup", "a+b@mergington.edu"),
            "http://localhost:8000/activities/Chess%20Club/signup?email=a%2Bb%40mergington.edu"
        );
    }
}
