//! IAM token exchange adapter
//!
//! Exchanges an IBM Cloud API key for a bearer token:
//!
//! ```text
//! POST https://iam.cloud.ibm.com/identity/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! apikey=<key>&grant_type=urn:ibm:params:oauth:grant-type:apikey
//! ```
//!
//! A 2xx response carries `access_token` (and usually `expires_in`). Error
//! responses carry `errorCode` / `errorMessage`.

use super::error::EndpointError;
use super::http::parse_url;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, info};
use wml_application::ports::identity_gateway::{AuthError, IdentityGateway};
use wml_domain::util::truncate_str;
use wml_domain::{AccessToken, ApiKey};

/// Grant type for API key exchange
pub const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct IamErrorBody {
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// Identity adapter backed by the IBM Cloud IAM token endpoint
#[derive(Debug, Clone)]
pub struct IamTokenClient {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl IamTokenClient {
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self, EndpointError> {
        Ok(Self {
            client,
            url: parse_url(url)?,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<IamErrorBody>(body)
            .ok()
            .and_then(|b| b.error_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string()
            })
    }
}

fn transport_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::Timeout
    } else {
        AuthError::Transport(e.to_string())
    }
}

#[async_trait]
impl IdentityGateway for IamTokenClient {
    async fn exchange_token(&self, api_key: &ApiKey) -> Result<AccessToken, AuthError> {
        debug!("Requesting token from {}", self.url);

        let response = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, "application/json")
            .form(&[("apikey", api_key.expose()), ("grant_type", IAM_GRANT_TYPE)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        debug!("Identity service responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: Self::rejection_message(status, &body),
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Unreadable identity response: {}", truncate_str(&body, 200));
            AuthError::InvalidBody(e.to_string())
        })?;

        let token = parsed
            .access_token
            .and_then(AccessToken::try_new)
            .ok_or(AuthError::MissingToken)?;

        info!("Token exchange succeeded");
        Ok(match parsed.expires_in {
            Some(seconds) => token.with_expires_in(seconds),
            None => token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ibm::http::build_client;
    use crate::ibm::test_support::{refused_url, serve};
    use axum::extract::{Form, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    async fn token_handler(
        State(calls): State<Arc<AtomicUsize>>,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        calls.fetch_add(1, Ordering::SeqCst);
        let grant_ok = form.get("grant_type").map(String::as_str) == Some(IAM_GRANT_TYPE);
        match form.get("apikey").map(String::as_str) {
            Some("valid-key") if grant_ok => (
                StatusCode::OK,
                Json(json!({
                    "access_token": "eyJraWQiOi",
                    "token_type": "Bearer",
                    "expires_in": 3600
                })),
            ),
            Some("no-token-key") => (StatusCode::OK, Json(json!({"token_type": "Bearer"}))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errorCode": "BXNIM0415E",
                    "errorMessage": "Provided API key could not be found."
                })),
            ),
        }
    }

    async fn start() -> (IamTokenClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/identity/token", post(token_handler))
            .with_state(calls.clone());
        let base = serve(app).await;
        let client = IamTokenClient::new(
            build_client(Duration::from_secs(5)).unwrap(),
            &format!("{}/identity/token", base),
        )
        .unwrap();
        (client, calls)
    }

    #[tokio::test]
    async fn test_valid_key_returns_token() {
        let (client, calls) = start().await;

        let token = client
            .exchange_token(&ApiKey::new("valid-key").unwrap())
            .await
            .unwrap();

        assert_eq!(token.expose(), "eyJraWQiOi");
        assert_eq!(token.expires_in(), Some(3600));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_key_reports_service_message() {
        let (client, calls) = start().await;

        let err = client
            .exchange_token(&ApiKey::new("wrong-key").unwrap())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::Rejected {
                status: 400,
                message: "Provided API key could not be found.".to_string()
            }
        );
        assert!(!err.to_string().contains("wrong-key"));
        // exactly one attempt, no retry
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_access_token() {
        let (client, _) = start().await;

        let err = client
            .exchange_token(&ApiKey::new("no-token-key").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::MissingToken);
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let app = Router::new().route("/token", post(|| async { "<html>maintenance</html>" }));
        let base = serve(app).await;
        let client = IamTokenClient::new(
            build_client(Duration::from_secs(5)).unwrap(),
            &format!("{}/token", base),
        )
        .unwrap();

        let err = client
            .exchange_token(&ApiKey::new("valid-key").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let url = refused_url().await;
        let client =
            IamTokenClient::new(build_client(Duration::from_secs(5)).unwrap(), &url).unwrap();

        let err = client
            .exchange_token(&ApiKey::new("valid-key").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let app = Router::new().route(
            "/token",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"access_token": "late"}))
            }),
        );
        let base = serve(app).await;
        let client = IamTokenClient::new(
            build_client(Duration::from_millis(200)).unwrap(),
            &format!("{}/token", base),
        )
        .unwrap();

        let err = client
            .exchange_token(&ApiKey::new("valid-key").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Timeout);
    }

    #[test]
    fn test_rejection_message_falls_back_to_status() {
        let message = IamTokenClient::rejection_message(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert_eq!(message, "Unauthorized");
    }
}
