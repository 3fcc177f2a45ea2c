//! Watson Machine Learning deployment adapter
//!
//! Sends scoring requests to an online deployment:
//!
//! ```text
//! POST https://<region>.ml.cloud.ibm.com/ml/v4/deployments/<id>/predictions?version=2021-05-01
//! Authorization: Bearer <token>
//!
//! {"input_data": [{"fields": [...], "values": [[...], ...]}]}
//! ```

use super::error::EndpointError;
use super::http::parse_url;
use async_trait::async_trait;
use tracing::{debug, info};
use wml_application::ports::prediction_gateway::{PredictionError, PredictionGateway};
use wml_domain::util::truncate_str;
use wml_domain::{AccessToken, PredictionRequest, PredictionResponse};

/// API version date sent when the configured URL has none
pub const DEFAULT_API_VERSION: &str = "2021-05-01";

/// Prediction adapter for a single deployment URL
#[derive(Debug, Clone)]
pub struct WatsonPredictionClient {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WatsonPredictionClient {
    /// Create a client for `deployment_url`.
    ///
    /// `version` is appended as a query parameter unless the URL already
    /// carries one.
    pub fn new(
        client: reqwest::Client,
        deployment_url: &str,
        version: &str,
    ) -> Result<Self, EndpointError> {
        let mut url = parse_url(deployment_url)?;
        if !url.query_pairs().any(|(k, _)| k == "version") {
            url.query_pairs_mut().append_pair("version", version);
        }
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

fn transport_error(e: reqwest::Error) -> PredictionError {
    if e.is_timeout() {
        PredictionError::Timeout
    } else {
        PredictionError::Transport(e.to_string())
    }
}

#[async_trait]
impl PredictionGateway for WatsonPredictionClient {
    async fn predict(
        &self,
        token: &AccessToken,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        debug!(
            "POST {} ({} records)",
            self.url,
            request.records().len()
        );

        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(token.expose())
            .json(&request.to_payload())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let raw = response.text().await.map_err(transport_error)?;
        debug!("Deployment responded {} ({} bytes)", status, raw.len());

        if !status.is_success() {
            debug!("Error body: {}", truncate_str(&raw, 500));
            return Err(PredictionError::Rejected {
                status: status.as_u16(),
                body: raw,
            });
        }

        match PredictionResponse::from_text(raw.as_str()) {
            Ok(parsed) => {
                info!("Prediction response received");
                Ok(parsed)
            }
            Err(e) => Err(PredictionError::MalformedResponse {
                error: e.to_string(),
                raw,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ibm::http::build_client;
    use crate::ibm::test_support::{refused_url, serve};
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wml_domain::{FieldSpecification, FieldValue, InputRecord};

    #[derive(Default)]
    struct Captured {
        authorization: Option<String>,
        version: Option<String>,
        body: Option<Value>,
    }

    type Shared = Arc<Mutex<Captured>>;

    async fn predictions_handler(
        State(captured): State<Shared>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut c = captured.lock().unwrap();
        c.authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        c.version = query.get("version").cloned();
        c.body = Some(body);
        Json(json!({
            "predictions": [{
                "fields": ["prediction", "probability"],
                "values": [[0, [0.98, 0.02]]]
            }]
        }))
    }

    fn request() -> PredictionRequest {
        let fields = FieldSpecification::from_names(["UDI", "Type"]).unwrap();
        let records = vec![InputRecord::new(vec![
            FieldValue::Integer(1),
            FieldValue::from("M"),
        ])];
        PredictionRequest::new(fields, records).unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::try_new("eyJraWQiOi").unwrap()
    }

    fn client_for(url: &str) -> WatsonPredictionClient {
        WatsonPredictionClient::new(
            build_client(Duration::from_secs(5)).unwrap(),
            url,
            DEFAULT_API_VERSION,
        )
        .unwrap()
    }

    #[test]
    fn test_version_appended() {
        let client = client_for("https://example.com/ml/v4/deployments/abc/predictions");
        assert_eq!(
            client.url(),
            "https://example.com/ml/v4/deployments/abc/predictions?version=2021-05-01"
        );
    }

    #[test]
    fn test_existing_version_kept() {
        let client =
            client_for("https://example.com/ml/v4/deployments/abc/predictions?version=2023-05-02");
        assert_eq!(
            client.url(),
            "https://example.com/ml/v4/deployments/abc/predictions?version=2023-05-02"
        );
    }

    #[tokio::test]
    async fn test_request_shape_and_headers() {
        let captured: Shared = Arc::default();
        let app = Router::new()
            .route("/ml/v4/deployments/abc/predictions", post(predictions_handler))
            .with_state(captured.clone());
        let base = serve(app).await;
        let client = client_for(&format!("{}/ml/v4/deployments/abc/predictions", base));

        let response = client.predict(&token(), &request()).await.unwrap();

        let c = captured.lock().unwrap();
        assert_eq!(c.authorization.as_deref(), Some("Bearer eyJraWQiOi"));
        assert_eq!(c.version.as_deref(), Some(DEFAULT_API_VERSION));
        assert_eq!(
            c.body,
            Some(json!({"input_data": [{"fields": ["UDI", "Type"], "values": [[1, "M"]]}]}))
        );
        let table = response.extract_table().unwrap();
        assert_eq!(table.columns, vec!["prediction", "probability"]);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let app = Router::new().route(
            "/predictions",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"errors": [{"code": "deployment_not_found"}]})),
                )
            }),
        );
        let base = serve(app).await;
        let client = client_for(&format!("{}/predictions", base));

        let err = client.predict(&token(), &request()).await.unwrap_err();

        match err {
            PredictionError::Rejected { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("deployment_not_found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let app = Router::new().route("/predictions", post(|| async { "upstream hiccup" }));
        let base = serve(app).await;
        let client = client_for(&format!("{}/predictions", base));

        let err = client.predict(&token(), &request()).await.unwrap_err();

        assert!(matches!(err, PredictionError::MalformedResponse { .. }));
        assert_eq!(err.raw_body(), Some("upstream hiccup"));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_still_returned() {
        let app = Router::new().route(
            "/predictions",
            post(|| async { Json(json!({"trace": "abc", "warnings": []})) }),
        );
        let base = serve(app).await;
        let client = client_for(&format!("{}/predictions", base));

        let response = client.predict(&token(), &request()).await.unwrap();

        assert!(response.extract_table().is_err());
        assert_eq!(response.body()["trace"], "abc");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let client = client_for(&refused_url().await);

        let err = client.predict(&token(), &request()).await.unwrap_err();

        assert!(matches!(err, PredictionError::Transport(_)));
        assert_eq!(err.raw_body(), None);
    }

    #[tokio::test]
    async fn test_timeout() {
        let app = Router::new().route(
            "/predictions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let base = serve(app).await;
        let client = WatsonPredictionClient::new(
            build_client(Duration::from_millis(200)).unwrap(),
            &format!("{}/predictions", base),
            DEFAULT_API_VERSION,
        )
        .unwrap();

        let err = client.predict(&token(), &request()).await.unwrap_err();

        assert_eq!(err, PredictionError::Timeout);
    }
}
