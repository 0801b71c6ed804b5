//! Thin asynchronous client for the buyback backend.
//!
//! - Carries the bearer credential for the signed-in customer.
//! - Submits sell listings and resolves the current user profile.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{CurrentUser, SellPayload};
use crate::util::version::user_agent;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("not signed in")]
    MissingCredential,
}

/// Backend boundary the sell wizard hands completed listings to.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Returns the server-assigned reference for the listing.
    async fn submit_listing(&self, payload: &SellPayload) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SellRequestDto {
    #[serde(rename = "referenceId", default)]
    reference_id: Option<Value>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

impl SellRequestDto {
    fn into_reference(self) -> Option<String> {
        [self.reference_id, self.mongo_id, self.id]
            .into_iter()
            .flatten()
            .find_map(|value| match value {
                Value::String(text) if !text.trim().is_empty() => Some(text),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
    }
}

/// Constructed once at start-up and shared through context. The bearer
/// token is set and cleared explicitly as the customer signs in and out.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    credential: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn with_base_url(base: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(&normalize_base(base))?;
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self {
            http,
            base_url,
            credential: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_credential(&self, token: impl Into<String>) {
        let token = token.into();
        *self
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        debug!("[api] credential set");
    }

    pub fn clear_credential(&self) {
        *self
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        debug!("[api] credential cleared");
    }

    pub fn has_credential(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.credential
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(ApiError::MissingCredential)
    }

    /// Resolves the account behind the current credential.
    pub async fn fetch_profile(&self) -> Result<CurrentUser, ApiError> {
        let url = self.url("auth/me")?;
        let token = self.bearer()?;
        self.fetch_data(self.http.get(url).bearer_auth(token)).await
    }

    async fn fetch_data<T>(&self, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope<Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("server responded with {status}"));
            return Err(ApiError::Api(message));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        let ApiEnvelope {
            success,
            data,
            message,
        } = envelope;

        if success {
            data.ok_or_else(|| ApiError::Api("response missing data".into()))
        } else {
            Err(ApiError::Api(
                message.unwrap_or_else(|| "request rejected".into()),
            ))
        }
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

#[async_trait]
impl SubmissionGateway for ApiClient {
    async fn submit_listing(&self, payload: &SellPayload) -> Result<String, ApiError> {
        let url = self.url("sell-requests")?;
        let token = self.bearer()?;
        info!(
            "[api] submitting sell request for {} {} (estimate {})",
            payload.listing.brand, payload.listing.model, payload.estimated_price
        );
        let dto: SellRequestDto = self
            .fetch_data(self.http.post(url).bearer_auth(token).json(payload))
            .await?;
        dto.into_reference()
            .ok_or_else(|| ApiError::Api("response missing reference id".into()))
    }
}

/// `Url::join` drops the last segment unless the base ends with a slash.
fn normalize_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceListing;
    use mockito::Matcher;

    fn payload() -> SellPayload {
        SellPayload {
            listing: DeviceListing {
                brand: "Dell".into(),
                model: "Latitude 7420".into(),
                ..DeviceListing::default()
            },
            estimated_price: 17_500,
            user_id: "user-1".into(),
        }
    }

    #[tokio::test]
    async fn submit_sends_bearer_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/sell-requests")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "brand": "Dell",
                "model": "Latitude 7420",
                "estimatedPrice": 17500,
                "userId": "user-1",
                "chargerIncluded": true
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "data": {"_id": "665f1c", "status": "pending"}}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(&format!("{}/api", server.url())).expect("client");
        client.set_credential("secret-token");
        let reference = client.submit_listing(&payload()).await.expect("submitted");

        assert_eq!(reference, "665f1c");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_maps_server_error_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/sell-requests")
            .with_status(500)
            .with_body(r#"{"success": false, "message": "database offline"}"#)
            .create_async()
            .await;

        let client = ApiClient::with_base_url(&format!("{}/api/", server.url())).expect("client");
        client.set_credential("token");
        let result = client.submit_listing(&payload()).await;

        match result {
            Err(ApiError::Api(message)) => assert_eq!(message, "database offline"),
            other => panic!("expected api error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_without_credential_fails_locally() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api").expect("client");
        client.set_credential("token");
        client.clear_credential();
        assert!(!client.has_credential());
        let result = client.submit_listing(&payload()).await;
        assert!(matches!(result, Err(ApiError::MissingCredential)));
    }

    #[tokio::test]
    async fn fetch_profile_reads_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/auth/me")
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "data": {"_id": "u42", "name": "Asha", "email": "asha@example.com", "phone": "9876543210"}}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::with_base_url(&format!("{}/api", server.url())).expect("client");
        client.set_credential("token");
        let user = client.fetch_profile().await.expect("profile");

        assert_eq!(user.id, "u42");
        assert_eq!(user.name, "Asha");
        mock.assert_async().await;
    }

    #[test]
    fn reference_prefers_explicit_field() {
        let dto: SellRequestDto =
            serde_json::from_str(r#"{"referenceId": "SR-1", "_id": "abc", "id": 7}"#)
                .expect("dto");
        assert_eq!(dto.into_reference().as_deref(), Some("SR-1"));

        let dto: SellRequestDto = serde_json::from_str(r#"{"id": 7}"#).expect("dto");
        assert_eq!(dto.into_reference().as_deref(), Some("7"));
    }
}
