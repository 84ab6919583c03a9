//! HTTP room service client

use async_trait::async_trait;
use relay_common::RoomConfig;
use relay_core::{Message, MessageCollection, USERNAME_HEADER, USER_ID_HEADER};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::client::RoomBackend;
use crate::error::{BackendError, BackendResult};
use crate::request::BackendRequest;

/// Calls the room service over HTTP
///
/// Each request is a `POST` of the JSON body to `{base_url}/hello`,
/// `{base_url}/goodbye` or `{base_url}/room`. The caller's identity is passed
/// in the `X-Game-On-UserID` and `X-Game-On-Username` headers.
#[derive(Debug, Clone)]
pub struct HttpRoomClient {
    client: Client,
    base_url: String,
}

impl HttpRoomClient {
    /// Create a client with a fixed per-call timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the room configuration
    pub fn from_config(config: &RoomConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.service_url.clone(), config.timeout())
    }

    /// Base URL of the room service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RoomBackend for HttpRoomClient {
    async fn call(&self, request: &BackendRequest) -> BackendResult<Vec<Message>> {
        let kind = request.kind();
        let url = format!("{}{}", self.base_url, kind.path());
        let body = request
            .to_body()
            .map_err(|source| BackendError::Encode { kind, source })?;
        let user = request.user();

        tracing::debug!(
            kind = %kind,
            url = %url,
            bytes = body.len(),
            "Executing room service request"
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_ID_HEADER, user.user_id.as_str())
            .header(USERNAME_HEADER, user.username.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(kind, &e))?;

        let status = response.status();
        tracing::debug!(
            kind = %kind,
            status = status.as_u16(),
            "Received room service response"
        );

        if !status.is_success() {
            return Err(BackendError::Status {
                kind,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::from_reqwest(kind, &e))?;

        let collection: MessageCollection =
            serde_json::from_slice(&bytes).map_err(|e| BackendError::MalformedReply {
                kind,
                message: e.to_string(),
            })?;

        Ok(collection.messages)
    }
}
