use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::service::{ApiError, MessageApi};
use super::types::{ErrorBody, LoginRequest, LoginResponse, Message, NewMessage};

/// `MessageApi` over HTTP, rooted at a base URL such as
/// `http://localhost:5000/api`.
///
/// # Example
/// ```no_run
/// use msgfeed::api::{HttpApi, MessageApi};
/// # async fn demo() -> Result<(), msgfeed::api::ApiError> {
/// let api = HttpApi::new("http://localhost:5000/api");
/// let session = api.login("admin", "admin123").await?;
/// let page = api.list_messages(&session.token, 1, 10).await?;
/// println!("{} messages", page.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a response into `T`, or into `ApiError::Api` when the status isn't 2xx.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    debug!("API response status: {}", status);

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.msg)
            .unwrap_or(body);
        warn!("API error: {} - {}", status.as_u16(), message);
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl MessageApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("POST /login as {}", username);
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn list_messages(
        &self,
        token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Message>, ApiError> {
        info!("GET /messages page={} per_page={}", page, per_page);
        let response = self
            .client
            .get(self.url("/messages"))
            .query(&[("page", page), ("per_page", per_page)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let messages: Vec<Message> = read_json(response).await?;
        debug!("Received {} messages for page {}", messages.len(), page);
        Ok(messages)
    }

    async fn create_message(&self, token: &str, body: &str) -> Result<Message, ApiError> {
        info!("POST /messages ({} bytes)", body.len());
        let response = self
            .client
            .post(self.url("/messages"))
            .bearer_auth(token)
            .json(&NewMessage { message: body })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}
