use std::fmt;

use async_trait::async_trait;

use super::types::{LoginResponse, Message};

/// Errors from talking to the message API.
///
/// The feed screen collapses all of these into one generic failure, but the
/// variants are kept distinct so the log says what actually happened.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, timeout).
    Network(String),
    /// The API answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The response body didn't match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote API as the client sees it.
///
/// Implementations are pass-through: one call, one request, no retries.
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// Exchanges credentials for a bearer token and the user's record.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Fetches one page of messages.
    async fn list_messages(
        &self,
        token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Message>, ApiError>;

    /// Creates a message and returns the record the server stored.
    async fn create_message(&self, token: &str, body: &str) -> Result<Message, ApiError>;
}
