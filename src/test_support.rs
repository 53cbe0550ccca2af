//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{ApiError, LoginResponse, Message, MessageApi};
use crate::core::state::App;
use crate::core::storage::{LocalStorage, ROLE_KEY, TOKEN_KEY};

/// An API that refuses everything. For tests that never reach the network.
pub struct NoopApi;

#[async_trait]
impl MessageApi for NoopApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        Err(ApiError::Network("noop".to_string()))
    }

    async fn list_messages(
        &self,
        _token: &str,
        _page: u32,
        _per_page: u32,
    ) -> Result<Vec<Message>, ApiError> {
        Err(ApiError::Network("noop".to_string()))
    }

    async fn create_message(&self, _token: &str, _body: &str) -> Result<Message, ApiError> {
        Err(ApiError::Network("noop".to_string()))
    }
}

/// A fresh path under the system temp dir, unique per call.
pub fn scratch_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("msgfeed-test-{}", std::process::id()))
        .join(format!("{name}-{n}.json"))
}

pub fn message(id: u64, body: &str) -> Message {
    Message {
        id,
        message: body.to_string(),
        user_id: 1,
    }
}

/// Creates a test App with a NoopApi, empty storage and 10 messages per page.
pub fn test_app() -> App {
    App::new(
        Arc::new(NoopApi),
        LocalStorage::open(scratch_path("app")),
        10,
    )
}

/// Like `test_app`, with a token and role already stored.
pub fn test_app_with_session(token: &str, role: &str) -> App {
    let mut app = test_app();
    app.storage.set_item(TOKEN_KEY, token).unwrap();
    app.storage.set_item(ROLE_KEY, role).unwrap();
    app
}
