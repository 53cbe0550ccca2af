use serde::{Deserialize, Serialize};

/// A single message as returned by the remote API.
///
/// The client never creates these itself; every `Message` in memory came
/// from a list or create response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    /// Body text.
    pub message: String,
    /// Identifier of the user who posted it.
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// Body of `POST /login`.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// The user record embedded in a successful login response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: String,
}

/// Successful `POST /login` response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of `POST /messages`.
#[derive(Serialize, Debug, Clone)]
pub struct NewMessage<'a> {
    pub message: &'a str,
}

/// Error payload the API sends alongside non-2xx statuses: `{"msg": "..."}`.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub msg: String,
}
