pub mod client;
pub mod service;
pub mod types;

pub use client::HttpApi;
pub use service::{ApiError, MessageApi};
pub use types::{LoginResponse, Message, User};
