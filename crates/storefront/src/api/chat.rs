//! Chat collaborator client.
//!
//! `POST /chat` with `{ user_id, message }`. The reply field drifted across
//! backend drafts (`reply` in one, `response` in another); both are accepted
//! and normalized here.

use serde::{Deserialize, Serialize};
use url::Url;

use super::ApiError;

/// Client for the chat collaborator.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: Url,
}

/// Request body for `POST /chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    user_id: &'a str,
    message: &'a str,
}

/// Observed success-body shapes, normalized to one reply string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatReply {
    Reply { reply: String },
    Response { response: String },
}

impl ChatReply {
    fn into_text(self) -> String {
        match self {
            Self::Reply { reply } => reply,
            Self::Response { response } => response,
        }
    }
}

impl ChatClient {
    /// Create a chat client against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if `/chat` cannot be joined onto the base.
    pub fn new(client: reqwest::Client, base_url: &Url) -> Result<Self, ApiError> {
        let endpoint = base_url
            .join("chat")
            .map_err(|e| ApiError::Parse(format!("Invalid chat endpoint: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Send one message and return the assistant's reply text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status, or an
    /// unrecognized body. Callers render a fixed fallback line instead of
    /// propagating this (see [`crate::chat::ChatSession`]).
    pub async fn send(&self, user_id: &str, message: &str) -> Result<String, ApiError> {
        let body = ChatRequest { user_id, message };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(reply.into_text())
    }
}
