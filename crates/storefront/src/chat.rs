//! Chat transcript with request sequencing.
//!
//! The transcript is append-only: one user line per send, one bot line per
//! outcome. The original widget had no ordering guard, so a slow reply could
//! land after a newer exchange; here every user message issues a
//! monotonically increasing token and only the latest token may append the
//! bot line - stale replies are discarded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ChatClient;

/// Greeting seeded into every new transcript.
pub const GREETING: &str = "Hi! I'm your AI assistant. How can I help you today?";

/// Fixed line substituted when the collaborator cannot be reached.
pub const FALLBACK_REPLY: &str = "Oops! Couldn't reach the chatbot server.";

/// Who authored a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Token identifying one outstanding chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// A chat session: the transcript plus the sequencing state.
pub struct ChatSession {
    user_id: String,
    transcript: Vec<ChatMessage>,
    last_issued: u64,
}

impl ChatSession {
    /// Create a session with a generated user id and the seeded greeting.
    #[must_use]
    pub fn new() -> Self {
        Self::with_user_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create a session with a caller-chosen user id.
    #[must_use]
    pub fn with_user_id(user_id: String) -> Self {
        Self {
            user_id,
            transcript: vec![ChatMessage {
                sender: Sender::Bot,
                text: GREETING.to_owned(),
            }],
            last_issued: 0,
        }
    }

    /// The id sent as `user_id` to the collaborator.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Append the user's line and issue the token for its reply.
    pub fn push_user(&mut self, text: impl Into<String>) -> RequestToken {
        self.transcript.push(ChatMessage {
            sender: Sender::User,
            text: text.into(),
        });
        self.last_issued += 1;
        RequestToken(self.last_issued)
    }

    /// Append the bot's reply for `token`.
    ///
    /// Returns `false` (and appends nothing) when a newer request has been
    /// issued since - the stale reply is dropped.
    pub fn apply_reply(&mut self, token: RequestToken, text: impl Into<String>) -> bool {
        if token.0 != self.last_issued {
            debug!(token = token.0, latest = self.last_issued, "Discarding stale chat reply");
            return false;
        }
        self.transcript.push(ChatMessage {
            sender: Sender::Bot,
            text: text.into(),
        });
        true
    }

    /// Append the fixed fallback line for `token`, under the same staleness
    /// rule as [`Self::apply_reply`].
    pub fn apply_fallback(&mut self, token: RequestToken) -> bool {
        self.apply_reply(token, FALLBACK_REPLY)
    }

    /// One full exchange: append the user line, call the collaborator, and
    /// append either the reply or the fallback. Returns the bot line.
    ///
    /// Transport failure is not an error to the caller; it degrades to the
    /// fallback line, and the rest of the session state is untouched.
    pub async fn send(&mut self, client: &ChatClient, text: &str) -> &ChatMessage {
        let token = self.push_user(text);

        match client.send(&self.user_id, text).await {
            Ok(reply) => {
                self.apply_reply(token, reply);
            }
            Err(e) => {
                debug!(error = %e, "Chat request failed, substituting fallback");
                self.apply_fallback(token);
            }
        }

        // The bot line for the latest token is always the last one appended.
        self.transcript
            .last()
            .unwrap_or_else(|| unreachable!("transcript is seeded and only appended to"))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
