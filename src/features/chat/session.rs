//! # Chat Session
//!
//! Owns one linear transcript with one persona and mediates one exchange at a
//! time. The user message is appended before the network round-trip resolves,
//! so the transcript reflects the send immediately; on failure a fixed
//! fallback reply keeps the transcript coherent while the error is still
//! propagated to the caller.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{AgentChatReply, AgentChatRequest, Backend, ChatReply, ChatRequest};
use crate::features::personas::PersonaKey;

/// Shown in place of a persona reply when the backend cannot be reached
const FALLBACK_REPLY: &str = "抱歉，系统暂时出了点问题...迷子でもいい，但现在真的连不上了。";

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Never mutated after creation; transcript order is
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Responder display name; present only on assistant messages that
    /// actually came from the backend
    pub philosopher: Option<String>,
}

impl ChatMessage {
    fn new(role: Role, content: String, philosopher: Option<String>) -> Self {
        ChatMessage {
            id: format!("msg_{}", Uuid::new_v4().simple()),
            role,
            content,
            timestamp: Utc::now(),
            philosopher,
        }
    }
}

/// One user<->persona conversation.
///
/// At most one request is in flight per session: `busy` is set synchronously
/// before any await and cleared on every exit path. Callers are expected to
/// disable input while `is_busy()`, but a send that slips through is rejected
/// here as well.
pub struct ChatSession {
    backend: Arc<dyn Backend>,
    session_id: String,
    messages: Vec<ChatMessage>,
    busy: bool,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        ChatSession {
            backend,
            session_id: format!("session_{}", Uuid::new_v4().simple()),
            messages: Vec::new(),
            busy: false,
        }
    }

    /// Stable for the lifetime of this session; lets the backend correlate
    /// turns to one conversation.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Send one message to the given persona and append the exchange to the
    /// transcript.
    ///
    /// On success the reply is appended with the responder's name and also
    /// returned. On transport failure a fixed fallback reply is appended
    /// (without attribution), the session stays usable, and the error is
    /// returned so the caller can surface it.
    ///
    /// Either way the transcript grows by exactly two messages and the busy
    /// flag ends cleared.
    pub async fn send_message(&mut self, text: &str, philosopher: PersonaKey) -> Result<ChatReply> {
        let text = self.begin_send(text)?;

        let request = ChatRequest {
            session_id: self.session_id.clone(),
            message: text,
            philosopher,
        };

        match self.backend.send_chat(&request).await {
            Ok(reply) => {
                self.finish_send_ok(reply.response.clone(), reply.philosopher.clone());
                Ok(reply)
            }
            Err(e) => Err(self.finish_send_err(e)),
        }
    }

    /// Like [`send_message`](Self::send_message), but routed through the
    /// agent endpoint so the persona may use tools and self-reflection while
    /// composing its reply.
    pub async fn send_agent_message(
        &mut self,
        text: &str,
        philosopher: PersonaKey,
        enable_tools: bool,
        enable_reflection: bool,
    ) -> Result<AgentChatReply> {
        let text = self.begin_send(text)?;

        let request = AgentChatRequest {
            session_id: self.session_id.clone(),
            message: text,
            philosopher,
            enable_tools,
            enable_reflection,
        };

        match self.backend.agent_chat(&request).await {
            Ok(reply) => {
                self.finish_send_ok(reply.response.clone(), reply.philosopher.clone());
                Ok(reply)
            }
            Err(e) => Err(self.finish_send_err(e)),
        }
    }

    /// Reset the transcript. Idempotent; the session id is untouched.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Validate preconditions, append the user message optimistically, and
    /// set the busy flag. Runs synchronously before any network work.
    fn begin_send(&mut self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            bail!("message text is empty");
        }
        if self.busy {
            bail!("a request is already in flight for this session");
        }

        self.messages
            .push(ChatMessage::new(Role::User, text.to_string(), None));
        self.busy = true;

        debug!("session {}: sent {} chars", self.session_id, text.len());
        Ok(text.to_string())
    }

    fn finish_send_ok(&mut self, response: String, philosopher: String) {
        self.messages
            .push(ChatMessage::new(Role::Assistant, response, Some(philosopher)));
        self.busy = false;
    }

    fn finish_send_err(&mut self, error: anyhow::Error) -> anyhow::Error {
        warn!("session {}: send failed: {error}", self.session_id);
        self.messages.push(ChatMessage::new(
            Role::Assistant,
            FALLBACK_REPLY.to_string(),
            None,
        ));
        self.busy = false;
        error
    }
}
