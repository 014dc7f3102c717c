//! # API Layer
//!
//! Wire protocol and HTTP client for the band-chat backend, plus the
//! [`Backend`] seam the feature layer is written against so the network can be
//! substituted in tests.

pub mod client;
pub mod protocol;

use anyhow::Result;
use async_trait::async_trait;

pub use client::ApiClient;
pub use protocol::{
    AgentChatReply, AgentChatRequest, ChatReply, ChatRequest, DebateRecord, DebateSnapshot,
    DebateStartRequest, DebateStatus, HealthReply, ReflectionResult, RemotePersona, ToolResult,
};

/// The backend operations the session manager and debate orchestrator depend
/// on. [`ApiClient`] is the production implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// One chat turn with a persona
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// One chat turn through the tool/reflection-capable agent endpoint
    async fn agent_chat(&self, request: &AgentChatRequest) -> Result<AgentChatReply>;

    /// Submit a debate for asynchronous execution
    async fn start_debate(&self, request: &DebateStartRequest) -> Result<DebateSnapshot>;

    /// Fetch the current snapshot of a running debate
    async fn debate_status(&self, id: &str) -> Result<DebateSnapshot>;
}
