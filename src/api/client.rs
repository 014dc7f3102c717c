//! # Backend HTTP Client
//!
//! reqwest client for the band-chat backend REST API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use std::time::Duration;

use crate::api::protocol::{
    AgentChatReply, AgentChatRequest, ChatReply, ChatRequest, DebateSnapshot, DebateStartRequest,
    HealthReply, RemotePersona,
};
use crate::api::Backend;
use crate::core::Config;

/// Default per-request timeout; persona replies are LLM-generated and slow
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the band-chat backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client from runtime configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client construction cannot fail with static options");

        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into an error carrying the status code
    fn check_status(status: StatusCode, endpoint: &str) -> Result<()> {
        if !status.is_success() {
            bail!("{endpoint} request failed with status {status}");
        }
        Ok(())
    }

    /// Probe the backend's health endpoint
    pub async fn health(&self) -> Result<HealthReply> {
        let resp = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .context("health request failed")?;
        Self::check_status(resp.status(), "health")?;
        Ok(resp.json().await?)
    }

    /// Fetch the backend's persona roster, including signature quotes
    pub async fn philosophers(&self) -> Result<Vec<RemotePersona>> {
        let resp = self
            .http
            .get(self.url("/api/philosophers"))
            .send()
            .await
            .context("philosophers request failed")?;
        Self::check_status(resp.status(), "philosophers")?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        debug!(
            "chat request: session={} philosopher={}",
            request.session_id, request.philosopher
        );

        let resp = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .context("chat request failed")?;
        Self::check_status(resp.status(), "chat")?;
        Ok(resp.json().await?)
    }

    async fn agent_chat(&self, request: &AgentChatRequest) -> Result<AgentChatReply> {
        debug!(
            "agent chat request: session={} philosopher={} tools={} reflection={}",
            request.session_id, request.philosopher, request.enable_tools,
            request.enable_reflection
        );

        let resp = self
            .http
            .post(self.url("/api/agent/chat"))
            .json(request)
            .send()
            .await
            .context("agent chat request failed")?;
        Self::check_status(resp.status(), "agent chat")?;
        Ok(resp.json().await?)
    }

    async fn start_debate(&self, request: &DebateStartRequest) -> Result<DebateSnapshot> {
        debug!(
            "debate start request: topic='{}' pro={:?} con={:?}",
            request.topic, request.pro_philosophers, request.con_philosophers
        );

        let resp = self
            .http
            .post(self.url("/api/debate/start"))
            .json(request)
            .send()
            .await
            .context("debate start request failed")?;
        Self::check_status(resp.status(), "debate start")?;
        Ok(resp.json().await?)
    }

    async fn debate_status(&self, id: &str) -> Result<DebateSnapshot> {
        let resp = self
            .http
            .get(self.url("/api/debate/status"))
            .query(&[("id", id)])
            .send()
            .await
            .context("debate status request failed")?;
        Self::check_status(resp.status(), "debate status")?;
        Ok(resp.json().await?)
    }
}
