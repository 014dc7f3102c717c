//! # Backend Protocol
//!
//! Request/response types for the band-chat backend HTTP API.
//!
//! All payloads are JSON. Persona keys travel as a closed enumeration; debate
//! phase tags travel as plain strings and are mapped to [`crate::DebatePhase`]
//! for presentation so an unknown tag degrades to its raw value instead of a
//! deserialization failure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::features::personas::PersonaKey;

// ============================================================================
// Chat
// ============================================================================

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub philosopher: PersonaKey,
}

/// Response body for `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// The persona's reply text
    pub response: String,
    /// Display name of the persona that answered
    pub philosopher: String,
    /// Backend's read of the user's emotional state (open taxonomy:
    /// pain / confused / complaining / excusing / neutral)
    pub emotion_level: String,
    /// Whether the reply triggered a sharp-tongue tag
    pub critical_hit: bool,
}

// ============================================================================
// Agent chat
// ============================================================================

/// Request body for `POST /api/agent/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentChatRequest {
    pub session_id: String,
    pub message: String,
    pub philosopher: PersonaKey,
    pub enable_tools: bool,
    pub enable_reflection: bool,
}

/// Response body for `POST /api/agent/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentChatReply {
    pub response: String,
    pub philosopher: String,
    pub emotion_level: String,
    #[serde(default)]
    pub tool_results: Vec<ToolResult>,
    pub reflection_result: Option<ReflectionResult>,
    pub agent_enabled: bool,
}

/// One tool invocation made by the agent while composing its reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub output: String,
}

/// Self-review the agent ran over its draft reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionResult {
    pub passed: bool,
    #[serde(default)]
    pub feedback: String,
}

// ============================================================================
// Debate
// ============================================================================

/// Request body for `POST /api/debate/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateStartRequest {
    pub topic: String,
    pub pro_stance: String,
    pub con_stance: String,
    pub pro_philosophers: Vec<PersonaKey>,
    pub con_philosophers: Vec<PersonaKey>,
    /// Per-persona stance overrides; rarely used, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_stances: Option<HashMap<PersonaKey, String>>,
    /// Always true: the client tracks execution by polling
    #[serde(rename = "async")]
    pub async_mode: bool,
}

/// Lifecycle state of a debate as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl DebateStatus {
    /// Terminal states are never left; polling stops on the first one
    pub fn is_terminal(&self) -> bool {
        matches!(self, DebateStatus::Completed | DebateStatus::Failed)
    }
}

/// One utterance in a debate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateRecord {
    pub speaker_name: String,
    pub content: String,
    /// Phase tag; kept as a raw string for defensive display fallback
    pub phase: String,
}

/// Full state of a debate as returned by start/status endpoints.
///
/// Authoritative on every poll: the stored copy is replaced wholesale, never
/// merged field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: DebateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,
    #[serde(default)]
    pub records: Vec<DebateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DebateSnapshot {
    /// Synthesize a terminal `failed` snapshot for a submission that never
    /// reached the backend. No id, so no polling can start from it.
    pub fn submission_failure(topic: &str, error: impl Into<String>) -> Self {
        DebateSnapshot {
            id: None,
            status: DebateStatus::Failed,
            topic: Some(topic.to_string()),
            current_phase: None,
            records: Vec::new(),
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Service metadata
// ============================================================================

/// Response body for `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub service: String,
}

/// One entry from `GET /api/philosophers` - the backend's own view of a
/// persona, including signature quotes the static registry does not carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePersona {
    #[serde(rename = "type")]
    pub key: PersonaKey,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub quotes: Vec<String>,
}
