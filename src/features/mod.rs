//! # Features Layer
//!
//! Each feature lives in its own module with a documenting `mod.rs`.

pub mod chat;
pub mod debate;
pub mod personas;

// Re-export feature items for convenient access
pub use chat::{ChatMessage, ChatSession, Role};
pub use debate::{
    phase_color, phase_label, status_color, status_label, DebateOrchestrator, DebatePhase,
    DebateSetup, Team, TopicPreset, DEFAULT_POLL_INTERVAL, PRESET_TOPICS,
};
pub use personas::{Persona, PersonaKey, PersonaRegistry};
