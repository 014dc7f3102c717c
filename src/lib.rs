// Core layer - configuration shared by library and binaries
pub mod core;

// API layer - wire protocol and HTTP client for the band-chat backend
pub mod api;

// Features layer - all feature modules
pub mod features;

// Re-export core config for convenience
pub use crate::core::Config;

// Re-export the API surface
pub use api::{ApiClient, Backend};

// Re-export feature items
pub use features::{
    // Chat
    ChatMessage, ChatSession, Role,
    // Debate
    DebateOrchestrator, DebatePhase, DebateSetup, Team, TopicPreset, PRESET_TOPICS,
    // Personas
    Persona, PersonaKey, PersonaRegistry,
};
