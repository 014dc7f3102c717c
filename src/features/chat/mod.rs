//! # Chat Feature
//!
//! One-on-one conversations with a single persona: transcript ownership, the
//! in-flight guard, and the request/response lifecycle against the backend.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Agent-mode sends via /api/agent/chat (tools + reflection)
//! - 1.2.0: Fallback assistant message on transport failure
//! - 1.1.0: Busy-flag guard against overlapping sends
//! - 1.0.0: Initial release

pub mod session;

pub use session::{ChatMessage, ChatSession, Role};
