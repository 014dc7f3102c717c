//! # Debate Feature
//!
//! Configures a two-team debate, submits it for asynchronous execution on the
//! backend, and tracks it to completion by polling status snapshots.
//!
//! - **Version**: 2.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.1.0: Late poll responses after stop_polling are dropped, not applied
//! - 2.0.0: Asynchronous execution with sequential snapshot polling
//! - 1.1.0: Team roster toggling with disjointness enforcement
//! - 1.0.0: Initial release with synchronous debates

pub mod orchestrator;
pub mod phases;
pub mod teams;

pub use orchestrator::{DebateOrchestrator, DEFAULT_POLL_INTERVAL};
pub use phases::{phase_color, phase_label, status_color, status_label, DebatePhase};
pub use teams::{DebateSetup, Team, TopicPreset, PRESET_TOPICS};
