//! # Personas Feature
//!
//! The static roster of five band-member personas the backend can role-play
//! as, keyed by a closed enumeration shared with the wire protocol.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Added romanized names and band roles to the registry entries
//! - 1.1.0: PersonaKey enum replaces free-form string keys
//! - 1.0.0: Initial release with the five-member roster

pub mod registry;

pub use registry::{Persona, PersonaKey, PersonaRegistry};
