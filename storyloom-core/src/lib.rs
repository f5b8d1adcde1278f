//! # storyloom-core — data model and protocol traits for the narrative
//! simulation engine.
//!
//! This crate is the protocol boundary: the value records of §3 of the
//! spec (`ImmutableCharacter`, `LongTermCharacter`, `Scene`, `Turn`,
//! `Intervention`, `SceneLog`) and the two traits that let the rest of
//! the workspace swap implementations without the engine caring —
//! [`CharacterRepository`] (C1) and [`LlmProvider`] (the model-transport
//! half of C4).
//!
//! ## Design Principle
//!
//! Every trait here is operation-defined: `CharacterRepository::load`
//! means "make this character's data available," not "read a YAML
//! file." A filesystem-backed implementation, an in-memory test double,
//! and a future database-backed one all satisfy the same contract.

#![deny(missing_docs)]

pub mod character;
pub mod error;
pub mod id;
pub mod intervention;
pub mod provider;
pub mod repository;
pub mod scene;
pub mod scene_log;
pub mod turn;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience.
pub use character::{Experience, Goal, ImmutableCharacter, Importance, LongTermCharacter, Memory};
pub use error::{EngineError, GatewayError, InterventionError, RepoError, SceneError};
pub use id::{CharacterId, SceneId};
pub use intervention::{Intervention, InterventionKind};
pub use provider::{LlmProvider, ProviderError};
pub use repository::CharacterRepository;
pub use scene::{Scene, SceneFile, SceneState};
pub use scene_log::SceneLog;
pub use turn::Turn;
