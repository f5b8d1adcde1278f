#![deny(missing_docs)]
//! # storyloom — umbrella crate
//!
//! A single import surface for the narrative simulation engine: scene
//! state, the round-robin turn loop, intervention ingestion, and the
//! long-term-memory pipeline. Re-exports the protocol crates and offers
//! a [`SimulationBuilder`] that wires the filesystem-backed defaults
//! together for the common case.

pub use storyloom_context as context;
pub use storyloom_core as core;
pub use storyloom_engine as engine;
pub use storyloom_gateway as gateway;
pub use storyloom_intervention as intervention;

#[cfg(feature = "state-fs")]
pub use storyloom_state_fs as state_fs;
#[cfg(feature = "state-memory")]
pub use storyloom_state_memory as state_memory;

/// Happy-path imports for composing a simulation.
pub mod prelude {
    pub use storyloom_core::{
        CharacterId, CharacterRepository, EngineError, ImmutableCharacter, Intervention,
        InterventionKind, LlmProvider, LongTermCharacter, SceneId,
    };
    pub use storyloom_engine::{EngineState, EngineStatus, SimulationEngine};
    pub use storyloom_gateway::Gateway;

    #[cfg(feature = "state-fs")]
    pub use storyloom_state_fs::FsCharacterRepository;
    #[cfg(feature = "state-memory")]
    pub use storyloom_state_memory::MemoryCharacterRepository;

    pub use crate::SimulationBuilder;
}

#[cfg(feature = "tracing-init")]
/// Initialize a `tracing-subscriber` `fmt` layer from `RUST_LOG`. A thin
/// convenience wrapper; callers who want more control should configure
/// `tracing-subscriber` themselves and skip this entirely.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}

#[cfg(feature = "state-fs")]
mod builder {
    use std::path::PathBuf;
    use std::sync::Arc;
    use storyloom_core::{EngineError, LlmProvider};
    use storyloom_engine::SimulationEngine;
    use storyloom_gateway::Gateway;
    use storyloom_state_fs::FsCharacterRepository;

    /// Builds a [`SimulationEngine`] wired to [`FsCharacterRepository`]
    /// and a [`Gateway`] over a caller-supplied [`LlmProvider`] — the
    /// common case of running a scene against real on-disk character
    /// data and prompt templates.
    pub struct SimulationBuilder {
        character_dir: PathBuf,
        log_dir: PathBuf,
        thought_template_path: PathBuf,
        lt_template_path: PathBuf,
        model: String,
        api_key: Option<String>,
        api_key_env_var: String,
    }

    impl SimulationBuilder {
        /// Start a builder. `character_dir` holds one subdirectory per
        /// character (`<id>/immutable.yaml`, `<id>/long_term.yaml`);
        /// `log_dir` is the root under which each run gets its own
        /// `sim_<timestamp>/` directory; the two template paths are the
        /// prompt templates required for thought generation and
        /// long-term-update generation respectively.
        pub fn new(
            character_dir: impl Into<PathBuf>,
            log_dir: impl Into<PathBuf>,
            thought_template_path: impl Into<PathBuf>,
            lt_template_path: impl Into<PathBuf>,
            model: impl Into<String>,
        ) -> Self {
            Self {
                character_dir: character_dir.into(),
                log_dir: log_dir.into(),
                thought_template_path: thought_template_path.into(),
                lt_template_path: lt_template_path.into(),
                model: model.into(),
                api_key: None,
                api_key_env_var: "STORYLOOM_API_KEY".to_string(),
            }
        }

        /// Supply the API key directly, skipping environment/`.env`
        /// resolution.
        #[must_use]
        pub fn api_key(mut self, key: impl Into<String>) -> Self {
            self.api_key = Some(key.into());
            self
        }

        /// Override the environment variable consulted if no explicit
        /// key was set (default `STORYLOOM_API_KEY`).
        #[must_use]
        pub fn api_key_env_var(mut self, var: impl Into<String>) -> Self {
            self.api_key_env_var = var.into();
            self
        }

        /// Build the engine. `provider` is the caller's `LlmProvider`
        /// transport — this workspace ships none of its own.
        pub fn build(self, provider: Arc<dyn LlmProvider>) -> Result<SimulationEngine, EngineError> {
            let repo = Arc::new(FsCharacterRepository::new(self.character_dir));
            let gateway = Gateway::new(self.model, self.api_key.as_deref(), &self.api_key_env_var, provider)
                .map_err(|e| EngineError::Other(Box::new(e)))?;
            Ok(SimulationEngine::new(
                repo,
                gateway,
                self.thought_template_path,
                self.lt_template_path,
                self.log_dir,
            ))
        }
    }
}

#[cfg(feature = "state-fs")]
pub use builder::SimulationBuilder;
