//! Error types for each component boundary (§7 of the spec).

use thiserror::Error;

/// Character-repository errors (C1).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RepoError {
    /// `<base>/<id>/` is missing or one of its two YAML files is missing.
    #[error("character not found: {0}")]
    NotFound(String),

    /// A YAML file exists but failed to parse or violated a schema
    /// invariant (e.g. an `importance` outside `[1..10]`).
    #[error("invalid character data for {id}: {message}")]
    InvalidData {
        /// The character whose data failed validation.
        id: String,
        /// What went wrong.
        message: String,
    },

    /// Filesystem I/O failure unrelated to "not found".
    #[error("repository io error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Scene-state errors (C2).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SceneError {
    /// A mutator was called with no scene loaded.
    #[error("no scene is loaded")]
    NotLoaded,

    /// `remove_participant` was called for an id not currently present.
    #[error("character not in scene: {0}")]
    NotInScene(String),

    /// `add_participant`/`load` would have produced a duplicate.
    #[error("duplicate participant: {0}")]
    DuplicateParticipant(String),
}

/// LLM Gateway errors (C4).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The prompt template file does not exist.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The API key could not be resolved from any source.
    #[error("missing API key: checked constructor, {env_var}, and .env")]
    MissingApiKey {
        /// The environment variable that was checked.
        env_var: String,
    },

    /// The underlying model call failed (network, HTTP status, etc).
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    /// The model's response was not valid per §4.4's contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// A short, stable label for the fallback-turn sentinel
    /// (`"(error:<kind>)"`, §9). Not localized, not meant for display.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::TemplateNotFound(_) => "template_not_found",
            GatewayError::MissingApiKey { .. } => "missing_api_key",
            GatewayError::GenerationFailure(_) => "generation_failure",
            GatewayError::InvalidResponse(_) => "invalid_response",
            GatewayError::Other(_) => "other",
        }
    }
}

/// Intervention Processor errors (C6).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InterventionError {
    /// The intervention references a character not in the scene.
    #[error("character not in scene: {0}")]
    NotInScene(String),

    /// `REVELATION`/`TRIGGER_LONG_TERM_UPDATE` without `target_character_id`.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The command text did not match the grammar in §4.7.
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// Scene-state mutation failed while applying the intervention.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Simulation Engine errors (C7).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EngineError {
    /// The call isn't valid from the engine's current state.
    #[error("wrong state: expected {expected}, was {actual}")]
    WrongState {
        /// The state the operation required.
        expected: &'static str,
        /// The state the engine was actually in.
        actual: &'static str,
    },

    /// `execute_one_turn` was called with an empty participant list.
    #[error("no participants in scene")]
    NoParticipants,

    /// A character-repository failure during setup (fail-fast per §7).
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// A scene-state failure during setup (fail-fast per §7).
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Catch-all for unrecoverable faults that push the engine to `Error`.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
