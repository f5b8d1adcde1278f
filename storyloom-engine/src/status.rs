//! `get_status` snapshot (§6).

use storyloom_core::id::CharacterId;

/// The engine's public lifecycle state (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No scene loaded yet.
    NotStarted,
    /// A scene is loaded; waiting for the next `execute_one_turn`.
    Idle,
    /// A turn is currently executing.
    Running,
    /// The scene has ended; `end()` has not yet been called.
    Completed,
    /// An unrecoverable fault occurred; only `reset()` is valid.
    Error,
}

impl EngineState {
    /// A short, stable label for error messages and status snapshots.
    pub fn label(self) -> &'static str {
        match self {
            EngineState::NotStarted => "not_started",
            EngineState::Idle => "idle",
            EngineState::Running => "running",
            EngineState::Completed => "completed",
            EngineState::Error => "error",
        }
    }
}

/// A read-only snapshot of the engine's current state (§6).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    /// The current lifecycle state.
    pub state: EngineState,
    /// The round-robin index that will act on the next turn.
    pub current_turn_index: usize,
    /// How many turns have been recorded so far in the current scene.
    pub turns_completed: usize,
    /// The scene's current participant list, in turn order.
    pub participants: Vec<CharacterId>,
    /// Who would act next, if a scene is loaded and participants exist.
    pub next_character: Option<CharacterId>,
    /// The scene's current situation text.
    pub situation: Option<String>,
    /// The scene's location, if any.
    pub location: Option<String>,
    /// The scene's in-fiction time, if any.
    pub time: Option<String>,
    /// Whether `END_SCENE` has been requested but not yet acted on.
    pub end_requested: bool,
}
