//! `SimulationEngine` (C7, §4.7): owns `SceneState`, the scene log, and
//! the pending-revelation map; drives the turn loop and intervention
//! ingestion through the C3/C4/C6 boundaries.

use crate::command::parse_command;
use crate::long_term_apply::apply_long_term_update;
use crate::scene_loader::load_scene_file;
use crate::status::{EngineState, EngineStatus};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyloom_core::{CharacterId, CharacterRepository, EngineError, Intervention, SceneState, Turn};
use storyloom_gateway::{Gateway, LongTermUpdateProposal};
use storyloom_intervention::{InterventionProcessor, PendingRevelations, ProcessOutcome};

/// The simulation engine: a single scene's worth of state plus the
/// collaborators (C1/C3/C4) it calls out to. One instance per running
/// scene; nothing here is a process-global singleton (§9).
pub struct SimulationEngine {
    state: EngineState,
    repo: Arc<dyn CharacterRepository>,
    gateway: Gateway,
    thought_template_path: PathBuf,
    lt_template_path: PathBuf,
    log_dir: PathBuf,
    scene: SceneState,
    scene_log: Option<storyloom_core::SceneLog>,
    pending_revelations: PendingRevelations,
    intervention_processor: InterventionProcessor,
    next_index: usize,
    end_requested: bool,
    simulation_id: Option<String>,
    sim_dir: Option<PathBuf>,
}

impl SimulationEngine {
    /// Construct an engine with no scene loaded (`NotStarted`).
    /// `thought_template_path`/`lt_template_path` are the two prompt
    /// templates required by §6; `log_dir` is the root scene-log
    /// directory under which each run gets its own `sim_<id>/`.
    pub fn new(
        repo: Arc<dyn CharacterRepository>,
        gateway: Gateway,
        thought_template_path: PathBuf,
        lt_template_path: PathBuf,
        log_dir: PathBuf,
    ) -> Self {
        Self {
            state: EngineState::NotStarted,
            repo,
            gateway,
            thought_template_path,
            lt_template_path,
            log_dir,
            scene: SceneState::new(),
            scene_log: None,
            pending_revelations: PendingRevelations::new(),
            intervention_processor: InterventionProcessor::new(),
            next_index: 0,
            end_requested: false,
            simulation_id: None,
            sim_dir: None,
        }
    }

    /// The simulation id stamped by the most recent `setup()`, if any.
    pub fn simulation_id(&self) -> Option<&str> {
        self.simulation_id.as_deref()
    }

    async fn flush(&self) -> Result<(), EngineError> {
        let scene_log = self
            .scene_log
            .as_ref()
            .ok_or(EngineError::WrongState { expected: "scene loaded", actual: self.state.label() })?;
        let sim_dir = self
            .sim_dir
            .as_ref()
            .ok_or(EngineError::WrongState { expected: "scene loaded", actual: self.state.label() })?;
        storyloom_state_fs::flush_scene_log(sim_dir, &scene_log.scene_info.scene_id, scene_log)
            .await
            .map_err(|e| EngineError::Other(Box::new(e)))
    }

    async fn setup_inner(&mut self, scene_path: &Path) -> Result<(), EngineError> {
        let scene = load_scene_file(scene_path).await?;

        for id in &scene.participants {
            if let Err(e) = self.repo.load(id).await {
                tracing::warn!(error = %e, character_id = %id, "character load failed during setup; id is retained");
            }
        }

        self.scene = SceneState::new();
        self.scene.load(scene.clone());
        self.scene_log = Some(storyloom_core::SceneLog::new(scene));

        let simulation_id = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let sim_dir = storyloom_state_fs::simulation_dir(&self.log_dir, &simulation_id);
        self.simulation_id = Some(simulation_id);
        self.sim_dir = Some(sim_dir);
        self.next_index = 0;
        self.end_requested = false;

        if let Err(e) = self.flush().await {
            tracing::warn!(error = %e, "initial scene-log flush failed");
        }

        Ok(())
    }

    /// Load a scene and prepare a fresh `SceneLog` (§4.7 "Setup").
    /// Fails fast: a malformed scene file or I/O error surfaces to the
    /// caller and pushes the engine to `Error`.
    pub async fn setup(&mut self, scene_path: &Path) -> Result<(), EngineError> {
        if self.state != EngineState::NotStarted {
            return Err(EngineError::WrongState {
                expected: "not_started",
                actual: self.state.label(),
            });
        }
        match self.setup_inner(scene_path).await {
            Ok(()) => {
                self.state = EngineState::Idle;
                Ok(())
            }
            Err(e) => {
                self.state = EngineState::Error;
                Err(e)
            }
        }
    }

    /// Run one round-robin turn (§4.7 "Turn loop"). Returns `Ok(false)`
    /// when the scene transitioned to `Completed` instead of producing
    /// a turn (end requested, or no participants remain).
    pub async fn execute_one_turn(&mut self) -> Result<bool, EngineError> {
        if self.state != EngineState::Idle {
            return Err(EngineError::WrongState {
                expected: "idle",
                actual: self.state.label(),
            });
        }

        if self.end_requested {
            self.state = EngineState::Completed;
            if let Err(e) = self.flush().await {
                tracing::warn!(error = %e, "flush failed while completing scene");
            }
            return Ok(false);
        }

        self.state = EngineState::Running;

        let participants = self.scene.participants().map_err(EngineError::from)?.to_vec();
        if participants.is_empty() {
            self.state = EngineState::Completed;
            if let Err(e) = self.flush().await {
                tracing::warn!(error = %e, "flush failed while completing scene");
            }
            return Ok(false);
        }

        if self.next_index >= participants.len() {
            self.next_index = 0;
        }
        let character_id = participants[self.next_index].clone();

        let character_name = match self.repo.get_immutable(&character_id).await {
            Ok(profile) => profile.name,
            Err(e) => {
                tracing::warn!(error = %e, character_id = %character_id, "name resolution failed; using id");
                character_id.to_string()
            }
        };

        let pending_revelation = self.pending_revelations.take_and_fold(&character_id);
        let scene_info = self.scene.info().map_err(EngineError::from)?.clone();
        let recent_turns: Vec<Turn> = self
            .scene_log
            .as_ref()
            .map(|log| log.turns.clone())
            .unwrap_or_default();
        let turn_number = self
            .scene_log
            .as_ref()
            .map(|log| log.turns.len() as u64 + 1)
            .unwrap_or(1);

        let (think, act, talk) = match storyloom_context::assemble_thought_context(
            self.repo.as_ref(),
            &character_id,
            &scene_info,
            &recent_turns,
            None,
            pending_revelation.as_deref(),
        )
        .await
        {
            Ok(context) => {
                let map = context.into_map(character_name.clone());
                match self
                    .gateway
                    .generate_thought(map, &self.thought_template_path)
                    .await
                {
                    Ok(output) => (output.think, Some(output.act), Some(output.talk)),
                    Err(e) => {
                        tracing::warn!(error = %e, character_id = %character_id, "thought generation failed; recording fallback turn");
                        let fallback = Turn::fallback(turn_number, character_id.clone(), character_name.clone(), e.kind());
                        (fallback.think, None, None)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, character_id = %character_id, "context assembly failed; recording fallback turn");
                let fallback = Turn::fallback(turn_number, character_id.clone(), character_name.clone(), "context_assembly_failed");
                (fallback.think, None, None)
            }
        };

        if let Some(scene_log) = self.scene_log.as_mut() {
            scene_log.record_turn(character_id, character_name, think, act, talk);
        }

        if let Err(e) = self.flush().await {
            tracing::warn!(error = %e, "scene-log flush failed after turn");
        }

        self.next_index += 1;
        if self.next_index >= participants.len() {
            self.next_index = 0;
        }

        self.state = EngineState::Idle;
        Ok(true)
    }

    /// Dispatch a typed intervention directly (§4.7 "Intervention
    /// ingestion"). Dispatch failures are logged and treated as applied
    /// (C6's own log-and-continue contract); only "no scene loaded"
    /// rejects outright.
    pub async fn process_intervention(&mut self, intervention: Intervention) -> (bool, String) {
        let scene_log = match self.scene_log.as_mut() {
            Some(log) => log,
            None => return (false, "no scene is loaded".to_string()),
        };

        let outcome = self
            .intervention_processor
            .process(
                intervention,
                &mut self.scene,
                scene_log,
                &mut self.pending_revelations,
                self.repo.as_ref(),
            )
            .await;

        match outcome {
            ProcessOutcome::Applied => {}
            ProcessOutcome::EndRequested => self.end_requested = true,
            ProcessOutcome::LongTermUpdateRequested(id) => {
                if let Err(e) = self.run_long_term_update(&id).await {
                    tracing::warn!(error = %e, character_id = %id, "long-term update failed");
                }
            }
        }

        if let Err(e) = self.flush().await {
            tracing::warn!(error = %e, "scene-log flush failed after intervention");
        }

        (true, "applied".to_string())
    }

    /// Parse and dispatch a command-grammar line (§4.7). Parse failures
    /// return `(false, message)` without touching state.
    pub async fn process_intervention_command(&mut self, text: &str) -> (bool, String) {
        let participants = self
            .scene
            .participants()
            .map(|p| p.to_vec())
            .unwrap_or_default();
        let next_turn_number = self
            .scene_log
            .as_ref()
            .map(|log| log.turns.len() as u64 + 1)
            .unwrap_or(1);

        match parse_command(text, next_turn_number, &participants) {
            Ok(intervention) => self.process_intervention(intervention).await,
            Err(message) => (false, message),
        }
    }

    async fn run_long_term_update(&self, id: &CharacterId) -> Result<LongTermUpdateProposal, EngineError> {
        let scene_log = self.scene_log.as_ref().ok_or(EngineError::WrongState {
            expected: "scene loaded",
            actual: self.state.label(),
        })?;
        let context = storyloom_context::assemble_long_term_update_context(self.repo.as_ref(), id, scene_log)
            .await
            .map_err(EngineError::from)?;
        let proposal = self
            .gateway
            .generate_lt_update(id, context.into_map(), &self.lt_template_path)
            .await
            .map_err(|e| EngineError::Other(Box::new(e)))?;

        let current = self.repo.get_long_term(id).await?;
        let next = apply_long_term_update(&current, &proposal)?;
        self.repo.update_long_term(id, next).await?;

        Ok(proposal)
    }

    /// Run the long-term-update pipeline for a single character on
    /// demand (§6). Returns `None` and logs on any failure rather than
    /// propagating — the same log-and-continue contract as `end()`.
    pub async fn update_character_long_term_info(
        &self,
        id: &CharacterId,
    ) -> Option<LongTermUpdateProposal> {
        match self.run_long_term_update(id).await {
            Ok(proposal) => Some(proposal),
            Err(e) => {
                tracing::warn!(error = %e, character_id = %id, "long-term update failed");
                None
            }
        }
    }

    /// End the simulation (§4.7 "End of simulation"): run the
    /// long-term-update pipeline for every current participant
    /// (log-and-continue per character), flush the final log, and
    /// reset to `NotStarted`. A no-op if no scene is loaded.
    pub async fn end(&mut self) -> Result<(), EngineError> {
        if self.scene_log.is_none() {
            return Ok(());
        }

        let participants = self.scene.participants().map_err(EngineError::from)?.to_vec();
        for id in participants {
            if let Err(e) = self.run_long_term_update(&id).await {
                tracing::warn!(error = %e, character_id = %id, "long-term update failed during end()");
            }
        }

        if let Err(e) = self.flush().await {
            tracing::warn!(error = %e, "final scene-log flush failed");
        }

        self.reset();
        Ok(())
    }

    /// Unconditionally clear engine state back to `NotStarted` (§4.7:
    /// `Error → NotStarted`). Also used internally by `end()`.
    pub fn reset(&mut self) {
        self.state = EngineState::NotStarted;
        self.scene = SceneState::new();
        self.scene_log = None;
        self.pending_revelations = PendingRevelations::new();
        self.next_index = 0;
        self.end_requested = false;
        self.simulation_id = None;
        self.sim_dir = None;
    }

    /// A read-only snapshot of the engine's current state (§6).
    pub fn get_status(&self) -> EngineStatus {
        let participants = self
            .scene
            .participants()
            .map(|p| p.to_vec())
            .unwrap_or_default();
        let next_character = participants.get(self.next_index).cloned();
        let turns_completed = self.scene_log.as_ref().map(|log| log.turns.len()).unwrap_or(0);
        let (situation, location, time) = match self.scene.info() {
            Ok(scene) => (Some(scene.situation.clone()), scene.location.clone(), scene.time.clone()),
            Err(_) => (None, None, None),
        };

        EngineStatus {
            state: self.state,
            current_turn_index: self.next_index,
            turns_completed,
            participants,
            next_character,
            situation,
            location,
            time,
            end_requested: self.end_requested,
        }
    }
}
