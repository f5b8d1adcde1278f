//! `InterventionProcessor` (C6, §4.6): dispatches a single
//! intervention's effects onto `SceneState`, `SceneLog`, and the
//! pending-revelation queues.

use crate::pending_revelations::PendingRevelations;
use storyloom_core::error::InterventionError;
use storyloom_core::id::CharacterId;
use storyloom_core::intervention::{Intervention, InterventionKind};
use storyloom_core::repository::CharacterRepository;
use storyloom_core::scene::SceneState;
use storyloom_core::scene_log::SceneLog;

/// What the engine must do after a successful dispatch. Situation
/// updates, revelations, and participant changes are fully applied by
/// `process` itself; `EndRequested` and `LongTermUpdateRequested` name
/// effects only the engine (C7) can carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The intervention was fully applied; no further action needed.
    Applied,
    /// `END_SCENE` — the engine should set its `end_requested` flag.
    EndRequested,
    /// `TRIGGER_LONG_TERM_UPDATE` — the engine should run the
    /// long-term-update pipeline for this character.
    LongTermUpdateRequested(CharacterId),
}

/// Stateless dispatcher for `Intervention`s (§4.6). All mutable state
/// it touches is passed in by the caller.
#[derive(Debug, Default)]
pub struct InterventionProcessor;

impl InterventionProcessor {
    /// A new processor. Stateless — safe to share across scenes.
    pub fn new() -> Self {
        Self
    }

    /// Record `intervention` to `scene_log`, then dispatch it. Dispatch
    /// failures are logged and treated as `Applied` — the log entry
    /// already preserves the attempt (§4.6: "recorded to C5 ... then
    /// dispatched. Dispatch failures log-and-continue").
    pub async fn process(
        &self,
        intervention: Intervention,
        scene: &mut SceneState,
        scene_log: &mut SceneLog,
        pending_revelations: &mut PendingRevelations,
        repo: &dyn CharacterRepository,
    ) -> ProcessOutcome {
        scene_log.record_intervention(intervention.clone());

        match self.dispatch(&intervention, scene, pending_revelations, repo).await {
            Ok(outcome) => {
                if let Ok(info) = scene.info() {
                    scene_log.scene_info = info.clone();
                }
                outcome
            }
            Err(error) => {
                tracing::warn!(%error, "intervention dispatch failed");
                ProcessOutcome::Applied
            }
        }
    }

    async fn dispatch(
        &self,
        intervention: &Intervention,
        scene: &mut SceneState,
        pending_revelations: &mut PendingRevelations,
        repo: &dyn CharacterRepository,
    ) -> Result<ProcessOutcome, InterventionError> {
        match &intervention.kind {
            InterventionKind::SceneSituationUpdate {
                updated_situation_element,
            } => {
                scene.update_situation(updated_situation_element.clone())?;
                Ok(ProcessOutcome::Applied)
            }

            InterventionKind::Revelation { revelation_content } => {
                let target = intervention
                    .target_character_id
                    .clone()
                    .ok_or(InterventionError::MissingField("target_character_id"))?;
                pending_revelations.push(target, revelation_content.clone());
                Ok(ProcessOutcome::Applied)
            }

            InterventionKind::AddCharacterToScene {
                character_id_to_add,
            } => {
                repo.load(character_id_to_add)
                    .await
                    .map_err(|e| InterventionError::MalformedCommand(e.to_string()))?;
                scene.add_participant(character_id_to_add.clone())?;
                Ok(ProcessOutcome::Applied)
            }

            InterventionKind::RemoveCharacterFromScene {
                character_id_to_remove,
            } => {
                scene.remove_participant(character_id_to_remove)?;
                Ok(ProcessOutcome::Applied)
            }

            InterventionKind::EndScene => Ok(ProcessOutcome::EndRequested),

            InterventionKind::TriggerLongTermUpdate => {
                let target = intervention
                    .target_character_id
                    .clone()
                    .ok_or(InterventionError::MissingField("target_character_id"))?;
                Ok(ProcessOutcome::LongTermUpdateRequested(target))
            }
        }
    }
}
