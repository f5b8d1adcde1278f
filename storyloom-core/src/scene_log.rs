//! `SceneLog` (§3, C5): the append-only, per-scene record of
//! interventions and turns, persisted as one JSON file per run (§6).

use crate::id::CharacterId;
use crate::intervention::Intervention;
use crate::scene::Scene;
use crate::turn::Turn;
use serde::{Deserialize, Serialize};

/// The canonical on-disk record of one scene run.
///
/// On-disk field names differ from the in-memory ones only for
/// `interventions` → `interventions_in_scene`, matching §6 verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLog {
    /// A snapshot of the scene this log belongs to. Kept in sync with
    /// `SceneState` by the Intervention Processor (§4.6) whenever a
    /// mutation touches scene-visible fields.
    pub scene_info: Scene,
    /// Every intervention submitted during the scene, in submission
    /// order — including ones whose dispatch later failed (§4.6:
    /// "recorded to C5 ... then dispatched").
    #[serde(rename = "interventions_in_scene")]
    pub interventions: Vec<Intervention>,
    /// Every turn executed during the scene, in execution order.
    pub turns: Vec<Turn>,
}

impl SceneLog {
    /// A fresh log for a newly-loaded scene, with no turns or
    /// interventions yet.
    pub fn new(scene_info: Scene) -> Self {
        Self {
            scene_info,
            interventions: Vec::new(),
            turns: Vec::new(),
        }
    }

    /// Append a turn. `turn_number` is computed as `len(turns) + 1`
    /// (invariant 1) — callers never supply it directly.
    pub fn record_turn(
        &mut self,
        character_id: CharacterId,
        character_name: impl Into<String>,
        think: impl Into<String>,
        act: Option<String>,
        talk: Option<String>,
    ) -> &Turn {
        let turn_number = self.turns.len() as u64 + 1;
        self.turns.push(Turn::new(
            turn_number,
            character_id,
            character_name,
            think,
            act,
            talk,
        ));
        self.turns.last().expect("just pushed")
    }

    /// Append an intervention.
    pub fn record_intervention(&mut self, intervention: Intervention) {
        self.interventions.push(intervention);
    }
}
