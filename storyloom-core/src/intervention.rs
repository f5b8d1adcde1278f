//! The `Intervention` record (§3) — an out-of-band command sandwiched
//! between two turns. Immutable after it is recorded to a `SceneLog`.

use crate::id::CharacterId;
use serde::{Deserialize, Serialize};

/// The type-specific payload of an intervention, adjacently tagged by
/// `intervention_type` with the payload nested under `intervention`
/// (§6: "discriminated by the sibling `intervention_type`").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intervention_type", content = "intervention")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterventionKind {
    /// Replace the scene's situation text.
    SceneSituationUpdate {
        /// The new situation text.
        updated_situation_element: String,
    },
    /// Queue a private revelation for `target_character_id`'s next turn.
    Revelation {
        /// The revelation text.
        revelation_content: String,
    },
    /// Add a character to the scene's participant list.
    AddCharacterToScene {
        /// The character to add.
        character_id_to_add: CharacterId,
    },
    /// Remove a character from the scene's participant list.
    RemoveCharacterFromScene {
        /// The character to remove.
        character_id_to_remove: CharacterId,
    },
    /// Request that the engine end the scene after the current turn.
    EndScene,
    /// Request an immediate long-term-memory update for
    /// `target_character_id`.
    TriggerLongTermUpdate,
}

impl InterventionKind {
    /// Whether this kind requires `target_character_id` to be set
    /// (§3: "required for REVELATION and TRIGGER_LONG_TERM_UPDATE").
    pub fn requires_target(&self) -> bool {
        matches!(
            self,
            InterventionKind::Revelation { .. } | InterventionKind::TriggerLongTermUpdate
        )
    }
}

/// An intervention command, recorded once and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// The 1-based turn number this intervention was applied before.
    pub applied_before_turn_number: u64,
    /// Required for `Revelation` and `TriggerLongTermUpdate`; otherwise
    /// unused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_character_id: Option<CharacterId>,
    /// The type-specific payload.
    #[serde(flatten)]
    pub kind: InterventionKind,
}

/// `Intervention::new` was called for a kind that requires
/// `target_character_id` without providing one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("target_character_id is required for this intervention type")]
pub struct MissingTarget;

impl Intervention {
    /// Construct an intervention, enforcing the target-id requirement at
    /// the type level rather than deferring it to a panic downstream.
    pub fn new(
        applied_before_turn_number: u64,
        kind: InterventionKind,
        target_character_id: Option<CharacterId>,
    ) -> Result<Self, MissingTarget> {
        if kind.requires_target() && target_character_id.is_none() {
            return Err(MissingTarget);
        }
        Ok(Self {
            applied_before_turn_number,
            target_character_id,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revelation_without_target_is_rejected() {
        let err = Intervention::new(
            2,
            InterventionKind::Revelation {
                revelation_content: "you smell smoke".into(),
            },
            None,
        )
        .unwrap_err();
        assert_eq!(err, MissingTarget);
    }

    #[test]
    fn situation_update_does_not_require_target() {
        let iv = Intervention::new(
            2,
            InterventionKind::SceneSituationUpdate {
                updated_situation_element: "rain begins".into(),
            },
            None,
        )
        .unwrap();
        assert_eq!(iv.target_character_id, None);
    }

    #[test]
    fn serializes_with_sibling_discriminator() {
        let iv = Intervention::new(
            2,
            InterventionKind::SceneSituationUpdate {
                updated_situation_element: "rain begins".into(),
            },
            None,
        )
        .unwrap();
        let json = serde_json::to_value(&iv).unwrap();
        assert_eq!(json["intervention_type"], "SCENE_SITUATION_UPDATE");
        assert_eq!(
            json["intervention"]["updated_situation_element"],
            "rain begins"
        );
        assert_eq!(json["applied_before_turn_number"], 2);
    }

    #[test]
    fn roundtrips_through_json() {
        let iv = Intervention::new(
            3,
            InterventionKind::Revelation {
                revelation_content: "you smell smoke".into(),
            },
            Some(CharacterId::new("alice")),
        )
        .unwrap();
        let json = serde_json::to_string(&iv).unwrap();
        let back: Intervention = serde_json::from_str(&json).unwrap();
        assert_eq!(iv, back);
    }
}
