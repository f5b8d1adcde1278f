//! The intervention command grammar (§4.7):
//!
//! ```text
//! update_situation <rest-of-line>
//! give_revelation <char_id> <rest-of-line>
//! add_character <char_id>
//! remove_character <char_id>
//! end_scene
//! trigger_ltm_update <char_id>
//! ```
//!
//! Parsing validates argument counts and pre-checks membership (for
//! revelation/remove/trigger) before constructing the typed
//! `Intervention` — a malformed or out-of-scope command never reaches
//! the dispatcher.

use storyloom_core::{CharacterId, Intervention, InterventionKind};

fn require_member(participants: &[CharacterId], id: &CharacterId) -> Result<(), String> {
    if participants.contains(id) {
        Ok(())
    } else {
        Err(format!("character not in scene: {id}"))
    }
}

fn single_token(rest: &str) -> Option<&str> {
    if rest.is_empty() || rest.contains(' ') {
        None
    } else {
        Some(rest)
    }
}

/// Parse one line of intervention-command text into a typed
/// `Intervention`, or a human-readable rejection message.
/// `next_turn_number` becomes `applied_before_turn_number`.
pub fn parse_command(
    text: &str,
    next_turn_number: u64,
    participants: &[CharacterId],
) -> Result<Intervention, String> {
    let text = text.trim();
    let (verb, rest) = match text.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (text, ""),
    };

    match verb {
        "update_situation" => {
            if rest.is_empty() {
                return Err("update_situation requires <text>".to_string());
            }
            Ok(Intervention::new(
                next_turn_number,
                InterventionKind::SceneSituationUpdate {
                    updated_situation_element: rest.to_string(),
                },
                None,
            )
            .expect("SceneSituationUpdate never requires a target"))
        }

        "give_revelation" => {
            let (char_id, revelation) = rest
                .split_once(' ')
                .map(|(id, text)| (id, text.trim()))
                .ok_or_else(|| "give_revelation requires <char_id> <text>".to_string())?;
            if char_id.is_empty() || revelation.is_empty() {
                return Err("give_revelation requires <char_id> <text>".to_string());
            }
            let target = CharacterId::new(char_id);
            require_member(participants, &target)?;
            Ok(Intervention::new(
                next_turn_number,
                InterventionKind::Revelation {
                    revelation_content: revelation.to_string(),
                },
                Some(target),
            )
            .expect("Revelation always carries a target here"))
        }

        "add_character" => {
            let id = single_token(rest)
                .ok_or_else(|| "add_character requires exactly one <char_id>".to_string())?;
            Ok(Intervention::new(
                next_turn_number,
                InterventionKind::AddCharacterToScene {
                    character_id_to_add: CharacterId::new(id),
                },
                None,
            )
            .expect("AddCharacterToScene never requires a target"))
        }

        "remove_character" => {
            let id = single_token(rest)
                .ok_or_else(|| "remove_character requires exactly one <char_id>".to_string())?;
            let target = CharacterId::new(id);
            require_member(participants, &target)?;
            Ok(Intervention::new(
                next_turn_number,
                InterventionKind::RemoveCharacterFromScene {
                    character_id_to_remove: target,
                },
                None,
            )
            .expect("RemoveCharacterFromScene never requires a target"))
        }

        "end_scene" => {
            if !rest.is_empty() {
                return Err("end_scene takes no arguments".to_string());
            }
            Ok(Intervention::new(next_turn_number, InterventionKind::EndScene, None)
                .expect("EndScene never requires a target"))
        }

        "trigger_ltm_update" => {
            let id = single_token(rest)
                .ok_or_else(|| "trigger_ltm_update requires exactly one <char_id>".to_string())?;
            let target = CharacterId::new(id);
            require_member(participants, &target)?;
            Ok(Intervention::new(
                next_turn_number,
                InterventionKind::TriggerLongTermUpdate,
                Some(target),
            )
            .expect("TriggerLongTermUpdate always carries a target here"))
        }

        other => Err(format!("unknown intervention command: {other}")),
    }
}
