//! Textual framing of an `Intervention` for the long-term-update
//! context (§4.3: "each intervention whose `target_character_id` is
//! either the character or null").

use storyloom_core::intervention::{Intervention, InterventionKind};

/// Render an intervention as a single line of prose for inclusion in
/// `recent_significant_events_str`.
pub fn describe_intervention(intervention: &Intervention) -> String {
    match &intervention.kind {
        InterventionKind::SceneSituationUpdate {
            updated_situation_element,
        } => format!("The situation changed: {updated_situation_element}"),
        InterventionKind::Revelation { revelation_content } => {
            format!("A revelation occurred: {revelation_content}")
        }
        InterventionKind::AddCharacterToScene {
            character_id_to_add,
        } => format!("{character_id_to_add} joined the scene"),
        InterventionKind::RemoveCharacterFromScene {
            character_id_to_remove,
        } => format!("{character_id_to_remove} left the scene"),
        InterventionKind::EndScene => "The scene was ended".to_string(),
        InterventionKind::TriggerLongTermUpdate => {
            "A long-term memory update was triggered".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::id::CharacterId;

    #[test]
    fn describes_situation_update() {
        let iv = Intervention::new(
            2,
            InterventionKind::SceneSituationUpdate {
                updated_situation_element: "rain begins".into(),
            },
            None,
        )
        .unwrap();
        assert!(describe_intervention(&iv).contains("rain begins"));
    }

    #[test]
    fn describes_revelation() {
        let iv = Intervention::new(
            2,
            InterventionKind::Revelation {
                revelation_content: "you smell smoke".into(),
            },
            Some(CharacterId::new("alice")),
        )
        .unwrap();
        assert!(describe_intervention(&iv).contains("you smell smoke"));
    }
}
