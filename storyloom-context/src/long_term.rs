//! Long-term-update context assembly (§4.3, "Long-term-update context
//! (per scene-end or on demand)").

use crate::intervention_text::describe_intervention;
use crate::names::resolve_name;
use crate::thought::experience_memory_section;
use std::collections::HashMap;
use storyloom_core::error::RepoError;
use storyloom_core::id::CharacterId;
use storyloom_core::repository::CharacterRepository;
use storyloom_core::scene_log::SceneLog;
use storyloom_core::turn::Turn;

/// At most this many of the most recent turns feed into
/// `recent_significant_events_str` (design value, §4.3).
pub const MAX_SIGNIFICANT_TURNS: usize = 10;

/// The inputs a long-term-update prompt needs, ready to flatten into
/// the Gateway's `{{key}}` substitution map.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTermUpdateContext {
    /// The character's display name.
    pub character_name: String,
    /// Same rendering as the thought context's "Experience & memory"
    /// section.
    pub existing_long_term_context_str: String,
    /// Scene situation, applicable interventions, and recent turns —
    /// first-person for the character's own turns, third-person
    /// observable-only for others.
    pub recent_significant_events_str: String,
}

impl LongTermUpdateContext {
    /// Flatten into the `{{key}}`-substitution map the Gateway expects.
    pub fn into_map(self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("character_name".to_string(), self.character_name);
        map.insert(
            "existing_long_term_context_str".to_string(),
            self.existing_long_term_context_str,
        );
        map.insert(
            "recent_significant_events_str".to_string(),
            self.recent_significant_events_str,
        );
        map
    }
}

fn own_turn_line(turn: &Turn) -> String {
    let mut parts = Vec::new();
    if !turn.think.is_empty() {
        parts.push(format!("you thought: {}", turn.think));
    }
    if let Some(act) = &turn.act {
        parts.push(format!("you acted: {act}"));
    }
    if let Some(talk) = &turn.talk {
        parts.push(format!("you said: {talk}"));
    }
    if parts.is_empty() {
        "you did nothing notable".to_string()
    } else {
        parts.join("; ")
    }
}

fn other_turn_line(name: &str, turn: &Turn) -> String {
    let mut parts = Vec::new();
    if let Some(act) = &turn.act {
        parts.push(format!("{name} acted: {act}"));
    }
    if let Some(talk) = &turn.talk {
        parts.push(format!("{name} said: {talk}"));
    }
    if parts.is_empty() {
        format!("{name} did nothing notable")
    } else {
        parts.join("; ")
    }
}

async fn significant_events_str(
    repo: &dyn CharacterRepository,
    character_id: &CharacterId,
    scene_log: &SceneLog,
) -> String {
    let mut lines = vec![format!("状況: {}", scene_log.scene_info.situation)];

    for intervention in &scene_log.interventions {
        let applies = match &intervention.target_character_id {
            Some(target) => target == character_id,
            None => true,
        };
        if applies {
            lines.push(describe_intervention(intervention));
        }
    }

    let start = scene_log.turns.len().saturating_sub(MAX_SIGNIFICANT_TURNS);
    for turn in &scene_log.turns[start..] {
        if turn.character_id == *character_id {
            lines.push(own_turn_line(turn));
        } else {
            let name = resolve_name(repo, turn.character_id.as_str()).await;
            lines.push(other_turn_line(&name, turn));
        }
    }

    lines.join("\n")
}

/// Build the long-term-update context for `character_id` from a full
/// scene log.
pub async fn assemble_long_term_update_context(
    repo: &dyn CharacterRepository,
    character_id: &CharacterId,
    scene_log: &SceneLog,
) -> Result<LongTermUpdateContext, RepoError> {
    tracing::debug!(character_id = %character_id, "assembling long-term-update context");
    let profile = repo.get_immutable(character_id).await?;
    let record = repo.get_long_term(character_id).await?;

    Ok(LongTermUpdateContext {
        character_name: profile.name,
        existing_long_term_context_str: experience_memory_section(repo, &record).await,
        recent_significant_events_str: significant_events_str(repo, character_id, scene_log).await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::character::ImmutableCharacter;
    use storyloom_core::character::LongTermCharacter;
    use storyloom_core::id::SceneId;
    use storyloom_core::intervention::{Intervention, InterventionKind};
    use storyloom_core::scene::Scene;
    use storyloom_state_memory::MemoryCharacterRepository;

    fn characters() -> Vec<(ImmutableCharacter, LongTermCharacter)> {
        vec![
            (
                ImmutableCharacter {
                    character_id: CharacterId::new("alice"),
                    name: "Alice".into(),
                    age: None,
                    occupation: None,
                    base_personality: "warm".into(),
                },
                LongTermCharacter::empty(CharacterId::new("alice")),
            ),
            (
                ImmutableCharacter {
                    character_id: CharacterId::new("bob"),
                    name: "Bob".into(),
                    age: None,
                    occupation: None,
                    base_personality: "gruff".into(),
                },
                LongTermCharacter::empty(CharacterId::new("bob")),
            ),
        ]
    }

    fn scene_log() -> SceneLog {
        let mut log = SceneLog::new(Scene {
            scene_id: SceneId::new("s1"),
            location: None,
            time: None,
            situation: "tea is brewing".into(),
            participants: vec![CharacterId::new("alice"), CharacterId::new("bob")],
            previous_scene_log_reference: None,
        });
        log.record_turn(
            CharacterId::new("alice"),
            "Alice",
            "I wonder if Bob noticed",
            Some("pours tea".into()),
            None,
        );
        log.record_turn(
            CharacterId::new("bob"),
            "Bob",
            "secret bob thought",
            None,
            Some("thanks".into()),
        );
        log.record_intervention(
            Intervention::new(
                3,
                InterventionKind::Revelation {
                    revelation_content: "the tea is poisoned".into(),
                },
                Some(CharacterId::new("alice")),
            )
            .unwrap(),
        );
        log
    }

    #[tokio::test]
    async fn own_turns_are_first_person_others_are_third_person() {
        let repo = MemoryCharacterRepository::new(characters());
        let ctx = assemble_long_term_update_context(
            &repo,
            &CharacterId::new("alice"),
            &scene_log(),
        )
        .await
        .unwrap();

        assert!(ctx.recent_significant_events_str.contains("you acted: pours tea"));
        assert!(ctx.recent_significant_events_str.contains("Bob said: thanks"));
        assert!(!ctx.recent_significant_events_str.contains("secret bob thought"));
    }

    #[tokio::test]
    async fn intervention_targeted_at_other_character_is_excluded() {
        let repo = MemoryCharacterRepository::new(characters());
        let ctx = assemble_long_term_update_context(
            &repo,
            &CharacterId::new("bob"),
            &scene_log(),
        )
        .await
        .unwrap();

        assert!(!ctx.recent_significant_events_str.contains("poisoned"));
    }

    #[tokio::test]
    async fn includes_scene_situation_first() {
        let repo = MemoryCharacterRepository::new(characters());
        let ctx = assemble_long_term_update_context(
            &repo,
            &CharacterId::new("alice"),
            &scene_log(),
        )
        .await
        .unwrap();

        assert!(ctx.recent_significant_events_str.starts_with("状況: tea is brewing"));
    }
}
