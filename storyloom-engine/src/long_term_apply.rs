//! Long-term-update application (§4.7 "Long-term update application").

use storyloom_core::character::{Experience, Goal, Importance, LongTermCharacter, Memory};
use storyloom_core::error::EngineError;
use storyloom_gateway::LongTermUpdateProposal;

/// Fold a validated proposal into `current`, producing the next
/// `LongTermCharacter`. Experiences are always appended; goals are
/// upserted by exact text match (P8); memories are appended verbatim.
pub fn apply_long_term_update(
    current: &LongTermCharacter,
    proposal: &LongTermUpdateProposal,
) -> Result<LongTermCharacter, EngineError> {
    let mut next = current.clone();

    for entry in &proposal.new_experiences {
        next.experiences.push(Experience {
            event: entry.event.clone(),
            importance: importance(entry.importance)?,
        });
    }

    for entry in &proposal.updated_goals {
        let importance = importance(entry.importance)?;
        match next.goals.iter_mut().find(|g| g.goal == entry.goal) {
            Some(existing) => existing.importance = importance,
            None => next.goals.push(Goal {
                goal: entry.goal.clone(),
                importance,
            }),
        }
    }

    for entry in &proposal.new_memories {
        next.memories.push(Memory {
            memory: entry.memory.clone(),
            scene_id_of_memory: entry.scene_id_of_memory.clone(),
            related_character_ids: entry.related_character_ids.clone(),
        });
    }

    Ok(next)
}

fn importance(value: u8) -> Result<Importance, EngineError> {
    Importance::new(value).map_err(|e| EngineError::Other(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_core::id::CharacterId;
    use storyloom_gateway::{ProposedExperience, ProposedGoal, ProposedMemory};

    fn empty() -> LongTermCharacter {
        LongTermCharacter::empty(CharacterId::new("alice"))
    }

    #[test]
    fn empty_proposal_is_a_no_op() {
        let current = empty();
        let next = apply_long_term_update(&current, &LongTermUpdateProposal::default()).unwrap();
        assert_eq!(current, next);
    }

    #[test]
    fn new_experiences_are_appended() {
        let next = apply_long_term_update(
            &empty(),
            &LongTermUpdateProposal {
                new_experiences: vec![ProposedExperience {
                    event: "met a stranger".into(),
                    importance: 4,
                }],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(next.experiences.len(), 1);
        assert_eq!(next.experiences[0].importance.get(), 4);
    }

    #[test]
    fn goal_upsert_overwrites_importance_of_identical_text() {
        let mut current = empty();
        current.goals.push(Goal {
            goal: "learn to bake".into(),
            importance: Importance::new(3).unwrap(),
        });
        let proposal = LongTermUpdateProposal {
            updated_goals: vec![ProposedGoal {
                goal: "learn to bake".into(),
                importance: 8,
            }],
            ..Default::default()
        };

        let once = apply_long_term_update(&current, &proposal).unwrap();
        let twice = apply_long_term_update(&once, &proposal).unwrap();

        assert_eq!(once.goals.len(), 1);
        assert_eq!(once.goals[0].importance.get(), 8);
        assert_eq!(once, twice);
    }

    #[test]
    fn new_goal_text_appends_rather_than_overwrites() {
        let next = apply_long_term_update(
            &empty(),
            &LongTermUpdateProposal {
                updated_goals: vec![ProposedGoal {
                    goal: "learn to bake".into(),
                    importance: 5,
                }],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(next.goals.len(), 1);
    }

    #[test]
    fn new_memories_carry_related_ids() {
        let next = apply_long_term_update(
            &empty(),
            &LongTermUpdateProposal {
                new_memories: vec![ProposedMemory {
                    memory: "a warm afternoon".into(),
                    scene_id_of_memory: "s1".into(),
                    related_character_ids: vec!["bob".into()],
                }],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(next.memories[0].related_character_ids, vec!["bob"]);
    }
}
