#![deny(missing_docs)]
//! In-memory `CharacterRepository` (C1): two `HashMap`s behind
//! `RwLock`s, pre-seeded or populated by `load`. No backing filesystem
//! — suited to tests and to scenario runs that don't need persistence
//! across process restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use storyloom_core::character::{ImmutableCharacter, LongTermCharacter};
use storyloom_core::error::RepoError;
use storyloom_core::id::CharacterId;
use storyloom_core::repository::CharacterRepository;
use tokio::sync::RwLock;

/// An in-memory character store, seeded up front via [`MemoryCharacterRepository::new`].
///
/// `load` is a no-op once a character is seeded: there is no backing
/// store to read from, so a character absent at construction time stays
/// absent (`RepoError::NotFound`) for the life of the repository.
pub struct MemoryCharacterRepository {
    immutable: RwLock<HashMap<CharacterId, ImmutableCharacter>>,
    long_term: RwLock<HashMap<CharacterId, LongTermCharacter>>,
}

impl MemoryCharacterRepository {
    /// Build a repository pre-seeded with the given characters. Each
    /// entry's `LongTermCharacter::character_id` must match its
    /// `ImmutableCharacter::character_id`; mismatches are the caller's
    /// bug, not something this constructor validates.
    pub fn new(characters: Vec<(ImmutableCharacter, LongTermCharacter)>) -> Self {
        let mut immutable = HashMap::new();
        let mut long_term = HashMap::new();
        for (profile, record) in characters {
            immutable.insert(profile.character_id.clone(), profile);
            long_term.insert(record.character_id.clone(), record);
        }
        Self {
            immutable: RwLock::new(immutable),
            long_term: RwLock::new(long_term),
        }
    }

    /// An empty repository with no characters seeded.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Default for MemoryCharacterRepository {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl CharacterRepository for MemoryCharacterRepository {
    async fn load(&self, id: &CharacterId) -> Result<(), RepoError> {
        let immutable = self.immutable.read().await;
        if immutable.contains_key(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound(id.to_string()))
        }
    }

    async fn get_immutable(&self, id: &CharacterId) -> Result<ImmutableCharacter, RepoError> {
        self.immutable
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn get_long_term(&self, id: &CharacterId) -> Result<LongTermCharacter, RepoError> {
        self.long_term
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn update_long_term(
        &self,
        id: &CharacterId,
        new_record: LongTermCharacter,
    ) -> Result<(), RepoError> {
        if new_record.character_id != *id {
            return Err(RepoError::InvalidData {
                id: id.to_string(),
                message: "update_long_term record carries a different character_id".into(),
            });
        }
        self.long_term.write().await.insert(id.clone(), new_record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, name: &str) -> ImmutableCharacter {
        ImmutableCharacter {
            character_id: CharacterId::new(id),
            name: name.into(),
            age: None,
            occupation: None,
            base_personality: "curious".into(),
        }
    }

    #[tokio::test]
    async fn seeded_character_is_immediately_available() {
        let repo = MemoryCharacterRepository::new(vec![(
            profile("alice", "Alice"),
            LongTermCharacter::empty(CharacterId::new("alice")),
        )]);
        repo.load(&CharacterId::new("alice")).await.unwrap();
        let p = repo.get_immutable(&CharacterId::new("alice")).await.unwrap();
        assert_eq!(p.name, "Alice");
    }

    #[tokio::test]
    async fn unseeded_character_is_not_found() {
        let repo = MemoryCharacterRepository::empty();
        let err = repo.load(&CharacterId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_long_term_replaces_in_place() {
        let repo = MemoryCharacterRepository::new(vec![(
            profile("alice", "Alice"),
            LongTermCharacter::empty(CharacterId::new("alice")),
        )]);
        let mut updated = LongTermCharacter::empty(CharacterId::new("alice"));
        updated.goals.push(storyloom_core::character::Goal {
            goal: "learn to bake".into(),
            importance: storyloom_core::character::Importance::new(5).unwrap(),
        });
        repo.update_long_term(&CharacterId::new("alice"), updated)
            .await
            .unwrap();

        let reread = repo.get_long_term(&CharacterId::new("alice")).await.unwrap();
        assert_eq!(reread.goals.len(), 1);
    }

    #[tokio::test]
    async fn update_long_term_rejects_mismatched_id() {
        let repo = MemoryCharacterRepository::empty();
        let wrong = LongTermCharacter::empty(CharacterId::new("bob"));
        let err = repo
            .update_long_term(&CharacterId::new("alice"), wrong)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidData { .. }));
    }
}
