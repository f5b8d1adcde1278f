//! `FsCharacterRepository` — filesystem-backed `CharacterRepository`
//! (C1, §4.1, §6).
//!
//! Directory layout:
//! ```text
//! <base>/<character_id>/immutable.yaml
//! <base>/<character_id>/long_term.yaml
//! ```

use crate::atomic::write_atomic;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use storyloom_core::character::{ImmutableCharacter, LongTermCharacter};
use storyloom_core::error::RepoError;
use storyloom_core::id::CharacterId;
use storyloom_core::repository::CharacterRepository;
use tokio::sync::RwLock;

/// Filesystem-backed character repository with two independent
/// process-wide caches (§4.1: "The two caches are independent
/// mappings"). A single `RwLock` per cache lets concurrent readers
/// through while a write is in flight; they observe either the pre- or
/// post-update record, never a partial struct.
pub struct FsCharacterRepository {
    base: PathBuf,
    immutable: RwLock<HashMap<CharacterId, ImmutableCharacter>>,
    long_term: RwLock<HashMap<CharacterId, LongTermCharacter>>,
}

impl FsCharacterRepository {
    /// Create a repository rooted at `base`. Nothing is read until the
    /// first `load`/`get_*` call.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            immutable: RwLock::new(HashMap::new()),
            long_term: RwLock::new(HashMap::new()),
        }
    }

    fn character_dir(&self, id: &CharacterId) -> PathBuf {
        self.base.join(id.as_str())
    }

    async fn read_immutable_file(&self, id: &CharacterId) -> Result<ImmutableCharacter, RepoError> {
        let path = self.character_dir(id).join("immutable.yaml");
        let contents = read_to_string_or_not_found(&path, id).await?;
        serde_yaml::from_str(&contents).map_err(|e| RepoError::InvalidData {
            id: id.to_string(),
            message: format!("immutable.yaml: {e}"),
        })
    }

    async fn read_long_term_file(&self, id: &CharacterId) -> Result<LongTermCharacter, RepoError> {
        let path = self.character_dir(id).join("long_term.yaml");
        let contents = read_to_string_or_not_found(&path, id).await?;
        serde_yaml::from_str(&contents).map_err(|e| RepoError::InvalidData {
            id: id.to_string(),
            message: format!("long_term.yaml: {e}"),
        })
    }
}

async fn read_to_string_or_not_found(
    path: &std::path::Path,
    id: &CharacterId,
) -> Result<String, RepoError> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RepoError::NotFound(id.to_string()))
        }
        Err(e) => Err(RepoError::Io(e)),
    }
}

#[async_trait]
impl CharacterRepository for FsCharacterRepository {
    async fn load(&self, id: &CharacterId) -> Result<(), RepoError> {
        {
            let immutable = self.immutable.read().await;
            let long_term = self.long_term.read().await;
            if immutable.contains_key(id) && long_term.contains_key(id) {
                return Ok(());
            }
        }

        let immutable_record = self.read_immutable_file(id).await?;
        let long_term_record = self.read_long_term_file(id).await?;

        if long_term_record.character_id != *id {
            return Err(RepoError::InvalidData {
                id: id.to_string(),
                message: "long_term.yaml character_id does not match directory".into(),
            });
        }

        self.immutable
            .write()
            .await
            .insert(id.clone(), immutable_record);
        self.long_term
            .write()
            .await
            .insert(id.clone(), long_term_record);
        Ok(())
    }

    async fn get_immutable(&self, id: &CharacterId) -> Result<ImmutableCharacter, RepoError> {
        if let Some(record) = self.immutable.read().await.get(id) {
            return Ok(record.clone());
        }
        self.load(id).await?;
        self.immutable
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn get_long_term(&self, id: &CharacterId) -> Result<LongTermCharacter, RepoError> {
        if let Some(record) = self.long_term.read().await.get(id) {
            return Ok(record.clone());
        }
        self.load(id).await?;
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

        let yaml = serde_yaml::to_string(&new_record).map_err(|e| RepoError::InvalidData {
            id: id.to_string(),
            message: format!("serializing long_term.yaml: {e}"),
        })?;
        let path = self.character_dir(id).join("long_term.yaml");
        write_atomic(&path, &yaml).await?;

        self.long_term.write().await.insert(id.clone(), new_record);
        Ok(())
    }
}
