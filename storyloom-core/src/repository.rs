//! The `CharacterRepository` trait (C1, §4.1) — the boundary the
//! Context Assembler, Intervention Processor, and Simulation Engine
//! consume. Concrete implementations (filesystem-backed, in-memory) live
//! in sibling crates; this crate only defines the contract.

use crate::character::{ImmutableCharacter, LongTermCharacter};
use crate::error::RepoError;
use crate::id::CharacterId;
use async_trait::async_trait;

/// Load, cache, and persist character profiles and long-term memory.
///
/// `load` is idempotent: calling it twice for the same id is not an
/// error and does not re-read the backing store on the second call.
/// `get_immutable`/`get_long_term` load on demand if the cache is cold.
///
/// Implementations:
/// - `storyloom_state_fs::FsCharacterRepository` — `<base>/<id>/*.yaml`,
///   atomic write-then-rename on update.
/// - `storyloom_state_memory::MemoryCharacterRepository` — pure
///   in-memory, for tests and the `test_utils` mock.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Load a character's immutable profile and long-term memory into
    /// the cache if not already present. `NotFound` if the character's
    /// directory/record is missing; `InvalidData` if it exists but
    /// fails schema validation.
    async fn load(&self, id: &CharacterId) -> Result<(), RepoError>;

    /// The character's immutable profile, loading on demand.
    async fn get_immutable(&self, id: &CharacterId) -> Result<ImmutableCharacter, RepoError>;

    /// The character's current long-term memory, loading on demand.
    async fn get_long_term(&self, id: &CharacterId) -> Result<LongTermCharacter, RepoError>;

    /// Replace the cached long-term record and persist it. `new_record`
    /// must carry the same `character_id` as `id`; implementations
    /// return `RepoError::InvalidData` otherwise. Readers concurrent
    /// with this call observe either the pre- or post-update record,
    /// never a partial struct (§4.1's thread-safety contract).
    async fn update_long_term(
        &self,
        id: &CharacterId,
        new_record: LongTermCharacter,
    ) -> Result<(), RepoError>;
}
