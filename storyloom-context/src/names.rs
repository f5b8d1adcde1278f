//! Name resolution shared by both context builders: §4.3 requires
//! falling back to the raw id whenever C1 doesn't have a record, rather
//! than failing the whole context build.

use storyloom_core::id::CharacterId;
use storyloom_core::repository::CharacterRepository;

/// Resolve `id` to its display name via `repo`, falling back to the raw
/// id string if the character can't be loaded.
pub async fn resolve_name(repo: &dyn CharacterRepository, id: &str) -> String {
    let character_id = CharacterId::new(id);
    match repo.get_immutable(&character_id).await {
        Ok(profile) => profile.name,
        Err(_) => id.to_string(),
    }
}
