//! Per-character pending-revelation queues (§4.6 `REVELATION`, §4.7
//! step 4: "atomic take-and-clear").

use std::collections::HashMap;
use storyloom_core::id::CharacterId;

/// Queues of not-yet-delivered revelation texts, one per character.
#[derive(Debug, Default)]
pub struct PendingRevelations {
    queues: HashMap<CharacterId, Vec<String>>,
}

impl PendingRevelations {
    /// An empty set of queues.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Queue a revelation for `character_id`'s next turn.
    pub fn push(&mut self, character_id: CharacterId, text: String) {
        self.queues.entry(character_id).or_default().push(text);
    }

    /// Atomically take and clear `character_id`'s queue, folding it
    /// into a single divine-revelation-framed block. `None` if nothing
    /// was queued.
    pub fn take_and_fold(&mut self, character_id: &CharacterId) -> Option<String> {
        let queued = self.queues.remove(character_id)?;
        if queued.is_empty() {
            return None;
        }
        Some(queued.join("\n"))
    }
}
