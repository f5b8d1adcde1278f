//! The `Turn` record (§3): one character's produced `(think, act, talk)`,
//! immutable after it is appended to a `SceneLog`.

use crate::id::CharacterId;
use serde::{Deserialize, Serialize};

/// One character's single produced thought/action/speech, recorded in
/// strict sequence. `turn_number` is 1-based and equals the index at
/// which the turn sits in `SceneLog::turns` (invariant 1, property P1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// 1-based position within the scene.
    pub turn_number: u64,
    /// The acting character.
    pub character_id: CharacterId,
    /// The character's display name, copied at record time so the log
    /// reads correctly even if the character is later renamed or its
    /// directory goes missing.
    pub character_name: String,
    /// The character's private reasoning. Required — never omitted,
    /// never shown to other characters (§4.3's "Recent interactions"
    /// section strips it).
    pub think: String,
    /// An observable action, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<String>,
    /// Spoken dialogue, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk: Option<String>,
}

impl Turn {
    /// Construct a turn. `act`/`talk` of `""` are normalized to `None` so
    /// that "graceful omission of empty fields" (§4.3) is enforced at
    /// construction rather than at every render site.
    pub fn new(
        turn_number: u64,
        character_id: CharacterId,
        character_name: impl Into<String>,
        think: impl Into<String>,
        act: Option<String>,
        talk: Option<String>,
    ) -> Self {
        Self {
            turn_number,
            character_id,
            character_name: character_name.into(),
            think: think.into(),
            act: act.filter(|s| !s.is_empty()),
            talk: talk.filter(|s| !s.is_empty()),
        }
    }

    /// A fallback turn recorded when the LLM call or its response failed
    /// (§4.7 step 6, §9). The wording's `"(error:"` prefix is normative
    /// for test scenario S4; the full `<kind>` suffix is not.
    pub fn fallback(
        turn_number: u64,
        character_id: CharacterId,
        character_name: impl Into<String>,
        error_kind: &str,
    ) -> Self {
        Self {
            turn_number,
            character_id,
            character_name: character_name.into(),
            think: format!("(error:{error_kind})"),
            act: None,
            talk: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_act_and_talk_normalize_to_none() {
        let t = Turn::new(
            1,
            CharacterId::new("a"),
            "Alice",
            "thinking",
            Some(String::new()),
            Some(String::new()),
        );
        assert_eq!(t.act, None);
        assert_eq!(t.talk, None);
    }

    #[test]
    fn fallback_turn_has_error_prefix() {
        let t = Turn::fallback(3, CharacterId::new("b"), "Bob", "invalid_response");
        assert!(t.think.starts_with("(error:"));
        assert_eq!(t.act, None);
        assert_eq!(t.talk, None);
    }
}
