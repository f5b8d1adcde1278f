//! The character data model (§3): `ImmutableCharacter` and
//! `LongTermCharacter`, plus the `Importance` range-checked scalar shared
//! by `Experience` and `Goal` (invariant 4, property P6).

use crate::id::CharacterId;
use serde::{Deserialize, Serialize};

/// An importance rating in `[1..10]` inclusive (invariant 4 of §3).
///
/// Deserializing an out-of-range integer fails at the serde boundary,
/// which is what turns a malformed YAML/JSON payload into
/// `RepoError::InvalidData` / `GatewayError::InvalidResponse` at the
/// call site instead of silently clamping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    /// Construct an `Importance`, rejecting values outside `[1..10]`.
    pub fn new(value: u8) -> Result<Self, ImportanceOutOfRange> {
        if (1..=10).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ImportanceOutOfRange(value))
        }
    }

    /// The raw `1..=10` value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Importance {
    type Error = ImportanceOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Importance::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

/// An `Importance` was constructed from a value outside `[1..10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("importance {0} out of range [1..10]")]
pub struct ImportanceOutOfRange(pub u8);

/// A character's fixed background. Loaded exactly once per process and
/// never mutated afterward (§3, §4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmutableCharacter {
    /// The character's unique key; must match the directory name it was
    /// loaded from.
    pub character_id: CharacterId,
    /// Display name.
    pub name: String,
    /// Age, if the character profile specifies one.
    #[serde(default)]
    pub age: Option<u32>,
    /// Occupation, if the character profile specifies one.
    #[serde(default)]
    pub occupation: Option<String>,
    /// Free-form personality description, woven into the thought context.
    pub base_personality: String,
}

/// A past event the character remembers, with a salience rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// What happened.
    pub event: String,
    /// Salience, `[1..10]`.
    pub importance: Importance,
}

/// Something the character is working toward, with a priority rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The goal text. Goal identity for upsert purposes (§4.7, P8) is
    /// this string compared exactly.
    pub goal: String,
    /// Priority, `[1..10]`.
    pub importance: Importance,
}

/// A memory of a specific scene, optionally involving other characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// The remembered content.
    pub memory: String,
    /// Which scene this memory is from.
    pub scene_id_of_memory: String,
    /// Other characters involved. Lookup-only (invariant 5) — an id here
    /// may no longer exist or may no longer be in any scene; it is never
    /// treated as an ownership reference.
    #[serde(default)]
    pub related_character_ids: Vec<String>,
}

/// A character's mutable long-term memory: experiences, goals, and
/// memories accumulated across scenes. Rewritten wholesale by
/// `CharacterRepository::update_long_term` (§4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermCharacter {
    /// Must match the owning `ImmutableCharacter::character_id`.
    pub character_id: CharacterId,
    /// Ordered list of experiences.
    #[serde(default)]
    pub experiences: Vec<Experience>,
    /// Ordered list of goals.
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Ordered list of memories.
    #[serde(default)]
    pub memories: Vec<Memory>,
}

impl LongTermCharacter {
    /// A fresh, empty long-term record for a newly-loaded character.
    pub fn empty(character_id: CharacterId) -> Self {
        Self {
            character_id,
            experiences: Vec::new(),
            goals: Vec::new(),
            memories: Vec::new(),
        }
    }
}
