//! The `Scene` record (§3) and its in-process owner, `SceneState` (§4.2).

use crate::error::SceneError;
use crate::id::{CharacterId, SceneId};
use serde::{Deserialize, Serialize};

/// A scene: where, when, what's happening, and who's present.
///
/// `participants` is a set with a stable order (invariant 2) — insertion
/// order defines turn order, and duplicates are forbidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique key for this scene.
    pub scene_id: SceneId,
    /// Where the scene takes place.
    #[serde(default)]
    pub location: Option<String>,
    /// In-fiction time of the scene.
    #[serde(default)]
    pub time: Option<String>,
    /// What's currently happening. Mutable via `update_situation`.
    pub situation: String,
    /// Ordered participant ids. Insertion order is turn order.
    pub participants: Vec<CharacterId>,
    /// Reserved; the engine does not yet consume this (open question,
    /// §9 of the spec).
    #[serde(default)]
    pub previous_scene_log_reference: Option<String>,
}

/// On-disk scene file shape (§6): same fields, but the participant list
/// is named `participant_character_ids` there. `Scene` is the in-memory
/// record; `SceneFile` is the literal YAML shape and converts into one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    /// Unique key for this scene.
    pub scene_id: SceneId,
    /// Where the scene takes place.
    #[serde(default)]
    pub location: Option<String>,
    /// In-fiction time of the scene.
    #[serde(default)]
    pub time: Option<String>,
    /// What's currently happening.
    pub situation: String,
    /// Ordered participant ids, as they appear in the YAML file.
    pub participant_character_ids: Vec<CharacterId>,
    /// Reserved; see `Scene::previous_scene_log_reference`.
    #[serde(default)]
    pub previous_scene_log_reference: Option<String>,
}

impl From<SceneFile> for Scene {
    fn from(file: SceneFile) -> Self {
        Scene {
            scene_id: file.scene_id,
            location: file.location,
            time: file.time,
            situation: file.situation,
            participants: file.participant_character_ids,
            previous_scene_log_reference: file.previous_scene_log_reference,
        }
    }
}

/// Holds at most one current scene and mediates its mutation (C2, §4.2).
///
/// All mutators fail with `SceneError::NotLoaded` when no scene is
/// loaded. `add_participant` is a silent no-op when the id is already
/// present (preserving invariant 2); `remove_participant` fails with
/// `SceneError::NotInScene` rather than silently no-op, since a caller
/// asking to remove someone absent is almost always a bug in the caller.
#[derive(Debug, Default)]
pub struct SceneState {
    current: Option<Scene>,
}

impl SceneState {
    /// An empty state with no scene loaded.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Set the current scene, replacing any previous one.
    pub fn load(&mut self, scene: Scene) {
        self.current = Some(scene);
    }

    /// Whether a scene is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The current scene's situation text.
    pub fn situation(&self) -> Result<&str, SceneError> {
        self.current
            .as_ref()
            .map(|s| s.situation.as_str())
            .ok_or(SceneError::NotLoaded)
    }

    /// The current scene's participant list, in turn order.
    pub fn participants(&self) -> Result<&[CharacterId], SceneError> {
        self.current
            .as_ref()
            .map(|s| s.participants.as_slice())
            .ok_or(SceneError::NotLoaded)
    }

    /// A snapshot of the full current scene record.
    pub fn info(&self) -> Result<&Scene, SceneError> {
        self.current.as_ref().ok_or(SceneError::NotLoaded)
    }

    /// Replace the situation text.
    pub fn update_situation(&mut self, text: impl Into<String>) -> Result<(), SceneError> {
        let scene = self.current.as_mut().ok_or(SceneError::NotLoaded)?;
        scene.situation = text.into();
        Ok(())
    }

    /// Append a participant if absent. No-op (not an error) if already
    /// present — matches §4.2's "silent no-op if present".
    pub fn add_participant(&mut self, id: CharacterId) -> Result<(), SceneError> {
        let scene = self.current.as_mut().ok_or(SceneError::NotLoaded)?;
        if !scene.participants.contains(&id) {
            scene.participants.push(id);
        }
        Ok(())
    }

    /// Remove a participant, preserving the order of survivors.
    pub fn remove_participant(&mut self, id: &CharacterId) -> Result<(), SceneError> {
        let scene = self.current.as_mut().ok_or(SceneError::NotLoaded)?;
        let before = scene.participants.len();
        scene.participants.retain(|p| p != id);
        if scene.participants.len() == before {
            return Err(SceneError::NotInScene(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(participants: &[&str]) -> Scene {
        Scene {
            scene_id: SceneId::new("s1"),
            location: Some("tea house".into()),
            time: Some("afternoon".into()),
            situation: "tea".into(),
            participants: participants.iter().map(|p| CharacterId::new(*p)).collect(),
            previous_scene_log_reference: None,
        }
    }

    #[test]
    fn mutators_fail_when_not_loaded() {
        let mut s = SceneState::new();
        assert!(matches!(s.situation(), Err(SceneError::NotLoaded)));
        assert!(matches!(
            s.update_situation("x"),
            Err(SceneError::NotLoaded)
        ));
        assert!(matches!(
            s.add_participant(CharacterId::new("a")),
            Err(SceneError::NotLoaded)
        ));
    }

    #[test]
    fn add_participant_is_silent_noop_when_present() {
        let mut s = SceneState::new();
        s.load(scene(&["a", "b"]));
        s.add_participant(CharacterId::new("a")).unwrap();
        assert_eq!(s.participants().unwrap().len(), 2);
    }

    #[test]
    fn add_participant_appends_when_absent() {
        let mut s = SceneState::new();
        s.load(scene(&["a", "b"]));
        s.add_participant(CharacterId::new("c")).unwrap();
        assert_eq!(
            s.participants().unwrap(),
            &[
                CharacterId::new("a"),
                CharacterId::new("b"),
                CharacterId::new("c")
            ]
        );
    }

    #[test]
    fn remove_participant_preserves_order_of_survivors() {
        let mut s = SceneState::new();
        s.load(scene(&["a", "b", "c"]));
        s.remove_participant(&CharacterId::new("b")).unwrap();
        assert_eq!(
            s.participants().unwrap(),
            &[CharacterId::new("a"), CharacterId::new("c")]
        );
    }

    #[test]
    fn remove_participant_fails_when_absent() {
        let mut s = SceneState::new();
        s.load(scene(&["a", "b"]));
        let err = s.remove_participant(&CharacterId::new("z")).unwrap_err();
        assert!(matches!(err, SceneError::NotInScene(id) if id == "z"));
    }

    #[test]
    fn update_situation_replaces_text() {
        let mut s = SceneState::new();
        s.load(scene(&["a"]));
        s.update_situation("rain begins").unwrap();
        assert_eq!(s.situation().unwrap(), "rain begins");
    }

    #[test]
    fn scene_file_converts_participant_field_name() {
        let file = SceneFile {
            scene_id: SceneId::new("s1"),
            location: None,
            time: None,
            situation: "tea".into(),
            participant_character_ids: vec![CharacterId::new("a")],
            previous_scene_log_reference: None,
        };
        let scene: Scene = file.into();
        assert_eq!(scene.participants, vec![CharacterId::new("a")]);
    }
}
