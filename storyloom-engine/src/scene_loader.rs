//! Scene-file loading (§6: "single YAML with keys `scene_id`,
//! optional `location`, optional `time`, `situation`,
//! `participant_character_ids`, optional `previous_scene_log_reference`").

use std::path::Path;
use storyloom_core::error::EngineError;
use storyloom_core::scene::{Scene, SceneFile};

/// Read and parse a scene YAML file into a `Scene`.
pub async fn load_scene_file(path: &Path) -> Result<Scene, EngineError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| EngineError::Other(Box::new(e)))?;
    let file: SceneFile =
        serde_yaml::from_str(&contents).map_err(|e| EngineError::Other(Box::new(e)))?;
    Ok(file.into())
}
