//! Scene-log persistence (C5, §6): one pretty-printed JSON file per
//! scene run, under a per-simulation directory.
//!
//! ```text
//! <log_dir>/sim_<timestamp>/scene_<scene_id>.json
//! ```
//!
//! The simulation-id timestamp is the caller's concern (`SPEC_FULL.md`
//! §2: the engine stamps it once at `setup()` time); this module only
//! knows how to flush a log into an already-chosen directory.

use crate::atomic::write_atomic;
use std::path::{Path, PathBuf};
use storyloom_core::id::SceneId;
use storyloom_core::scene_log::SceneLog;

/// The directory a single simulation run's scene logs are written
/// under: `<log_dir>/sim_<simulation_id>/`.
pub fn simulation_dir(log_dir: &Path, simulation_id: &str) -> PathBuf {
    log_dir.join(format!("sim_{simulation_id}"))
}

fn scene_log_path(sim_dir: &Path, scene_id: &SceneId) -> PathBuf {
    sim_dir.join(format!("scene_{}.json", scene_id.as_str()))
}

/// Serialize `log` as pretty JSON and write it atomically to
/// `<sim_dir>/scene_<scene_id>.json`, creating `sim_dir` if needed.
pub async fn flush_scene_log(
    sim_dir: &Path,
    scene_id: &SceneId,
    log: &SceneLog,
) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(log)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    write_atomic(&scene_log_path(sim_dir, scene_id), &json).await
}

/// Read back a previously-flushed scene log. Used by tests and by
/// tooling that inspects a finished run; the engine itself never reads
/// its own log back.
pub async fn read_scene_log(sim_dir: &Path, scene_id: &SceneId) -> std::io::Result<SceneLog> {
    let contents = tokio::fs::read_to_string(scene_log_path(sim_dir, scene_id)).await?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
