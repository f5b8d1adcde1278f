//! Filesystem-backed persistence for storyloom: `FsCharacterRepository`
//! (C1) and scene-log flush/read (C5), both built on the same
//! write-to-temp-then-rename discipline.

#![deny(missing_docs)]

mod atomic;
mod character_repo;
mod scene_log_store;

pub use character_repo::FsCharacterRepository;
pub use scene_log_store::{flush_scene_log, read_scene_log, simulation_dir};
