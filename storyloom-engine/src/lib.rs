#![deny(missing_docs)]
//! Simulation Engine (C7, §4.7): the `NotStarted`/`Idle`/`Running`/
//! `Completed`/`Error` state machine, the round-robin turn loop,
//! intervention ingestion (typed and command-grammar forms), and the
//! end-of-scene long-term-update pipeline.

mod command;
mod engine;
mod long_term_apply;
mod scene_loader;
mod status;

pub use engine::SimulationEngine;
pub use status::{EngineState, EngineStatus};
