#![deny(missing_docs)]
//! LLM Gateway (C4, §4.4): template rendering, API-key resolution, and
//! response validation around a `storyloom_core::LlmProvider`.

mod api_key;
mod fence;
mod gateway;
mod template;
mod validation;

pub use api_key::resolve_api_key;
pub use fence::strip_fences;
pub use gateway::Gateway;
pub use template::{ensure_character_name, render};
pub use validation::{
    parse_lt_update, parse_thought, LongTermUpdateProposal, ProposedExperience, ProposedGoal,
    ProposedMemory, ThoughtOutput,
};
