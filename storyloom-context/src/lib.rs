#![deny(missing_docs)]
//! Context Assembler (C3, §4.3): composes the prompt-context strings
//! the LLM Gateway sends to the model. Produces strings only — never
//! calls the model itself.

mod intervention_text;
mod long_term;
mod names;
mod thought;

pub use long_term::{assemble_long_term_update_context, LongTermUpdateContext, MAX_SIGNIFICANT_TURNS};
pub use thought::{assemble_thought_context, ThoughtContext, MAX_TURNS};
