//! The `LlmProvider` trait — the opaque boundary to the external LLM
//! transport (§1, §6: "the gateway needs only `generate(prompt) ->
//! text`"). This crate defines only the trait; no transport
//! implementation lives in this workspace.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure from an LLM provider. The Gateway (C4) wraps
/// this into `GatewayError::GenerationFailure` — callers of the engine
/// never see a `ProviderError` directly.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request failed at the network/transport layer, or the
    /// provider returned a non-success status.
    #[error("provider request failed: {0}")]
    RequestFailed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A single opaque call to a generative model: text in, text out.
///
/// Implementations wrap whatever SDK/HTTP client talks to the actual
/// model. This workspace ships none — only the `test_utils::MockProvider`
/// queue used by the test suite.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Render one completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
