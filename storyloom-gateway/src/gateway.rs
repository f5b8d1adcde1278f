//! `Gateway` — the concrete C4 wrapper around an `LlmProvider`: reads a
//! template, renders it, calls the model, and validates the response
//! (§4.4 "Thought generation" / "Long-term update generation").

use crate::api_key::resolve_api_key;
use crate::fence::strip_fences;
use crate::template::{ensure_character_name, render};
use crate::validation::{parse_lt_update, parse_thought, LongTermUpdateProposal, ThoughtOutput};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use storyloom_core::error::GatewayError;
use storyloom_core::provider::LlmProvider;

/// LLM Gateway: owns the model identifier and drives an
/// `Arc<dyn LlmProvider>` through the template → call → validate
/// pipeline.
///
/// The API key is validated once at construction (§4.4) but not kept
/// around — the `LlmProvider` is already configured with whatever it
/// needs to transport a request, so the gateway has no further use for
/// it.
pub struct Gateway {
    model: String,
    provider: Arc<dyn LlmProvider>,
}

impl Gateway {
    /// Construct a gateway, resolving the API key in order: `api_key`
    /// argument → `env_var` → `.env` file. Fails with
    /// `GatewayError::MissingApiKey` if none provide a value.
    ///
    /// The resolved key itself is not stored: transporting it to the
    /// model is the concrete `LlmProvider`'s job, constructed with it
    /// before reaching this gateway. `Gateway::new` only validates that
    /// a key is available.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<&str>,
        env_var: &str,
        provider: Arc<dyn LlmProvider>,
    ) -> Result<Self, GatewayError> {
        resolve_api_key(api_key, env_var)?;
        Ok(Self {
            model: model.into(),
            provider,
        })
    }

    /// The model identifier this gateway was constructed with.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn read_template(&self, template_path: &Path) -> Result<String, GatewayError> {
        tokio::fs::read_to_string(template_path)
            .await
            .map_err(|_| GatewayError::TemplateNotFound(template_path.display().to_string()))
    }

    async fn call(&self, template_path: &Path, context_map: HashMap<String, String>) -> Result<String, GatewayError> {
        let mut context_map = context_map;
        ensure_character_name(&mut context_map);
        let template = self.read_template(template_path).await?;
        let prompt = render(&template, &context_map);
        let raw = self
            .provider
            .generate(&prompt)
            .await
            .map_err(|e| GatewayError::GenerationFailure(e.to_string()))?;
        Ok(strip_fences(&raw))
    }

    /// `generate_thought` (§4.4): render `template_path` with
    /// `context_map`, call the model, and validate the `{think, act,
    /// talk}` response.
    pub async fn generate_thought(
        &self,
        context_map: HashMap<String, String>,
        template_path: &Path,
    ) -> Result<ThoughtOutput, GatewayError> {
        let stripped = self.call(template_path, context_map).await?;
        parse_thought(&stripped)
    }

    /// `generate_lt_update` (§4.4): render `template_path` with
    /// `context_map`, call the model, and validate the long-term-update
    /// proposal. `character_id` is not sent to the model — it names the
    /// subject of the update for logging.
    pub async fn generate_lt_update(
        &self,
        character_id: &storyloom_core::id::CharacterId,
        context_map: HashMap<String, String>,
        template_path: &Path,
    ) -> Result<LongTermUpdateProposal, GatewayError> {
        tracing::debug!(character_id = %character_id, "requesting long-term update");
        let stripped = self.call(template_path, context_map).await?;
        parse_lt_update(&stripped)
    }
}
