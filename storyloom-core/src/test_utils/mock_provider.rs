//! `MockProvider` — a canned-response `LlmProvider` for deterministic
//! tests (S1-S6 of the spec all drive the engine through one of these).

use crate::provider::{LlmProvider, ProviderError};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Returns pre-programmed responses in call order, one per `generate`
/// call. Exhausting the queue is itself a `ProviderError` — scenario
/// tests size the queue to exactly the number of turns they expect.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl MockProvider {
    /// Build a provider that yields `responses` in order, each `Ok(text)`
    /// or `Err(message)` becoming a successful generation or a
    /// `ProviderError::RequestFailed`.
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// Convenience constructor for an all-success queue.
    pub fn ok(responses: Vec<impl Into<String>>) -> Self {
        Self::new(responses.into_iter().map(|r| Ok(r.into())).collect())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        let mut queue = self.responses.lock().await;
        match queue.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::RequestFailed(message)),
            None => Err(ProviderError::RequestFailed(
                "mock provider queue exhausted".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_responses_in_order() {
        let provider = MockProvider::ok(vec!["first", "second"]);
        assert_eq!(provider.generate("p").await.unwrap(), "first");
        assert_eq!(provider.generate("p").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn exhausted_queue_errors() {
        let provider = MockProvider::ok(Vec::<String>::new());
        assert!(provider.generate("p").await.is_err());
    }

    #[tokio::test]
    async fn err_entries_surface_as_provider_error() {
        let provider = MockProvider::new(vec![Err("boom".into())]);
        let err = provider.generate("p").await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
