//! Trait seams for external collaborators.

use async_trait::async_trait;

use crate::error::Result;

/// External text-generation API.
///
/// The engine treats any error from `generate` as "generator
/// unavailable" and falls back to its local rule-based responder —
/// implementations should fail fast (bounded timeout, no retries).
#[async_trait]
pub trait Generator: Send + Sync {
    /// Provider name (e.g. "openai", "groq").
    fn name(&self) -> &str;

    /// Produce a reply to `user_message` under the given system prompt.
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}
