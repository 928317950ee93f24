//! Unified OpenAI-compatible generator.
//!
//! One struct for any chat-completions API. Requests carry a bounded
//! timeout and are never retried: the engine's local fallback handles
//! every failure mode identically, so a second attempt only adds
//! latency for the user.

use async_trait::async_trait;
use savi_core::config::SaviConfig;
use savi_core::error::{Result, SaviError};
use savi_core::traits::Generator;
use serde_json::{Value, json};

/// A generator for any OpenAI-compatible API.
pub struct OpenAiCompatibleGenerator {
    /// Provider name (e.g. "openai", "groq").
    name: String,
    /// API key for bearer auth.
    api_key: String,
    /// Base URL for the API (e.g. "https://api.openai.com/v1").
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    /// HTTP client with the request timeout baked in.
    client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    /// Build from the `[llm]` config section.
    ///
    /// API key resolution: config value > SAVI_API_KEY > OPENAI_API_KEY.
    pub fn from_config(config: &SaviConfig) -> Result<Self> {
        let llm = &config.llm;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(llm.timeout_secs))
            .build()
            .map_err(|e| SaviError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: llm.provider.clone(),
            api_key: llm.resolve_api_key(),
            base_url: llm.endpoint.trim_end_matches('/').to_string(),
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
            client,
        })
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

#[async_trait]
impl Generator for OpenAiCompatibleGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        let req = self.apply_auth(req);

        tracing::debug!("{} provider: POST {} (model {})", self.name, url, self.model);
        let resp = req.send().await.map_err(|e| {
            tracing::warn!("{} provider: connection failed ({url}): {e}", self.name);
            SaviError::Http(format!("{} connection failed ({}): {}", self.name, url, e))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!("{} provider: API error {status}: {text}", self.name);
            return Err(SaviError::Generator(format!(
                "{} API error {}: {}",
                self.name, status, text
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| SaviError::Http(e.to_string()))?;

        json["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SaviError::Generator(format!("{}: no content in response", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savi_core::config::SaviConfig;

    #[test]
    fn test_from_config_strips_trailing_slash() {
        let mut config = SaviConfig::default();
        config.llm.endpoint = "https://api.groq.com/openai/v1/".into();
        config.llm.provider = "groq".into();
        let generator = OpenAiCompatibleGenerator::from_config(&config).unwrap();
        assert_eq!(generator.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(generator.name(), "groq");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let mut config = SaviConfig::default();
        // Reserved TEST-NET address; connection fails fast.
        config.llm.endpoint = "http://192.0.2.1:1/v1".into();
        config.llm.timeout_secs = 1;
        let generator = OpenAiCompatibleGenerator::from_config(&config).unwrap();
        let result = generator.generate("system", "hello").await;
        assert!(result.is_err());
    }
}
