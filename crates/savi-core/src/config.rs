//! Savi configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaviConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Default for SaviConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            gateway: GatewayConfig::default(),
            scoring: ScoringConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl SaviConfig {
    /// Load config from the default path (~/.savi/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::SaviError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::SaviError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SaviError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".savi")
            .join("config.toml")
    }
}

/// Text-generation (LLM) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String { "openai".into() }
fn default_endpoint() -> String { "https://api.openai.com/v1".into() }
fn default_model() -> String { "gpt-4o-mini".into() }
fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 300 }
fn default_timeout_secs() -> u64 { 8 }

impl LlmConfig {
    /// Resolve the API key: config value > SAVI_API_KEY > OPENAI_API_KEY.
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        ["SAVI_API_KEY", "OPENAI_API_KEY"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .unwrap_or_default()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Gateway (HTTP host) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Relevance-scoring configuration.
///
/// These values tune ranking behavior and are deliberately explicit —
/// changing any of them changes which answers users see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score added per query term matching the document content.
    #[serde(default = "default_content_match_weight")]
    pub content_match_weight: f32,
    /// Additional score when the term also matches a document keyword.
    #[serde(default = "default_keyword_match_weight")]
    pub keyword_match_weight: f32,
    /// Minimum similarity to keep a result.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Scores closer than this are tie-broken by document confidence.
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f32,
    /// Flat boost for a named product on "do you have/sell" queries.
    #[serde(default = "default_existence_boost")]
    pub existence_boost: f32,
    /// Multiplier applied to the catalog-overview document when the
    /// query names a specific food item.
    #[serde(default = "default_overview_penalty")]
    pub overview_penalty: f32,
    /// High tier: similarity above this and at least `high_min_matches`.
    #[serde(default = "default_high_similarity")]
    pub high_similarity: f32,
    #[serde(default = "default_high_min_matches")]
    pub high_min_matches: usize,
    /// Medium tier: similarity above this and at least `medium_min_matches`.
    #[serde(default = "default_medium_similarity")]
    pub medium_similarity: f32,
    #[serde(default = "default_medium_min_matches")]
    pub medium_min_matches: usize,
    /// Number of results returned by a search.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_content_match_weight() -> f32 { 1.0 }
fn default_keyword_match_weight() -> f32 { 2.0 }
fn default_similarity_threshold() -> f32 { 0.1 }
fn default_tie_epsilon() -> f32 { 0.1 }
fn default_existence_boost() -> f32 { 2.0 }
fn default_overview_penalty() -> f32 { 0.3 }
fn default_high_similarity() -> f32 { 0.6 }
fn default_high_min_matches() -> usize { 2 }
fn default_medium_similarity() -> f32 { 0.3 }
fn default_medium_min_matches() -> usize { 1 }
fn default_top_k() -> usize { 5 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            content_match_weight: default_content_match_weight(),
            keyword_match_weight: default_keyword_match_weight(),
            similarity_threshold: default_similarity_threshold(),
            tie_epsilon: default_tie_epsilon(),
            existence_boost: default_existence_boost(),
            overview_penalty: default_overview_penalty(),
            high_similarity: default_high_similarity(),
            high_min_matches: default_high_min_matches(),
            medium_similarity: default_medium_similarity(),
            medium_min_matches: default_medium_min_matches(),
            top_k: default_top_k(),
        }
    }
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_name() -> String { "Savi".into() }
fn default_store_name() -> String { "Savi's Crochet & Kitchen".into() }

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            store_name: default_store_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaviConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!((config.llm.temperature - 0.7).abs() < 0.01);
        assert_eq!(config.identity.name, "Savi");
        assert_eq!(config.gateway.port, 3000);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [llm]
            provider = "groq"
            model = "llama-3.1-8b-instant"
            timeout_secs = 5

            [scoring]
            similarity_threshold = 0.2

            [identity]
            name = "TestBot"
        "#;

        let config: SaviConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.llm.timeout_secs, 5);
        assert!((config.scoring.similarity_threshold - 0.2).abs() < f32::EPSILON);
        // Untouched sections keep their defaults
        assert!((config.scoring.existence_boost - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.identity.name, "TestBot");
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let toml_str = "";
        let config: SaviConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.max_tokens, 300);
        assert!((config.scoring.similarity_threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.scoring.top_k, 5);
    }

    #[test]
    fn test_default_path_under_savi_home() {
        let path = SaviConfig::default_path();
        assert!(path.to_string_lossy().contains(".savi"));
    }
}
