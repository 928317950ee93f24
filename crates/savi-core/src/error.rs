//! Savi error types.

use thiserror::Error;

/// Errors surfaced by Savi components.
///
/// Note: `Engine::process_query` itself never returns these — every
/// generator failure is recovered by the rule-based fallback. The
/// variants exist for the provider layer, config loading, and startup.
#[derive(Error, Debug)]
pub enum SaviError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Unknown generator provider: {0}")]
    GeneratorNotFound(String),

    #[error("API key missing for provider '{0}'")]
    ApiKeyMissing(String),

    #[error("Knowledge store error: {0}")]
    Knowledge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SaviError>;
