//! # Savi Providers
//!
//! Text-generation API clients. Any OpenAI-compatible chat-completions
//! endpoint (OpenAI, Groq, OpenRouter, a local llama.cpp server...) is
//! handled by the single `OpenAiCompatibleGenerator` — providers differ
//! only by endpoint URL, model name, and API key.

pub mod openai_compatible;

use savi_core::config::SaviConfig;
use savi_core::error::Result;
use savi_core::traits::Generator;

pub use openai_compatible::OpenAiCompatibleGenerator;

/// Create a generator from configuration.
pub fn create_generator(config: &SaviConfig) -> Result<Box<dyn Generator>> {
    Ok(Box::new(OpenAiCompatibleGenerator::from_config(config)?))
}
