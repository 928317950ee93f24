//! # Savi Core
//!
//! Shared foundation for the Savi chatbot engine: configuration,
//! error type, data model, and the `Generator` trait that abstracts
//! the external text-generation API.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::SaviConfig;
pub use error::{Result, SaviError};
