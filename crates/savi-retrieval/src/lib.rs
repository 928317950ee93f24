//! # Savi Retrieval
//!
//! Heuristic keyword relevance scoring — no embeddings, no index.
//! The store is a dozen-odd documents, so a full scan per query is
//! cheaper than maintaining anything smarter.

pub mod scorer;

pub use scorer::{Score, Scorer};
