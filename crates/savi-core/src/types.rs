//! Core data model for the Savi chatbot engine.

use serde::{Deserialize, Serialize};

/// Topic tag for a knowledge document. Fixed set — documents never
/// invent categories at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    About,
    Products,
    Shipping,
    Payment,
    Customization,
    Policy,
    Quality,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::About => "about",
            Category::Products => "products",
            Category::Shipping => "shipping",
            Category::Payment => "payment",
            Category::Customization => "customization",
            Category::Policy => "policy",
            Category::Quality => "quality",
        }
    }
}

/// Metadata attached to a knowledge document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMetadata {
    /// Kind of document ("company", "catalog-overview", "product", "policy"...).
    pub doc_type: String,
    /// Human-readable title, reported as a source on high-confidence answers.
    pub title: String,
    /// Navigable storefront link, if one exists for this topic.
    pub page: Option<String>,
    /// Prior weight in [0,1]; used to break near-ties in ranking.
    pub confidence: f32,
}

/// A unit of retrievable knowledge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique across the store.
    pub id: String,
    pub content: String,
    pub category: Category,
    /// Tokens that boost matching; insertion order irrelevant.
    pub keywords: Vec<String>,
    pub metadata: DocMetadata,
}

/// A document paired with its per-query relevance estimate.
///
/// `similarity` may exceed 1.0 after heuristic boosts — only relative
/// order matters, so it is never clamped.
#[derive(Debug, Clone)]
pub struct ScoredDocument<'a> {
    pub doc: &'a Document,
    pub similarity: f32,
    /// Count of query terms that matched this document.
    pub matches: usize,
    /// Count of significant query terms.
    pub total_words: usize,
}

/// Confidence tier driving the response strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A suggested navigation link shown under a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub link: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// A knowledge source reported alongside a high-confidence answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    /// Similarity of the source document, rounded to 3 decimals.
    pub confidence: f32,
}

/// The externally visible result of one query. Ephemeral — created
/// fresh per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub response: String,
    /// Display order.
    pub suggestions: Vec<Suggestion>,
    pub confidence: Confidence,
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Confidence::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_category_roundtrip() {
        let json = serde_json::to_string(&Category::Customization).unwrap();
        assert_eq!(json, "\"customization\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Customization);
    }
}
