//! # Savi Engine
//!
//! The response composer — turns a raw user query into a
//! [`QueryResult`](savi_core::types::QueryResult), deciding between
//! live text generation, templated answers, and catalog dumps.
//!
//! Per-query flow:
//!
//! ```text
//! query
//!   ↓ off-topic check          → deflection template (low)
//!   ↓ relevance search         → no match: rule-based responder (low)
//!   ↓ confidence tier
//!       high   → generate with top-3 context, report sources
//!       medium → generate with top-1 context
//!       low    → rule-based responder, no generation
//!   ↓ generator failed? → rule-based responder over the same context
//! ```
//!
//! `process_query` never returns an error: every failure mode resolves
//! to an on-brand textual fallback, because a storefront chat widget
//! has nothing useful to do with a stack trace.

pub mod fallback;
pub mod offtopic;

use savi_core::config::{IdentityConfig, SaviConfig, ScoringConfig};
use savi_core::traits::Generator;
use savi_core::types::{Confidence, QueryResult, ScoredDocument, Source, Suggestion};
use savi_knowledge::{Catalog, KnowledgeBase};
use savi_retrieval::Scorer;

use offtopic::{RandomSelector, TemplateSelector};

/// How many top documents feed the generator on a high-confidence hit.
const HIGH_CONTEXT_DOCS: usize = 3;
/// How many sources are reported back to the caller.
const MAX_SOURCES: usize = 2;

/// The Savi response composer.
///
/// Stateless per call apart from the injected read-only knowledge and
/// catalog — share one instance across all concurrent queries.
pub struct Engine {
    knowledge: KnowledgeBase,
    catalog: Catalog,
    scorer: Scorer,
    generator: Box<dyn Generator>,
    selector: Box<dyn TemplateSelector>,
    identity: IdentityConfig,
}

impl Engine {
    /// Create an engine from configuration and injected collaborators.
    pub fn new(
        config: &SaviConfig,
        knowledge: KnowledgeBase,
        catalog: Catalog,
        generator: Box<dyn Generator>,
    ) -> Self {
        Self {
            knowledge,
            catalog,
            scorer: Scorer::new(config.scoring.clone()),
            generator,
            selector: Box::new(RandomSelector),
            identity: config.identity.clone(),
        }
    }

    /// Replace the deflection template selector (tests inject a fixed one).
    pub fn set_selector(&mut self, selector: Box<dyn TemplateSelector>) {
        self.selector = selector;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Answer a free-text query. Never fails — generator errors and
    /// empty searches all resolve to a local textual response.
    pub async fn process_query(&self, message: &str) -> QueryResult {
        if offtopic::is_off_topic(message) {
            tracing::debug!("off-topic query: '{message}'");
            return self.off_topic_response();
        }

        let results = self.scorer.search(message, &self.knowledge);
        let Some(top) = results.first() else {
            tracing::debug!("no knowledge match for '{message}'");
            return self.rule_based_response(message, None);
        };

        match self.tier(top) {
            Confidence::High => {
                let context: Vec<&str> = results
                    .iter()
                    .take(HIGH_CONTEXT_DOCS)
                    .map(|r| r.doc.content.as_str())
                    .collect();
                let context = context.join("\n\n");
                let sources = results
                    .iter()
                    .take(MAX_SOURCES)
                    .map(|r| Source {
                        title: r.doc.metadata.title.clone(),
                        confidence: round3(r.similarity),
                    })
                    .collect();
                let suggestions = self.high_suggestions(top);
                let response = self.generate_or_fallback(message, &context).await;
                QueryResult {
                    response,
                    suggestions,
                    confidence: Confidence::High,
                    sources,
                }
            }
            Confidence::Medium => {
                let context = top.doc.content.clone();
                let mut suggestions = Vec::new();
                if let Some(page) = &top.doc.metadata.page {
                    suggestions.push(Suggestion::new(top.doc.metadata.title.clone(), page));
                }
                suggestions.push(Suggestion::new("Contact Support", "/contact"));
                let response = self.generate_or_fallback(message, &context).await;
                QueryResult {
                    response,
                    suggestions,
                    confidence: Confidence::Medium,
                    sources: vec![],
                }
            }
            Confidence::Low => self.rule_based_response(message, None),
        }
    }

    /// Call the generator; on any failure, degrade to the rule-based
    /// responder over the same retrieved context. No retry — a second
    /// attempt only delays the user.
    async fn generate_or_fallback(&self, message: &str, context: &str) -> String {
        match self
            .generator
            .generate(&self.system_prompt(context), message)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("generator '{}' unavailable: {e}", self.generator.name());
                fallback::respond(message, Some(context), &self.catalog, &self.identity)
            }
        }
    }

    fn tier(&self, top: &ScoredDocument<'_>) -> Confidence {
        let cfg = self.scoring();
        if top.similarity > cfg.high_similarity && top.matches >= cfg.high_min_matches {
            Confidence::High
        } else if top.similarity > cfg.medium_similarity && top.matches >= cfg.medium_min_matches {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    fn scoring(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    fn system_prompt(&self, context: &str) -> String {
        format!(
            "You are {name}, the friendly support assistant for {store}, a small \
             storefront for handmade crochet wear and homemade Indian snacks.\n\
             Rules:\n\
             - Answer ONLY from the catalog and context below. Never invent \
             products, prices, or policies.\n\
             - Our full catalog: {catalog}.\n\
             - Do not use markdown emphasis (no asterisks or underscores).\n\
             - Keep a warm tone and keep answers short.\n\n\
             Context:\n{context}",
            name = self.identity.name,
            store = self.identity.store_name,
            catalog = self.catalog.listing(),
        )
    }

    fn high_suggestions(&self, top: &ScoredDocument<'_>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        if let Some(page) = &top.doc.metadata.page {
            suggestions.push(Suggestion::new(top.doc.metadata.title.clone(), page));
        }
        suggestions.push(category_suggestion(top.doc.category));
        suggestions.dedup();
        suggestions
    }

    fn off_topic_response(&self) -> QueryResult {
        let templates = offtopic::deflection_templates(&self.identity.store_name, &self.catalog);
        let index = self.selector.pick(templates.len());
        QueryResult {
            response: templates[index].clone(),
            suggestions: generic_suggestions(),
            confidence: Confidence::Low,
            sources: vec![],
        }
    }

    /// Low-confidence path: no generation, answer from rules alone.
    fn rule_based_response(&self, message: &str, context: Option<&str>) -> QueryResult {
        QueryResult {
            response: fallback::respond(message, context, &self.catalog, &self.identity),
            suggestions: generic_suggestions(),
            confidence: Confidence::Low,
            sources: vec![],
        }
    }
}

fn category_suggestion(category: savi_core::types::Category) -> Suggestion {
    use savi_core::types::Category;
    match category {
        Category::About => Suggestion::new("Our story", "/about"),
        Category::Products => Suggestion::new("Browse all products", "/products"),
        Category::Shipping => Suggestion::new("Shipping info", "/shipping"),
        Category::Payment => Suggestion::new("Payment options", "/payment"),
        Category::Customization => Suggestion::new("Custom orders", "/customize"),
        Category::Policy => Suggestion::new("Returns policy", "/policy"),
        Category::Quality => Suggestion::new("Why choose us", "/about"),
    }
}

fn generic_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Browse products", "/products"),
        Suggestion::new("Contact Us", "/contact"),
    ]
}

fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use offtopic::FixedSelector;
    use savi_core::error::{Result, SaviError};

    /// Generator that always fails — forces the rule-based fallback.
    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(SaviError::Generator("connection refused".into()))
        }
    }

    /// Generator that returns a fixed reply.
    struct CannedGenerator(&'static str);

    #[async_trait]
    impl Generator for CannedGenerator {
        fn name(&self) -> &str {
            "canned"
        }
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn engine(generator: Box<dyn Generator>) -> Engine {
        let config = SaviConfig::default();
        let catalog = Catalog::builtin();
        let knowledge = KnowledgeBase::builtin(&catalog);
        let mut engine = Engine::new(&config, knowledge, catalog, generator);
        engine.set_selector(Box::new(FixedSelector(0)));
        engine
    }

    #[tokio::test]
    async fn test_existence_query_fallback_affirms_product() {
        let engine = engine(Box::new(FailingGenerator));
        let result = engine.process_query("do you have gujiya").await;
        assert!(result.response.starts_with("Yes"));
        assert!(result.response.contains("Gujiya"));
    }

    #[tokio::test]
    async fn test_off_topic_deflects_with_low_confidence() {
        let engine = engine(Box::new(CannedGenerator("should not be called")));
        let result = engine.process_query("what's the weather today").await;
        let templates =
            offtopic::deflection_templates(&engine.identity.store_name, &engine.catalog);
        assert_eq!(result.response, templates[0]);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.text == "Contact Us" && s.link == "/contact"));
    }

    #[tokio::test]
    async fn test_tops_category_fallback() {
        let engine = engine(Box::new(FailingGenerator));
        let result = engine.process_query("what tops do you have").await;
        assert!(result.response.contains("Crochet Crop Top"));
        assert!(result.response.contains("Granny Square Vest"));
        assert!(result.response.contains("Summer Tank Top"));
        assert!(!result.response.contains("Gujiya"));
    }

    #[tokio::test]
    async fn test_greeting_branch() {
        let engine = engine(Box::new(FailingGenerator));
        let result = engine.process_query("hello").await;
        assert!(result.response.contains("Savi"));
        assert_eq!(result.response.matches('•').count(), 4);
    }

    #[tokio::test]
    async fn test_gibberish_dumps_catalog_low_confidence() {
        let engine = engine(Box::new(CannedGenerator("should not be called")));
        let result = engine.process_query("asdkjqwe").await;
        assert_eq!(result.confidence, Confidence::Low);
        for name in engine.catalog.names() {
            assert!(result.response.contains(name.as_str()));
        }
    }

    #[tokio::test]
    async fn test_high_confidence_uses_generator_and_reports_sources() {
        let engine = engine(Box::new(CannedGenerator("Gujiya ships in boxes of 6 or 12.")));
        let result = engine.process_query("gujiya sweet festive box").await;
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.response, "Gujiya ships in boxes of 6 or 12.");
        assert!(!result.sources.is_empty());
        assert!(result.sources.len() <= 2);
        assert_eq!(result.sources[0].title, "Gujiya");
        // Rounded to 3 decimals
        let c = result.sources[0].confidence;
        assert!((c * 1000.0 - (c * 1000.0).round()).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_medium_confidence_suggests_contact_support() {
        let engine = engine(Box::new(CannedGenerator("We ship across India.")));
        let result = engine.process_query("shipping time").await;
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.sources.is_empty());
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.text == "Contact Support"));
    }

    #[tokio::test]
    async fn test_generator_failure_never_surfaces() {
        let engine = engine(Box::new(FailingGenerator));
        // Medium-tier query with a failing generator: the context is echoed
        let result = engine.process_query("shipping time").await;
        assert!(!result.response.is_empty());
        assert!(result.response.contains("courier") || result.response.contains("ship"));
    }
}
