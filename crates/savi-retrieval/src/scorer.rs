//! Query-to-document similarity scoring and ranked search.

use savi_core::config::ScoringConfig;
use savi_core::types::{Document, ScoredDocument};
use savi_knowledge::catalog::FOOD_ITEMS;
use savi_knowledge::KnowledgeBase;

/// Phrases that mark an existence question ("do we sell X").
const EXISTENCE_PHRASES: &[&str] = &["do you have", "do you sell"];

/// Raw scoring output for one query/document pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub similarity: f32,
    pub matches: usize,
    pub total_words: usize,
}

/// Relevance scorer. Stateless apart from its configuration — safe to
/// share across concurrent queries.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Similarity estimate between a raw query and one document.
    ///
    /// Query terms of length <= 2 are discarded; each remaining term
    /// earns `content_match_weight` for a partial match (substring in
    /// either direction) against any content word, plus
    /// `keyword_match_weight` more for a partial match against any
    /// document keyword. The sum is normalized by `terms * 2`, which
    /// lands in roughly [0,1] before search-time boosts.
    pub fn score_document(&self, query: &str, doc: &Document) -> Score {
        let query_lower = query.to_lowercase();
        let query_terms: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .collect();

        if query_terms.is_empty() {
            return Score {
                similarity: 0.0,
                matches: 0,
                total_words: 0,
            };
        }

        // Content tokens of length <= 2 are dropped as well: with
        // bidirectional substring matching, words like "a" or "of"
        // would make every query match every document.
        let content_lower = doc.content.to_lowercase();
        let content_terms: Vec<&str> = content_lower
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .collect();
        let keywords_lower: Vec<String> =
            doc.keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut score = 0.0;
        let mut matches = 0;

        for term in &query_terms {
            let mut contributed = false;

            if content_terms
                .iter()
                .any(|c| c.contains(term) || term.contains(c))
            {
                score += self.config.content_match_weight;
                contributed = true;
            }

            if keywords_lower
                .iter()
                .any(|k| k.contains(term) || term.contains(k.as_str()))
            {
                score += self.config.keyword_match_weight;
                contributed = true;
            }

            if contributed {
                matches += 1;
            }
        }

        Score {
            similarity: score / (query_terms.len() as f32 * 2.0),
            matches,
            total_words: query_terms.len(),
        }
    }

    /// Rank the whole store against a query and return the shortlist.
    ///
    /// Two domain adjustments on top of the base score:
    /// - existence questions that name a specific product boost that
    ///   product document past the generic catalog overview;
    /// - the catalog-overview document is penalized when the query
    ///   names a specific food item, so the targeted answer wins.
    pub fn search<'a>(&self, query: &str, kb: &'a KnowledgeBase) -> Vec<ScoredDocument<'a>> {
        let query_lower = query.to_lowercase();
        let is_existence_query = EXISTENCE_PHRASES.iter().any(|p| query_lower.contains(p));
        let names_food_item = FOOD_ITEMS.iter().any(|f| query_lower.contains(f));

        let mut results: Vec<ScoredDocument<'a>> = Vec::new();

        for doc in kb.all() {
            let score = self.score_document(query, doc);
            let mut similarity = score.similarity;

            if is_existence_query
                && doc.metadata.doc_type == "product"
                && doc
                    .keywords
                    .iter()
                    .any(|k| k.len() > 3 && query_lower.contains(&k.to_lowercase()))
            {
                similarity += self.config.existence_boost;
            }

            if doc.metadata.doc_type == "catalog-overview" && names_food_item {
                similarity *= self.config.overview_penalty;
            }

            if similarity > self.config.similarity_threshold {
                results.push(ScoredDocument {
                    doc,
                    similarity,
                    matches: score.matches,
                    total_words: score.total_words,
                });
            }
        }

        // Descending similarity first, then a settling pass that hands
        // sub-epsilon near-ties to the higher-confidence document. The
        // near-tie relation is not transitive, so it cannot live inside
        // a sort_by comparator; adjacent swaps keep the order consistent.
        // Each swap removes one confidence inversion, so the loop ends.
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        let eps = self.config.tie_epsilon;
        let mut swapped = true;
        while swapped {
            swapped = false;
            for i in 1..results.len() {
                let gap = results[i - 1].similarity - results[i].similarity;
                if gap < eps
                    && results[i].doc.metadata.confidence
                        > results[i - 1].doc.metadata.confidence
                {
                    results.swap(i - 1, i);
                    swapped = true;
                }
            }
        }
        results.truncate(self.config.top_k);

        if let Some(top) = results.first() {
            tracing::debug!(
                "search '{}': top={} similarity={:.3} matches={}/{}",
                query,
                top.doc.id,
                top.similarity,
                top.matches,
                top.total_words
            );
        } else {
            tracing::debug!("search '{}': no results above threshold", query);
        }

        results
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
