//! Off-topic classification and deflection templates.

use rand::Rng;
use savi_knowledge::Catalog;

/// General-knowledge terms the assistant refuses to chat about.
/// Matched token-wise against the query.
const BLOCK_LIST: &[&str] = &[
    "weather",
    "rain",
    "temperature",
    "politics",
    "political",
    "election",
    "president",
    "minister",
    "sports",
    "cricket",
    "football",
    "match",
    "movie",
    "movies",
    "film",
    "celebrity",
    "news",
    "stock",
    "stocks",
    "bitcoin",
    "crypto",
    "programming",
    "homework",
    "math",
];

/// Identity questions are always allowed, even when phrased oddly.
const IDENTITY_PHRASES: &[&str] = &["your name", "who are you", "what are you"];

/// Food and hunger talk stays on-domain — we sell snacks.
const FOOD_TOKENS: &[&str] = &[
    "food", "eat", "hungry", "hunger", "snack", "snacks", "sweet", "sweets", "craving",
];

fn tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// A query is off-topic when it hits the block list and is neither an
/// identity question nor food/hunger related.
pub fn is_off_topic(query: &str) -> bool {
    let lower = query.to_lowercase();
    let toks = tokens(query);

    let blocked = toks.iter().any(|t| BLOCK_LIST.contains(&t.as_str()));
    if !blocked {
        return false;
    }
    if IDENTITY_PHRASES.iter().any(|p| lower.contains(p)) {
        return false;
    }
    if toks.iter().any(|t| FOOD_TOKENS.contains(&t.as_str())) {
        return false;
    }
    true
}

/// Friendly deflections for off-topic queries. Each one names the
/// first few catalog entries so the reply still sells something.
pub fn deflection_templates(store_name: &str, catalog: &Catalog) -> Vec<String> {
    let preview: Vec<&str> = catalog.names().iter().take(3).map(String::as_str).collect();
    let preview = preview.join(", ");
    vec![
        format!(
            "That's a bit outside my lane! I'm here to help with {store_name} — \
             things like our {preview}, shipping, or custom orders. What can I \
             show you?"
        ),
        format!(
            "I wish I could chat about that, but I only know our little shop! \
             Ask me about {preview} and more, or how to place an order."
        ),
        format!(
            "I'd better stick to what I know best: our handmade goodies! We \
             have {preview} and lots more. Want to take a look?"
        ),
    ]
}

/// Strategy for picking a deflection template. Injected so tests can
/// pin the choice.
pub trait TemplateSelector: Send + Sync {
    /// Return an index in `0..count`. `count` is always >= 1.
    fn pick(&self, count: usize) -> usize;
}

/// Production selector — uniform random choice.
pub struct RandomSelector;

impl TemplateSelector for RandomSelector {
    fn pick(&self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }
}

/// Deterministic selector for tests (index clamped to range).
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn pick(&self, count: usize) -> usize {
        self.0.min(count - 1)
    }
}
