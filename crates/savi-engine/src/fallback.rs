//! Local rule-based responder.
//!
//! Used when the text-generation API is unavailable and for
//! low-confidence queries where calling it is not worth the latency.
//! Pure functions over the catalog — no I/O, cannot fail.

use savi_core::config::IdentityConfig;
use savi_knowledge::Catalog;

/// Common misspellings mapped to their canonical catalog spelling.
const SPELLING_ALIASES: &[(&str, &str)] = &[
    ("gijuya", "gujiya"),
    ("gujia", "gujiya"),
    ("gujhiya", "gujiya"),
    ("nimki", "namak pare"),
    ("namakpare", "namak pare"),
    ("matri", "mathri"),
    ("shakarpare", "shakarpara"),
    ("laddu", "ladoo"),
];

const EXISTENCE_PHRASES: &[&str] = &["do you have", "do you sell", "is there"];

const GREETING_TOKENS: &[&str] = &["hello", "hi", "hey", "namaste", "greetings"];

const HUNGER_TOKENS: &[&str] = &["hungry", "hunger", "starving", "craving"];

const IDENTITY_PHRASES: &[&str] = &["your name", "who are you", "what are you"];

fn tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Rewrite known misspellings to their canonical form.
fn normalize(query: &str) -> String {
    let mut normalized = query.to_lowercase();
    for (wrong, right) in SPELLING_ALIASES {
        if normalized.contains(wrong) {
            normalized = normalized.replace(wrong, right);
        }
    }
    normalized
}

/// Find the catalog entry a query refers to, if any.
///
/// Fuzzy in two stages: the full lowercase product name as a
/// substring of the (alias-normalized) query, then any distinctive
/// name token (length > 3) appearing as a query token.
pub fn check_product_availability<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a str> {
    let normalized = normalize(query);
    let query_tokens = tokens(&normalized);

    for name in catalog.names() {
        if normalized.contains(&name.to_lowercase()) {
            return Some(name);
        }
    }

    for name in catalog.names() {
        let distinctive = name
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.len() > 3)
            .any(|t| query_tokens.iter().any(|q| q == t));
        if distinctive {
            return Some(name);
        }
    }

    None
}

/// Answer a "do you have/sell X" question from the catalog.
fn existence_answer(query: &str, catalog: &Catalog) -> String {
    match check_product_availability(query, catalog) {
        Some(name) => format!(
            "Yes! We make {name} — it's one of our favorites. Would you like \
             to place an order or hear more about it?"
        ),
        None => {
            let alternatives: Vec<&str> =
                catalog.names().iter().take(3).map(String::as_str).collect();
            if alternatives.is_empty() {
                "Sorry, we don't have that at the moment.".to_string()
            } else {
                format!(
                    "Sorry, we don't have that at the moment. But you might \
                     like our {} — or browse the full range on our products \
                     page!",
                    alternatives.join(", ")
                )
            }
        }
    }
}

/// Answer "what tops/food/crochet do you have" by filtering the catalog.
fn category_answer(query_tokens: &[String], catalog: &Catalog) -> Option<String> {
    let has = |terms: &[&str]| query_tokens.iter().any(|t| terms.contains(&t.as_str()));

    if has(&["top", "tops"]) {
        let items = catalog.filter_by_fragments(&["top", "vest", "tank"]);
        return Some(format!("Here are the tops we make: {}.", items.join(", ")));
    }

    if has(&["food", "snack", "snacks", "sweet", "sweets", "treats", "mithai", "namkeen"]) {
        let items: Vec<&str> = catalog
            .names()
            .iter()
            .filter(|n| Catalog::is_food(n))
            .map(String::as_str)
            .collect();
        return Some(format!(
            "Our homemade treats: {}. Everything is prepared fresh to order!",
            items.join(", ")
        ));
    }

    if has(&["crochet", "woolen", "knitted"]) {
        let items: Vec<&str> = catalog
            .names()
            .iter()
            .filter(|n| !Catalog::is_food(n))
            .map(String::as_str)
            .collect();
        return Some(format!(
            "Our handmade crochet pieces: {}. All made to order, any color you like!",
            items.join(", ")
        ));
    }

    None
}

/// The full catalog listing, used as the default answer.
pub fn catalog_answer(catalog: &Catalog, identity: &IdentityConfig) -> String {
    format!(
        "Here's everything we offer at {}: {}. Ask me about any of them, or \
         tell me a bit more about what you're looking for!",
        identity.store_name,
        catalog.listing()
    )
}

fn greeting_answer(identity: &IdentityConfig) -> String {
    format!(
        "Hi there! I'm {}, your shopping buddy at {}. I can help you with:\n\
         • Browsing our crochet and food products\n\
         • Shipping and delivery details\n\
         • Payment options\n\
         • Custom orders\n\
         What would you like to know?",
        identity.name, identity.store_name
    )
}

fn identity_answer(identity: &IdentityConfig) -> String {
    format!(
        "I'm {}, the support assistant for {}! Ask me anything about our \
         products, shipping, payments, or custom orders.",
        identity.name, identity.store_name
    )
}

fn hunger_answer(catalog: &Catalog) -> String {
    let treats: Vec<&str> = catalog
        .names()
        .iter()
        .filter(|n| Catalog::is_food(n))
        .take(3)
        .map(String::as_str)
        .collect();
    format!(
        "Feeling snacky? You're in the right place — our {} ship fresh. \
         Which one sounds good?",
        treats.join(", ")
    )
}

/// Compose a rule-based response for a query.
///
/// `context` is the retrieved document text when the generator failed
/// mid-pipeline; `None` when no relevant knowledge was found at all.
pub fn respond(
    query: &str,
    context: Option<&str>,
    catalog: &Catalog,
    identity: &IdentityConfig,
) -> String {
    let lower = query.to_lowercase();
    let query_tokens = tokens(query);
    let has_token =
        |terms: &[&str]| query_tokens.iter().any(|t| terms.contains(&t.as_str()));

    if has_token(GREETING_TOKENS) {
        return greeting_answer(identity);
    }
    if IDENTITY_PHRASES.iter().any(|p| lower.contains(p)) {
        return identity_answer(identity);
    }
    if has_token(HUNGER_TOKENS) {
        return hunger_answer(catalog);
    }

    if EXISTENCE_PHRASES.iter().any(|p| lower.contains(p)) {
        if check_product_availability(query, catalog).is_some() {
            return existence_answer(query, catalog);
        }
        // "do you have tops?" is a category question in disguise
        if let Some(answer) = category_answer(&query_tokens, catalog) {
            return answer;
        }
        return existence_answer(query, catalog);
    }

    if let Some(answer) = category_answer(&query_tokens, catalog) {
        return answer;
    }

    if has_token(&["sell", "everything", "products", "catalog", "range"]) {
        return catalog_answer(catalog, identity);
    }

    if let Some(ctx) = context {
        return format!("Here's what I can tell you: {ctx}");
    }

    catalog_answer(catalog, identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> IdentityConfig {
        IdentityConfig::default()
    }

    #[test]
    fn test_availability_roundtrip() {
        let catalog = Catalog::builtin();
        // Every catalog name fed back in finds itself
        for name in catalog.names() {
            assert_eq!(check_product_availability(name, &catalog), Some(name.as_str()));
        }
    }

    #[test]
    fn test_availability_misspellings() {
        let catalog = Catalog::builtin();
        assert_eq!(
            check_product_availability("do you sell gijuya", &catalog),
            Some("Gujiya")
        );
        assert_eq!(
            check_product_availability("I want some nimki", &catalog),
            Some("Namak Pare")
        );
    }

    #[test]
    fn test_existence_affirmative_names_product() {
        let catalog = Catalog::builtin();
        let answer = respond("do you sell gujiya", None, &catalog, &identity());
        assert!(answer.starts_with("Yes"));
        assert!(answer.contains("Gujiya"));
    }

    #[test]
    fn test_existence_negative_offers_alternatives() {
        let catalog = Catalog::builtin();
        let answer = respond("do you sell samosas", None, &catalog, &identity());
        assert!(answer.contains("don't have"));
        // At least 3 alternatives named
        let named = catalog
            .names()
            .iter()
            .filter(|n| answer.contains(n.as_str()))
            .count();
        assert!(named >= 3);
    }

    #[test]
    fn test_tops_category_filter() {
        let catalog = Catalog::builtin();
        let answer = respond("what tops do you have", None, &catalog, &identity());
        assert!(answer.contains("Crochet Crop Top"));
        assert!(answer.contains("Granny Square Vest"));
        assert!(answer.contains("Summer Tank Top"));
        assert!(!answer.contains("Gujiya"));
    }

    #[test]
    fn test_food_category_filter() {
        let catalog = Catalog::builtin();
        let answer = respond("what food do you have", None, &catalog, &identity());
        assert!(answer.contains("Gujiya"));
        assert!(answer.contains("Besan Ladoo"));
        assert!(!answer.contains("Tote Bag"));
    }

    #[test]
    fn test_greeting_names_assistant_with_capabilities() {
        let catalog = Catalog::builtin();
        let answer = respond("hello", None, &catalog, &identity());
        assert!(answer.contains("Savi"));
        assert_eq!(answer.matches('•').count(), 4);
    }

    #[test]
    fn test_hunger_offers_treats() {
        let catalog = Catalog::builtin();
        let answer = respond("I'm so hungry right now", None, &catalog, &identity());
        assert!(answer.contains("Gujiya"));
    }

    #[test]
    fn test_unrecognized_query_dumps_catalog() {
        let catalog = Catalog::builtin();
        let answer = respond("asdkjqwe", None, &catalog, &identity());
        for name in catalog.names() {
            assert!(answer.contains(name.as_str()));
        }
    }

    #[test]
    fn test_context_echoed_when_present() {
        let catalog = Catalog::builtin();
        let answer = respond(
            "how long does making take",
            Some("Crochet orders ship within 5-7 days."),
            &catalog,
            &identity(),
        );
        assert!(answer.contains("5-7 days"));
    }
}
