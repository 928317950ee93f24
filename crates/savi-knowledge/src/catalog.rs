//! The product catalog — a flat, ordered list of canonical names.

/// Food items sold by the store, lowercase. Used for the
/// catalog-overview ranking penalty and the food category filter.
pub const FOOD_ITEMS: &[&str] = &["gujiya", "namak pare", "mathri", "shakarpara", "besan ladoo"];

/// The authoritative, ordered list of product names. Immutable after
/// construction — the engine only ever reads a catalog snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    names: Vec<String>,
}

impl Catalog {
    /// The reference storefront catalog.
    pub fn builtin() -> Self {
        Self::new(vec![
            "Crochet Crop Top".into(),
            "Granny Square Vest".into(),
            "Summer Tank Top".into(),
            "Crochet Tote Bag".into(),
            "Amigurumi Teddy Bear".into(),
            "Baby Blanket".into(),
            "Gujiya".into(),
            "Namak Pare".into(),
            "Mathri".into(),
            "Shakarpara".into(),
            "Besan Ladoo".into(),
        ])
    }

    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// All product names, in display order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is a food item (by the fixed food list).
    pub fn is_food(name: &str) -> bool {
        let lower = name.to_lowercase();
        FOOD_ITEMS.iter().any(|f| lower.contains(f))
    }

    /// Product names matching any of the given lowercase fragments.
    pub fn filter_by_fragments(&self, fragments: &[&str]) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| {
                let lower = n.to_lowercase();
                fragments.iter().any(|f| lower.contains(f))
            })
            .map(String::as_str)
            .collect()
    }

    /// A comma-joined listing of the full catalog.
    pub fn listing(&self) -> String {
        self.names.join(", ")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_three_tops() {
        let catalog = Catalog::builtin();
        let tops = catalog.filter_by_fragments(&["top", "vest", "tank"]);
        assert_eq!(tops.len(), 3);
    }

    #[test]
    fn test_food_detection() {
        assert!(Catalog::is_food("Gujiya"));
        assert!(Catalog::is_food("Namak Pare"));
        assert!(!Catalog::is_food("Crochet Tote Bag"));
    }

    #[test]
    fn test_listing_preserves_order() {
        let catalog = Catalog::builtin();
        let listing = catalog.listing();
        assert!(listing.starts_with("Crochet Crop Top"));
        assert!(listing.ends_with("Besan Ladoo"));
    }
}
