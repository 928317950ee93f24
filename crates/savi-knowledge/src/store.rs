//! The fixed document store the relevance scorer searches.

use savi_core::error::{Result, SaviError};
use savi_core::types::{Category, DocMetadata, Document};

use crate::catalog::Catalog;

/// Read-only collection of knowledge documents.
///
/// Populated once at construction; never mutated afterwards, so it can
/// be shared freely across concurrent queries without locking.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
}

impl KnowledgeBase {
    /// Build a store from an arbitrary document set.
    ///
    /// Fails on duplicate document ids — a corrupted store should
    /// abort startup, not limp along.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for doc in &documents {
            if !seen.insert(doc.id.as_str()) {
                return Err(SaviError::Knowledge(format!(
                    "duplicate document id: {}",
                    doc.id
                )));
            }
        }
        Ok(Self { documents })
    }

    /// The built-in storefront knowledge set. Every product document's
    /// content names its catalog entry, and the overview document
    /// lists the whole catalog.
    pub fn builtin(catalog: &Catalog) -> Self {
        let mut documents = vec![
            doc(
                "about",
                Category::About,
                "company",
                "About the store",
                Some("/about"),
                0.9,
                "We are a small home studio selling handmade crochet wear and \
                 homemade Indian snacks and sweets. Every piece is made to order \
                 by hand with love, and every batch of food is prepared fresh in \
                 small quantities.",
                &["about", "story", "handmade", "homemade", "studio", "who"],
            ),
            doc(
                "products-overview",
                Category::Products,
                "catalog-overview",
                "Product catalog",
                Some("/products"),
                0.8,
                &format!(
                    "Our full range of products: {}. Crochet items are made to \
                     order; snacks and sweets ship in fresh batches.",
                    catalog.listing()
                ),
                &["products", "sell", "catalog", "shop", "buy", "range", "everything"],
            ),
            doc(
                "shipping",
                Category::Shipping,
                "policy",
                "Shipping & delivery",
                Some("/shipping"),
                0.9,
                "We ship across India via tracked courier. Crochet orders ship \
                 within 5-7 days of completion; food orders ship within 2 days of \
                 preparation so they arrive fresh. You receive a tracking link by \
                 email once your parcel is dispatched.",
                &["shipping", "delivery", "courier", "dispatch", "track", "days"],
            ),
            doc(
                "payment",
                Category::Payment,
                "policy",
                "Payment options",
                Some("/payment"),
                0.9,
                "We accept UPI, debit and credit cards, and net banking. Cash on \
                 delivery is available for orders under 2000 rupees. Payment is \
                 collected at checkout; custom orders take a 50 percent advance.",
                &["payment", "upi", "card", "cod", "cash", "checkout", "pay"],
            ),
            doc(
                "customization",
                Category::Customization,
                "policy",
                "Custom orders",
                Some("/customize"),
                0.85,
                "Crochet pieces can be customized in color, size, and yarn. Share \
                 your measurements and preferred shades when ordering and we will \
                 confirm a design before starting. Custom work adds about a week \
                 to the usual timeline.",
                &["custom", "customize", "color", "size", "yarn", "measurements"],
            ),
            doc(
                "returns",
                Category::Policy,
                "policy",
                "Returns & refunds",
                Some("/policy"),
                0.85,
                "Crochet items can be exchanged within 7 days if unused. Food \
                 items cannot be returned for hygiene reasons, but we replace any \
                 order that arrives damaged — just send a photo within 24 hours \
                 of delivery.",
                &["return", "refund", "exchange", "replace", "damaged", "policy"],
            ),
            doc(
                "quality",
                Category::Quality,
                "quality",
                "Quality & ingredients",
                None,
                0.8,
                "All yarn is skin-friendly cotton or acrylic, pre-washed before \
                 crocheting. Snacks and sweets use fresh ghee, unrefined sugar, \
                 and no preservatives, prepared in a clean home kitchen.",
                &["quality", "ingredients", "yarn", "cotton", "fresh", "ghee", "preservatives"],
            ),
        ];

        documents.extend([
            product_doc(
                "crop-top",
                "Crochet Crop Top",
                "a handmade cotton crop top with an adjustable back tie, \
                 available in sizes XS to XL and any color of yarn you like",
                "/products/crochet-crop-top",
                &["crop", "top", "cotton", "summer", "wear"],
            ),
            product_doc(
                "granny-vest",
                "Granny Square Vest",
                "a retro vest stitched from granny squares, sized S to XL, \
                 with multicolor or single-shade options",
                "/products/granny-square-vest",
                &["vest", "granny", "square", "retro", "wear"],
            ),
            product_doc(
                "tank-top",
                "Summer Tank Top",
                "a light crochet tank top in breathable cotton yarn, perfect \
                 over a slip or swimwear",
                "/products/summer-tank-top",
                &["tank", "top", "summer", "light", "wear"],
            ),
            product_doc(
                "tote-bag",
                "Crochet Tote Bag",
                "a sturdy everyday tote with a lined interior and reinforced \
                 handles",
                "/products/crochet-tote-bag",
                &["tote", "bag", "lined", "handles"],
            ),
            product_doc(
                "teddy",
                "Amigurumi Teddy Bear",
                "a soft amigurumi teddy bear, child-safe with embroidered \
                 eyes, around 25 cm tall",
                "/products/amigurumi-teddy-bear",
                &["amigurumi", "teddy", "bear", "toy", "gift"],
            ),
            product_doc(
                "baby-blanket",
                "Baby Blanket",
                "a plush baby blanket in soft anti-pilling yarn, 90 by 90 cm, \
                 machine washable",
                "/products/baby-blanket",
                &["blanket", "baby", "soft", "washable"],
            ),
            product_doc(
                "gujiya",
                "Gujiya",
                "a festive fried dumpling stuffed with khoya, coconut, and dry \
                 fruits, sold in boxes of 6 or 12",
                "/products/gujiya",
                &["gujiya", "sweet", "festive", "khoya", "dumpling"],
            ),
            product_doc(
                "namak-pare",
                "Namak Pare",
                "crispy savory diamond-cut crackers, also known as nimki, sold \
                 in 250g and 500g packs",
                "/products/namak-pare",
                &["namak", "pare", "nimki", "savory", "crispy", "snack"],
            ),
            product_doc(
                "mathri",
                "Mathri",
                "flaky spiced crackers made with ajwain and ghee, a classic tea \
                 time snack",
                "/products/mathri",
                &["mathri", "flaky", "ajwain", "snack"],
            ),
            product_doc(
                "shakarpara",
                "Shakarpara",
                "sweet crunchy bites glazed with sugar, sold in 250g and 500g \
                 packs",
                "/products/shakarpara",
                &["shakarpara", "sweet", "crunchy", "snack"],
            ),
            product_doc(
                "besan-ladoo",
                "Besan Ladoo",
                "melt-in-the-mouth gram flour ladoos roasted in ghee, sold in \
                 boxes of 6 or 12",
                "/products/besan-ladoo",
                &["besan", "ladoo", "laddu", "sweet", "ghee"],
            ),
        ]);

        // Ids above are fixed and distinct.
        Self { documents }
    }

    /// Full sequence of documents (read-only view).
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }
}

fn doc(
    id: &str,
    category: Category,
    doc_type: &str,
    title: &str,
    page: Option<&str>,
    confidence: f32,
    content: &str,
    keywords: &[&str],
) -> Document {
    Document {
        id: id.to_string(),
        content: content.to_string(),
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        metadata: DocMetadata {
            doc_type: doc_type.to_string(),
            title: title.to_string(),
            page: page.map(String::from),
            confidence,
        },
    }
}

fn product_doc(id: &str, name: &str, blurb: &str, page: &str, keywords: &[&str]) -> Document {
    doc(
        id,
        Category::Products,
        "product",
        name,
        Some(page),
        0.9,
        &format!("The {name} is {blurb}."),
        keywords,
    )
}
