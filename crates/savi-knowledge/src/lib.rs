//! # Savi Knowledge
//!
//! The fixed, in-memory knowledge layer of the chatbot engine:
//!
//! - [`Catalog`] — the authoritative, ordered list of real product
//!   names; the single source of truth for "do we sell X" and
//!   "list everything" answers.
//! - [`KnowledgeBase`] — the read-only document set the relevance
//!   scorer searches.
//!
//! Both are plain owned values, constructor-injected into the engine.
//! There is no global state: a product-catalog change means building
//! a new `Catalog`/`KnowledgeBase` pair and a new engine around them.

pub mod catalog;
pub mod store;

pub use catalog::Catalog;
pub use store::KnowledgeBase;
