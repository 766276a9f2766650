//! Fuzzy product search.
//!
//! Narrows an already-fetched batch of products down to the ones that
//! plausibly match a free-text query. Matching tolerates typos (edit
//! distance) and can also match products through the collections they
//! belong to.
//!
//! # Matching rules
//!
//! - A blank query is "browsing": every product is returned unchanged.
//! - A product matches through its collections when **any** specific query
//!   word hits a collection's name or description. Generic words such as
//!   "products" or "all" are ignored for this pass.
//! - Otherwise **every** query word must hit the product's own searchable
//!   text (see [`searchable_text`]).
//!
//! Results keep input order; there is no relevance ranking.

mod fuzzy;
mod text;

use std::collections::HashSet;

use crate::types::{CatalogItem, CategoryRecord, CollectionId};

pub use fuzzy::{SIMILARITY_THRESHOLD_PERCENT, edit_distance, is_fuzzy_match, similarity};
pub use text::{searchable_text, token_matches_text};

/// Query words that say nothing about a specific collection.
const GENERIC_WORDS: &[&str] = &["products", "product", "items", "item", "all"];

/// A normalized search query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    words: Vec<String>,
}

impl SearchQuery {
    /// Normalize a raw query: trim, lower-case and split on whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            words: raw
                .split_whitespace()
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// The lower-cased query words.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// True when the query has no words, meaning no filtering applies.
    #[must_use]
    pub const fn is_browse(&self) -> bool {
        self.words.is_empty()
    }

    /// Query words usable against collection names, with generic words removed.
    pub fn specific_words(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|word| !is_generic_word(word))
    }
}

/// Whether a lower-cased word is a generic catalog word like "products".
#[must_use]
pub fn is_generic_word(word: &str) -> bool {
    GENERIC_WORDS.contains(&word)
}

/// Collect the IDs of collections whose name or description matches any
/// specific word of the query.
///
/// The "all products" collection is never included.
#[must_use]
pub fn matching_collection_ids(
    query: &SearchQuery,
    categories: &[CategoryRecord],
) -> HashSet<CollectionId> {
    let words: Vec<&str> = query.specific_words().collect();
    if words.is_empty() {
        return HashSet::new();
    }

    categories
        .iter()
        .filter(|category| !category.is_all_products())
        .filter(|category| {
            let description = category.description.as_deref().unwrap_or_default();
            words.iter().any(|word| {
                text::token_matches_field(word, &category.name)
                    || text::token_matches_field(word, description)
            })
        })
        .map(|category| category.id.clone())
        .collect()
}

/// Whether a product matches every query word in its own searchable text.
#[must_use]
pub fn item_matches_text(item: &CatalogItem, query: &SearchQuery) -> bool {
    let text = searchable_text(item);
    query
        .words()
        .iter()
        .all(|word| token_matches_text(word, &text))
}

/// Filter products by a free-text query.
///
/// `categories`, when given, enables matching products through their
/// collections. Returns references into `items` in their original order; a
/// blank query returns every item.
#[must_use]
pub fn filter_products<'a>(
    items: &'a [CatalogItem],
    query: &str,
    categories: Option<&[CategoryRecord]>,
) -> Vec<&'a CatalogItem> {
    let query = SearchQuery::parse(query);
    if query.is_browse() {
        return items.iter().collect();
    }

    let matching_collections = categories
        .map(|categories| matching_collection_ids(&query, categories))
        .unwrap_or_default();

    items
        .iter()
        .filter(|item| {
            item.collection_ids
                .iter()
                .any(|id| matching_collections.contains(id))
                || item_matches_text(item, &query)
        })
        .collect()
}
