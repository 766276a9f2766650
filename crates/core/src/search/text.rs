//! Searchable text extraction and token matching against it.

use crate::types::CatalogItem;

use super::fuzzy::is_fuzzy_match;

/// Words this short only ever match by substring containment.
const MIN_FUZZY_WORD_LEN: usize = 3;

/// Build the lower-cased text a product is searched against.
///
/// Fields are space-joined in a fixed order: name, brand, description,
/// ribbon, image alt texts (main media first), each info section's title and
/// description, then each custom text field's title and value. Absent fields
/// contribute an empty string.
#[must_use]
pub fn searchable_text(item: &CatalogItem) -> String {
    let alt_texts = item.alt_texts().collect::<Vec<_>>().join(" ");

    let info_sections = item
        .additional_info_sections
        .iter()
        .map(|section| {
            format!(
                "{} {}",
                section.title.as_deref().unwrap_or_default(),
                section.description.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let custom_fields = item
        .custom_text_fields
        .iter()
        .map(|field| {
            format!(
                "{} {}",
                field.title.as_deref().unwrap_or_default(),
                field.value.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    [
        item.name.as_str(),
        item.brand.as_deref().unwrap_or_default(),
        item.description.as_deref().unwrap_or_default(),
        item.ribbon.as_deref().unwrap_or_default(),
        alt_texts.as_str(),
        info_sections.as_str(),
        custom_fields.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Whether a lower-cased token matches somewhere in lower-cased text.
///
/// A literal substring always matches. Otherwise, when the token is longer
/// than two characters, any text word longer than two characters that is a
/// fuzzy match counts.
#[must_use]
pub fn token_matches_text(token: &str, text: &str) -> bool {
    if text.contains(token) {
        return true;
    }
    if token.chars().count() < MIN_FUZZY_WORD_LEN {
        return false;
    }
    text.split_whitespace()
        .filter(|word| word.chars().count() >= MIN_FUZZY_WORD_LEN)
        .any(|word| is_fuzzy_match(word, token))
}

/// Whether a token hits a category field: substring, or any word of the
/// field is a fuzzy match regardless of length.
pub(crate) fn token_matches_field(token: &str, field: &str) -> bool {
    let field = field.to_lowercase();
    field.contains(token) || field.split_whitespace().any(|word| is_fuzzy_match(word, token))
}
