//! Catalog data model.
//!
//! These types mirror the product and collection records returned by the
//! commerce backend. Field names follow the backend's camelCase JSON so a
//! fetched batch deserializes directly. Every optional or repeated field
//! defaults when absent: a sparse record is still a valid catalog item.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CollectionId, ProductId};
use crate::mix::CollectionItems;

/// Identifier of the platform's synthetic "all products" collection.
///
/// Every product belongs to it, so it is never a meaningful category for
/// search and is skipped by category matching.
pub const ALL_PRODUCTS_COLLECTION_ID: &str = "00000000-000000-000000-000000000001";

// =============================================================================
// Product Types
// =============================================================================

/// A sellable product record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
    /// Free-text description (may contain HTML markup).
    #[serde(default)]
    pub description: Option<String>,
    /// Promotional ribbon label (e.g., "New", "Sale").
    #[serde(default)]
    pub ribbon: Option<String>,
    /// Product media.
    #[serde(default)]
    pub media: Option<ProductMedia>,
    /// Additional info sections shown on the product page.
    #[serde(default)]
    pub additional_info_sections: Vec<InfoSection>,
    /// Custom text fields (e.g., engraving prompts).
    #[serde(default)]
    pub custom_text_fields: Vec<CustomTextField>,
    /// Collections this product belongs to.
    #[serde(default)]
    pub collection_ids: Vec<CollectionId>,
}

impl CatalogItem {
    /// Create a product with only an ID and a name.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Image alt texts, main media first, then secondary media in order.
    pub fn alt_texts(&self) -> impl Iterator<Item = &str> {
        self.media
            .iter()
            .flat_map(|media| media.main_media.iter().chain(media.items.iter()))
            .filter_map(|item| item.image.as_ref()?.alt_text.as_deref())
    }

    /// Check whether the product belongs to the given collection.
    #[must_use]
    pub fn in_collection(&self, collection_id: &str) -> bool {
        self.collection_ids.iter().any(|id| id.as_str() == collection_id)
    }
}

/// Media attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMedia {
    /// The featured media entry.
    #[serde(default)]
    pub main_media: Option<MediaItem>,
    /// All other media entries.
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

/// A single media entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaItem {
    /// Image details, absent for video entries.
    #[serde(default)]
    pub image: Option<MediaImage>,
}

/// Image details for a media entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaImage {
    /// Image URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A titled block of extra product information (e.g., "Care", "Sizing").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InfoSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A custom text field attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomTextField {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A merchandising collection products can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Collection ID.
    pub id: CollectionId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryRecord {
    /// Create a collection record.
    #[must_use]
    pub fn new(id: impl Into<CollectionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Whether this is the synthetic "all products" collection.
    #[must_use]
    pub fn is_all_products(&self) -> bool {
        self.id.as_str() == ALL_PRODUCTS_COLLECTION_ID
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Errors that can occur while reading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown collection: {0}")]
    UnknownCollection(CollectionId),
}

/// A problem found while validating a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two products share an ID.
    DuplicateProduct(ProductId),
    /// Two collections share an ID.
    DuplicateCollection(CollectionId),
    /// A product references a collection that is not in the snapshot.
    UnknownCollection {
        product: ProductId,
        collection: CollectionId,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProduct(id) => write!(f, "duplicate product id {id}"),
            Self::DuplicateCollection(id) => write!(f, "duplicate collection id {id}"),
            Self::UnknownCollection {
                product,
                collection,
            } => write!(f, "product {product} references unknown collection {collection}"),
        }
    }
}

/// One fetched batch of products and collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<CatalogItem>,
    #[serde(default)]
    pub collections: Vec<CategoryRecord>,
}

impl CatalogSnapshot {
    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a collection by ID.
    #[must_use]
    pub fn collection(&self, id: &str) -> Option<&CategoryRecord> {
        self.collections.iter().find(|c| c.id.as_str() == id)
    }

    /// Products belonging to a collection, in catalog order.
    ///
    /// The "all products" collection yields every product.
    #[must_use]
    pub fn products_in(&self, collection_id: &str) -> Vec<&CatalogItem> {
        if collection_id == ALL_PRODUCTS_COLLECTION_ID {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.in_collection(collection_id))
            .collect()
    }

    /// Gather mixer input for the given collection IDs, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownCollection` for the first ID that isn't
    /// a collection in the snapshot.
    pub fn mix_sources<'a>(
        &self,
        collection_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<CollectionItems>, CatalogError> {
        collection_ids
            .into_iter()
            .map(|id| {
                let collection = self
                    .collection(id)
                    .ok_or_else(|| CatalogError::UnknownCollection(CollectionId::from(id)))?;
                let items = self.products_in(id).into_iter().cloned().collect();
                Ok(CollectionItems::new(collection.id.clone(), items))
            })
            .collect()
    }

    /// Check the snapshot for duplicate IDs and dangling collection references.
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut collection_ids = HashSet::new();
        for collection in &self.collections {
            if !collection_ids.insert(collection.id.as_str()) {
                issues.push(CatalogIssue::DuplicateCollection(collection.id.clone()));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(product.id.as_str()) {
                issues.push(CatalogIssue::DuplicateProduct(product.id.clone()));
            }
            for collection in &product.collection_ids {
                if collection.as_str() != ALL_PRODUCTS_COLLECTION_ID
                    && !collection_ids.contains(collection.as_str())
                {
                    issues.push(CatalogIssue::UnknownCollection {
                        product: product.id.clone(),
                        collection: collection.clone(),
                    });
                }
            }
        }

        issues
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SNAPSHOT_JSON: &str = r#"{
        "products": [
            {
                "id": "p1",
                "name": "Red Leather Jacket",
                "brand": "Harbor",
                "media": {
                    "mainMedia": { "image": { "url": "https://cdn/p1.jpg", "altText": "front view" } },
                    "items": [
                        { "image": { "altText": "back view" } },
                        {},
                        { "image": { "url": "https://cdn/p1-3.jpg" } }
                    ]
                },
                "additionalInfoSections": [{ "title": "Care", "description": "Wipe clean" }],
                "customTextFields": [{ "title": "Monogram", "value": "" }],
                "collectionIds": ["outerwear", "00000000-000000-000000-000000000001"]
            },
            { "id": "p2" }
        ],
        "collections": [
            { "id": "outerwear", "name": "Outerwear", "description": "Coats and jackets" }
        ]
    }"#;

    #[test]
    fn test_snapshot_parses_camel_case_fields() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        let jacket = &snapshot.products[0];

        assert_eq!(jacket.brand.as_deref(), Some("Harbor"));
        assert_eq!(jacket.additional_info_sections.len(), 1);
        assert_eq!(jacket.custom_text_fields[0].title.as_deref(), Some("Monogram"));
        assert!(jacket.in_collection("outerwear"));
    }

    #[test]
    fn test_sparse_product_defaults() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        let sparse = &snapshot.products[1];

        assert_eq!(sparse.name, "");
        assert!(sparse.media.is_none());
        assert!(sparse.collection_ids.is_empty());
        assert_eq!(sparse.alt_texts().count(), 0);
    }

    #[test]
    fn test_alt_texts_main_media_first() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        let alts: Vec<&str> = snapshot.products[0].alt_texts().collect();
        assert_eq!(alts, vec!["front view", "back view"]);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = CatalogSnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_products_in_collection() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();

        let outerwear = snapshot.products_in("outerwear");
        assert_eq!(outerwear.len(), 1);
        assert_eq!(outerwear[0].id.as_str(), "p1");

        assert_eq!(snapshot.products_in(ALL_PRODUCTS_COLLECTION_ID).len(), 2);
        assert!(snapshot.products_in("missing").is_empty());
    }

    #[test]
    fn test_mix_sources_in_requested_order() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        let sources = snapshot.mix_sources(["outerwear"]).unwrap();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].collection_id.as_str(), "outerwear");
        assert_eq!(sources[0].items[0].id.as_str(), "p1");
    }

    #[test]
    fn test_mix_sources_unknown_collection() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        let err = snapshot.mix_sources(["outerwear", "hats"]).unwrap_err();

        assert!(matches!(&err, CatalogError::UnknownCollection(id) if id.as_str() == "hats"));
        assert_eq!(err.to_string(), "unknown collection: hats");
    }

    #[test]
    fn test_validate_clean_snapshot() {
        let snapshot = CatalogSnapshot::from_json(SNAPSHOT_JSON).unwrap();
        assert!(snapshot.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut first = CatalogItem::new("p1", "Tee");
        first.collection_ids.push(CollectionId::from("ghost"));
        let snapshot = CatalogSnapshot {
            products: vec![first, CatalogItem::new("p1", "Tee again")],
            collections: vec![
                CategoryRecord::new("tops", "Tops"),
                CategoryRecord::new("tops", "Tops"),
            ],
        };

        let issues = snapshot.validate();
        assert!(issues.contains(&CatalogIssue::DuplicateCollection(CollectionId::from("tops"))));
        assert!(issues.contains(&CatalogIssue::DuplicateProduct(ProductId::from("p1"))));
        assert!(issues.contains(&CatalogIssue::UnknownCollection {
            product: ProductId::from("p1"),
            collection: CollectionId::from("ghost"),
        }));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_issue_display() {
        let issue = CatalogIssue::UnknownCollection {
            product: ProductId::from("p9"),
            collection: CollectionId::from("sale"),
        };
        assert_eq!(issue.to_string(), "product p9 references unknown collection sale");
    }
}
