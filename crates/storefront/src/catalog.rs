//! In-memory catalog snapshot.
//!
//! The catalog is read from a JSON snapshot at startup and shared read-only
//! between requests. Handlers borrow from it for the duration of one request;
//! nothing is cached or mutated across requests.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tidewater_core::mix::CollectionItems;
use tidewater_core::{CatalogError, CatalogItem, CatalogSnapshot, CategoryRecord};

/// Errors loading the catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Shared read-only catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    snapshot: Arc<CatalogSnapshot>,
}

impl CatalogStore {
    /// Wrap an already-loaded snapshot.
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Load and parse a snapshot file.
    ///
    /// Validation issues are logged but do not prevent loading.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` if the file can't be read or isn't a valid
    /// snapshot.
    pub async fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogLoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let snapshot = CatalogSnapshot::from_json(&json)?;

        for issue in snapshot.validate() {
            tracing::warn!(%issue, "Catalog snapshot issue");
        }

        tracing::info!(
            products = snapshot.products.len(),
            collections = snapshot.collections.len(),
            path = %path.display(),
            "Catalog loaded"
        );

        Ok(Self::new(snapshot))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[CatalogItem] {
        &self.snapshot.products
    }

    /// All collection records, including the "all products" collection.
    #[must_use]
    pub fn collections(&self) -> &[CategoryRecord] {
        &self.snapshot.collections
    }

    /// Collections worth listing to shoppers.
    pub fn listed_collections(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.snapshot
            .collections
            .iter()
            .filter(|collection| !collection.is_all_products())
    }

    /// Look up a collection by ID.
    #[must_use]
    pub fn collection(&self, id: &str) -> Option<&CategoryRecord> {
        self.snapshot.collection(id)
    }

    /// Products of one collection, in catalog order.
    #[must_use]
    pub fn products_in(&self, collection_id: &str) -> Vec<CatalogItem> {
        self.snapshot
            .products_in(collection_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Gather mixer input for the given collection IDs, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownCollection` for the first ID that isn't
    /// a known collection.
    pub fn mix_sources<'a>(
        &self,
        collection_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<CollectionItems>, CatalogError> {
        self.snapshot.mix_sources(collection_ids)
    }

    /// Whether the catalog has any products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tidewater_core::{ALL_PRODUCTS_COLLECTION_ID, CollectionId};

    use super::*;

    fn store() -> CatalogStore {
        let mut tee = CatalogItem::new("p1", "Striped Tee");
        tee.collection_ids = vec![CollectionId::from("tops")];
        let mut boot = CatalogItem::new("p2", "Rain Boot");
        boot.collection_ids = vec![CollectionId::from("shoes")];

        CatalogStore::new(CatalogSnapshot {
            products: vec![tee, boot],
            collections: vec![
                CategoryRecord::new(ALL_PRODUCTS_COLLECTION_ID, "All Products"),
                CategoryRecord::new("tops", "Tops"),
                CategoryRecord::new("shoes", "Shoes"),
            ],
        })
    }

    #[test]
    fn test_listed_collections_hide_all_products() {
        let store = store();
        let ids: Vec<&str> = store.listed_collections().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tops", "shoes"]);
        assert_eq!(store.collections().len(), 3);
    }

    #[test]
    fn test_mix_sources_in_requested_order() {
        let sources = store().mix_sources(["shoes", "tops"]).unwrap();
        assert_eq!(sources[0].collection_id.as_str(), "shoes");
        assert_eq!(sources[0].items[0].id.as_str(), "p2");
        assert_eq!(sources[1].items[0].id.as_str(), "p1");
    }

    #[test]
    fn test_mix_sources_unknown_collection() {
        let err = store().mix_sources(["tops", "hats"]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCollection(id) if id.as_str() == "hats"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = CatalogStore::load(Path::new("/nonexistent/catalog.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_snapshot_file() {
        let path = std::env::temp_dir().join(format!(
            "tidewater-catalog-{}.json",
            uuid::Uuid::new_v4()
        ));
        tokio::fs::write(
            &path,
            r#"{"products":[{"id":"p1","name":"Tee"}],"collections":[]}"#,
        )
        .await
        .unwrap();

        let store = CatalogStore::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(store.products().len(), 1);
        assert!(!store.is_empty());
    }
}
