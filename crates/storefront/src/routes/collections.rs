//! Collection route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tidewater_core::mix::{MixOptions, MixStrategy, mix_collections};
use tidewater_core::search::filter_products;
use tidewater_core::{CatalogItem, CategoryRecord};
use tracing::instrument;

use super::run_blocking;
use super::search::ProductPage;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Collection listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CategoryRecord>,
}

/// Query parameters for browsing one collection.
#[derive(Debug, Deserialize)]
pub struct CollectionProductsQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One page of a collection's products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionProductsResponse {
    pub collection: CategoryRecord,
    #[serde(flatten)]
    pub results: ProductPage,
}

/// Query parameters for a mixed product rail.
#[derive(Debug, Deserialize)]
pub struct MixQuery {
    /// Comma-separated collection IDs.
    #[serde(default)]
    pub ids: String,
    pub limit: Option<usize>,
    pub strategy: Option<String>,
    #[serde(default)]
    pub shuffle_collections: bool,
    #[serde(default)]
    pub shuffle_items: bool,
}

/// A mixed product rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixResponse {
    pub strategy: MixStrategy,
    pub limit: usize,
    pub products: Vec<CatalogItem>,
}

/// List shopper-facing collections.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<CollectionsResponse> {
    Json(CollectionsResponse {
        collections: state.catalog().listed_collections().cloned().collect(),
    })
}

/// Browse one collection, optionally narrowed by a search query.
///
/// Only the collection's own products are searched, so matching through
/// collections is skipped.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CollectionProductsQuery>,
) -> Result<Json<CollectionProductsResponse>> {
    let catalog = state.catalog();
    let collection = catalog
        .collection(&id)
        .ok_or_else(|| AppError::NotFound(format!("collection {id}")))?
        .clone();

    let members = catalog.products_in(&id);
    let matches = filter_products(&members, &query.q, None);
    let per_page = state.config().search.page_size(query.per_page);

    Ok(Json(CollectionProductsResponse {
        collection,
        results: ProductPage::paginate(&query.q, &matches, query.page.unwrap_or(1), per_page),
    }))
}

/// Build a product rail by mixing several collections.
#[instrument(skip(state))]
pub async fn mix(
    State(state): State<AppState>,
    Query(query): Query<MixQuery>,
) -> Result<Json<MixResponse>> {
    let ids: Vec<&str> = query
        .ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "at least one collection id is required".to_string(),
        ));
    }

    let strategy = query
        .strategy
        .as_deref()
        .map(str::parse::<MixStrategy>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .unwrap_or_default();

    let sources = state
        .catalog()
        .mix_sources(ids)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let options = MixOptions {
        strategy,
        limit: state.config().search.mix_limit(query.limit),
        shuffle_collections: query.shuffle_collections,
        shuffle_items: query.shuffle_items,
    };
    let collections = sources.len();
    let products =
        run_blocking(move || mix_collections(&sources, &options, &mut rand::rng())).await?;

    tracing::debug!(
        strategy = %strategy,
        collections,
        products = products.len(),
        "Mixed collection rail"
    );

    Ok(Json(MixResponse {
        strategy,
        limit: options.limit,
        products,
    }))
}

/// Create the collection routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/mix", get(mix))
        .route("/{id}/products", get(products))
}
