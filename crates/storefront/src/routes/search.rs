//! Search route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tidewater_core::CatalogItem;
use tidewater_core::search::filter_products;
use tracing::instrument;

use super::run_blocking;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Number of products in the search-as-you-type dropdown.
const SUGGESTION_LIMIT: usize = 4;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Full search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    #[serde(default)]
    pub q: String,
    /// 1-based page number.
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    /// Match products through their collections (default: true).
    pub categories: Option<bool>,
}

/// One page of matching products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub query: String,
    /// Number of matching products across all pages.
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
    pub has_next_page: bool,
    pub products: Vec<CatalogItem>,
}

impl ProductPage {
    /// Slice one page out of the full match list.
    #[must_use]
    pub fn paginate(query: &str, matches: &[&CatalogItem], page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(per_page);
        let products: Vec<CatalogItem> = matches
            .iter()
            .skip(start)
            .take(per_page)
            .map(|item| (*item).clone())
            .collect();

        Self {
            query: query.trim().to_string(),
            total_count: matches.len(),
            page,
            per_page,
            has_next_page: start.saturating_add(products.len()) < matches.len(),
            products,
        }
    }
}

/// A search-as-you-type suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
}

/// Search suggestions response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Search suggestions endpoint.
///
/// Returns the first few matching product names. A blank query returns no
/// suggestions rather than the whole catalog.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let query_str = query.q.trim();

    if query_str.is_empty() {
        return Json(SuggestResponse {
            query: String::new(),
            suggestions: Vec::new(),
        });
    }

    let catalog = state.catalog();
    let suggestions = filter_products(catalog.products(), query_str, Some(catalog.collections()))
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|item| Suggestion {
            id: item.id.to_string(),
            name: item.name.clone(),
        })
        .collect();

    Json(SuggestResponse {
        query: query_str.to_string(),
        suggestions,
    })
}

/// Full search endpoint.
///
/// A blank query lists the whole catalog.
#[instrument(skip(state))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQueryParams>,
) -> Result<Json<ProductPage>> {
    let catalog = state.catalog().clone();
    let per_page = state.config().search.page_size(query.per_page);
    let page = query.page.unwrap_or(1);
    let use_categories = query.categories.unwrap_or(true);
    let raw_query = query.q;

    let results = run_blocking(move || {
        let categories = use_categories.then(|| catalog.collections());
        let matches = filter_products(catalog.products(), &raw_query, categories);
        ProductPage::paginate(&raw_query, &matches, page, per_page)
    })
    .await?;

    tracing::debug!(
        total = results.total_count,
        page = results.page,
        "Search completed"
    );
    add_breadcrumb("search", "Searched catalog", &[("query", results.query.as_str())]);

    Ok(Json(results))
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_page))
        .route("/suggest", get(suggest))
}
