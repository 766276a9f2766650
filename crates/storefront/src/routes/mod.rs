//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (catalog loaded)
//!
//! # Search
//! GET  /search                     - Paginated product search (?q=&page=&per_page=&categories=)
//! GET  /search/suggest             - Search-as-you-type suggestions (?q=)
//!
//! # Collections
//! GET  /collections                - Collection listing
//! GET  /collections/mix            - Mixed product rail (?ids=a,b&limit=&strategy=)
//! GET  /collections/{id}/products  - Products in one collection (?q=&page=&per_page=)
//! ```

pub mod collections;
pub mod search;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::Result;
use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/search", search::router())
        .nest("/collections", collections::router())
}

/// Run CPU-bound catalog work on the blocking thread pool.
///
/// A panic inside `work` is reported as `AppError::Internal`.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await?)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog holds products.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_run_blocking_returns_value() {
        assert_eq!(run_blocking(|| 2 + 2).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_run_blocking_panic_is_internal_error() {
        let err = run_blocking(|| -> usize { panic!("matcher crashed") })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
