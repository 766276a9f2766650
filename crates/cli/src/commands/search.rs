//! Search a catalog snapshot from the command line.

use tidewater_core::CatalogSnapshot;
use tidewater_core::search::filter_products;

/// Print matching products as JSON lines.
#[allow(clippy::print_stdout)]
pub fn run(
    snapshot: &CatalogSnapshot,
    query: &str,
    use_categories: bool,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let categories = use_categories.then_some(snapshot.collections.as_slice());
    let matches = filter_products(&snapshot.products, query, categories);
    let total = matches.len();

    for item in matches.into_iter().take(limit.unwrap_or(usize::MAX)) {
        let line = serde_json::json!({ "id": item.id, "name": item.name });
        println!("{line}");
    }

    tracing::info!(query, total, "Search completed");
    Ok(())
}
