//! Catalog snapshot loading shared by all commands.

use std::path::PathBuf;

use tidewater_core::CatalogSnapshot;

/// Environment variable the storefront reads its snapshot path from.
const CATALOG_PATH_VAR: &str = "STOREFRONT_CATALOG_PATH";

/// Resolve the snapshot path from the flag or the storefront's environment.
fn resolve_path(flag: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = flag {
        return Ok(path);
    }

    dotenvy::dotenv().ok();
    std::env::var(CATALOG_PATH_VAR)
        .map(PathBuf::from)
        .map_err(|_| format!("--catalog not given and {CATALOG_PATH_VAR} is not set").into())
}

/// Read and parse a catalog snapshot.
pub async fn load(flag: Option<PathBuf>) -> Result<CatalogSnapshot, Box<dyn std::error::Error>> {
    let path = resolve_path(flag)?;
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let snapshot = CatalogSnapshot::from_json(&json)?;

    tracing::info!(
        products = snapshot.products.len(),
        collections = snapshot.collections.len(),
        path = %path.display(),
        "Catalog loaded"
    );

    Ok(snapshot)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_prefers_flag() {
        let path = resolve_path(Some(PathBuf::from("snapshot.json"))).unwrap();
        assert_eq!(path, PathBuf::from("snapshot.json"));
    }
}
