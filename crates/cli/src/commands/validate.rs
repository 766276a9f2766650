//! Validate a catalog snapshot.

use tidewater_core::CatalogSnapshot;

/// Log every issue in the snapshot; fail if there are any.
pub fn run(snapshot: &CatalogSnapshot) -> Result<(), Box<dyn std::error::Error>> {
    let issues = snapshot.validate();

    for issue in &issues {
        tracing::warn!(%issue, "Catalog issue");
    }

    if issues.is_empty() {
        tracing::info!("Catalog snapshot is valid");
        Ok(())
    } else {
        Err(format!("{} catalog issue(s) found", issues.len()).into())
    }
}
