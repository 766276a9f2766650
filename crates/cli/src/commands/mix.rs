//! Preview a mixed product rail.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tidewater_core::CatalogSnapshot;
use tidewater_core::mix::{MixOptions, MixStrategy, mix_collections};

/// Arguments for one mix run.
#[derive(Debug)]
pub struct MixRequest {
    pub collections: Vec<String>,
    pub strategy: MixStrategy,
    pub limit: usize,
    pub seed: Option<u64>,
    pub shuffle_collections: bool,
    pub shuffle_items: bool,
}

/// Mix the requested collections and print the rail as JSON lines.
#[allow(clippy::print_stdout)]
pub fn run(
    snapshot: &CatalogSnapshot,
    request: &MixRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = snapshot.mix_sources(request.collections.iter().map(String::as_str))?;
    let options = MixOptions {
        strategy: request.strategy,
        limit: request.limit,
        shuffle_collections: request.shuffle_collections,
        shuffle_items: request.shuffle_items,
    };

    let rail = match request.seed {
        Some(seed) => mix_collections(&sources, &options, &mut StdRng::seed_from_u64(seed)),
        None => mix_collections(&sources, &options, &mut rand::rng()),
    };

    for (position, item) in rail.iter().enumerate() {
        let line = serde_json::json!({
            "position": position + 1,
            "id": item.id,
            "name": item.name,
        });
        println!("{line}");
    }

    tracing::info!(
        strategy = %request.strategy,
        collections = sources.len(),
        products = rail.len(),
        "Rail mixed"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tidewater_core::{CatalogItem, CategoryRecord};

    fn snapshot() -> CatalogSnapshot {
        let mut tee = CatalogItem::new("tee", "Tee");
        tee.collection_ids = vec!["tops".into()];
        CatalogSnapshot {
            products: vec![tee],
            collections: vec![CategoryRecord::new("tops", "Tops")],
        }
    }

    fn request(collections: &[&str], limit: usize) -> MixRequest {
        MixRequest {
            collections: collections.iter().map(ToString::to_string).collect(),
            strategy: MixStrategy::RoundRobin,
            limit,
            seed: Some(7),
            shuffle_collections: false,
            shuffle_items: false,
        }
    }

    #[test]
    fn test_run_with_unbounded_limit() {
        run(&snapshot(), &request(&["tops"], usize::MAX)).unwrap();
    }

    #[test]
    fn test_run_rejects_unknown_collection() {
        let err = run(&snapshot(), &request(&["shoes"], 3)).unwrap_err();
        assert_eq!(err.to_string(), "unknown collection: shoes");
    }
}
