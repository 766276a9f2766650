//! Integration tests for Tidewater.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tidewater-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search_scenarios` - matcher and mixer behavior across the core API
//! - `storefront_routes` - HTTP routes driven through the router in-process
//!
//! No server or external service is needed; the storefront router is called
//! directly with a fixture catalog.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use tidewater_core::{
    ALL_PRODUCTS_COLLECTION_ID, CatalogItem, CatalogSnapshot, CategoryRecord, CollectionId,
    CustomTextField, InfoSection, MediaImage, MediaItem, ProductMedia,
};
use tidewater_storefront::catalog::CatalogStore;
use tidewater_storefront::config::{SearchConfig, StorefrontConfig};
use tidewater_storefront::state::AppState;

fn product(id: &str, name: &str, collections: &[&str]) -> CatalogItem {
    let mut item = CatalogItem::new(id, name);
    item.collection_ids = collections.iter().map(|c| CollectionId::from(*c)).collect();
    item
}

/// A small apparel catalog.
///
/// | id       | name               | collections        |
/// |----------|--------------------|--------------------|
/// | `red`    | Red Leather Jacket | outerwear, sale    |
/// | `blue`   | Blue Denim Jacket  | outerwear          |
/// | `boot`   | Rain Boot          | footwear, sale     |
/// | `legs`   | Black Leggings     | (none)             |
/// | `tote`   | Canvas Tote        | all products       |
#[must_use]
pub fn fixture_catalog() -> CatalogSnapshot {
    let mut red = product("red", "Red Leather Jacket", &["outerwear", "sale"]);
    red.brand = Some("Harbor".to_string());
    red.additional_info_sections = vec![InfoSection {
        title: Some("Care".to_string()),
        description: Some("Wipe with a damp cloth".to_string()),
    }];

    let blue = product("blue", "Blue Denim Jacket", &["outerwear"]);

    let mut boot = product("boot", "Rain Boot", &["footwear", "sale"]);
    boot.description = Some("Waterproof rubber".to_string());

    let mut legs = product("legs", "Black Leggings", &[]);
    legs.media = Some(ProductMedia {
        main_media: Some(MediaItem {
            image: Some(MediaImage {
                url: None,
                alt_text: Some("model stretching in leggings".to_string()),
            }),
        }),
        items: Vec::new(),
    });

    let mut tote = product("tote", "Canvas Tote", &[ALL_PRODUCTS_COLLECTION_ID]);
    tote.custom_text_fields = vec![CustomTextField {
        title: Some("Monogram".to_string()),
        value: None,
    }];

    let mut all_products = CategoryRecord::new(ALL_PRODUCTS_COLLECTION_ID, "All Products");
    all_products.description = Some("Everything in the catalog".to_string());
    let mut outerwear = CategoryRecord::new("outerwear", "Outerwear");
    outerwear.description = Some("Coats and shells".to_string());
    let mut sale = CategoryRecord::new("sale", "Sale");
    sale.description = Some("Last chance markdowns".to_string());

    CatalogSnapshot {
        products: vec![red, blue, boot, legs, tote],
        collections: vec![
            all_products,
            outerwear,
            CategoryRecord::new("footwear", "Footwear"),
            sale,
        ],
    }
}

/// Storefront configuration for in-process tests.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        catalog_path: PathBuf::from("catalog.json"),
        search: SearchConfig {
            page_size: 2,
            max_page_size: 4,
            mix_limit: 3,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Application state over the fixture catalog.
#[must_use]
pub fn fixture_state() -> AppState {
    AppState::new(test_config(), CatalogStore::new(fixture_catalog()))
}

/// IDs of a list of products, in order.
#[must_use]
pub fn ids(items: &[&CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.id.to_string()).collect()
}
