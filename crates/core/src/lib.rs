//! Tidewater Core - Shared catalog types and product discovery algorithms.
//!
//! This crate is used by every Tidewater component:
//! - `storefront` - Public-facing HTTP service (search, collection rails)
//! - `cli` - Command-line tools for searching and validating catalog snapshots
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no global state. Catalog data is fetched by the caller and handed
//! in as plain slices, which keeps everything here safe to call from any
//! request concurrently.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the catalog data model
//! - [`search`] - Fuzzy product search matcher
//! - [`mix`] - Collection mixing strategies for product rails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod mix;
pub mod search;
pub mod types;

pub use types::*;
