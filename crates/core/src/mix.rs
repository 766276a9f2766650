//! Collection mixing for product rails.
//!
//! A rail ("Trending", "New this week") is assembled from several
//! collections fetched separately. The strategies here interleave those
//! per-collection lists into one list capped at a limit.
//!
//! Randomness comes from a caller-supplied [`Rng`] so tests can use a seeded
//! generator while the storefront uses `rand::rng()`.
//!
//! A product may belong to several source collections; it appears at most
//! once in the output and a skipped duplicate does not count toward the
//! limit.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CatalogItem, CollectionId, ProductId};

/// How items are drawn from the source collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixStrategy {
    /// One item from each collection in turn.
    #[default]
    RoundRobin,
    /// Each collection's items in full, in collection order.
    Sequential,
    /// A uniformly random non-exhausted collection for every pick.
    Weighted,
}

impl MixStrategy {
    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::Sequential => "sequential",
            Self::Weighted => "weighted",
        }
    }
}

impl fmt::Display for MixStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`MixStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mix strategy: {0}")]
pub struct ParseStrategyError(String);

impl FromStr for MixStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round-robin" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "sequential" => Ok(Self::Sequential),
            "weighted" | "random" => Ok(Self::Weighted),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Items fetched for one source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItems {
    pub collection_id: CollectionId,
    pub items: Vec<CatalogItem>,
}

impl CollectionItems {
    #[must_use]
    pub fn new(collection_id: impl Into<CollectionId>, items: Vec<CatalogItem>) -> Self {
        Self {
            collection_id: collection_id.into(),
            items,
        }
    }
}

/// Options for [`mix_collections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixOptions {
    pub strategy: MixStrategy,
    /// Maximum number of items in the result.
    pub limit: usize,
    /// Shuffle the order collections are visited in.
    pub shuffle_collections: bool,
    /// Shuffle each collection's items before drawing from it.
    pub shuffle_items: bool,
}

impl MixOptions {
    /// Options for a strategy and limit, without shuffling.
    #[must_use]
    pub const fn new(strategy: MixStrategy, limit: usize) -> Self {
        Self {
            strategy,
            limit,
            shuffle_collections: false,
            shuffle_items: false,
        }
    }
}

/// Collects items up to a limit, skipping IDs already taken.
struct Picker {
    seen: HashSet<ProductId>,
    picked: Vec<CatalogItem>,
    limit: usize,
}

impl Picker {
    fn new(limit: usize, sources: &[CollectionItems]) -> Self {
        let available: usize = sources.iter().map(|s| s.items.len()).sum();
        Self {
            seen: HashSet::new(),
            picked: Vec::with_capacity(limit.min(available)),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.picked.len() >= self.limit
    }

    fn offer(&mut self, item: &CatalogItem) {
        if !self.is_full() && self.seen.insert(item.id.clone()) {
            self.picked.push(item.clone());
        }
    }
}

/// Take one item from each collection in turn until the limit is reached or
/// every collection is exhausted.
#[must_use]
pub fn round_robin_mix(sources: &[CollectionItems], limit: usize) -> Vec<CatalogItem> {
    let mut picker = Picker::new(limit, sources);
    let longest = sources.iter().map(|s| s.items.len()).max().unwrap_or(0);

    for position in 0..longest {
        for source in sources {
            if picker.is_full() {
                return picker.picked;
            }
            if let Some(item) = source.items.get(position) {
                picker.offer(item);
            }
        }
    }

    picker.picked
}

/// Concatenate each collection's items in collection order, stopping at the
/// limit.
#[must_use]
pub fn sequential_mix(sources: &[CollectionItems], limit: usize) -> Vec<CatalogItem> {
    let mut picker = Picker::new(limit, sources);

    for item in sources.iter().flat_map(|s| s.items.iter()) {
        if picker.is_full() {
            break;
        }
        picker.offer(item);
    }

    picker.picked
}

/// Repeatedly pick a uniformly random collection that still has items and
/// take its next item.
pub fn weighted_mix<R: Rng + ?Sized>(
    sources: &[CollectionItems],
    limit: usize,
    rng: &mut R,
) -> Vec<CatalogItem> {
    let mut picker = Picker::new(limit, sources);
    let mut cursors: Vec<(&[CatalogItem], usize)> = sources
        .iter()
        .filter(|s| !s.items.is_empty())
        .map(|s| (s.items.as_slice(), 0))
        .collect();

    while !picker.is_full() && !cursors.is_empty() {
        let index = rng.random_range(0..cursors.len());
        let Some((items, next)) = cursors.get_mut(index) else {
            break;
        };
        if let Some(item) = items.get(*next) {
            picker.offer(item);
        }
        *next += 1;
        if *next >= items.len() {
            cursors.swap_remove(index);
        }
    }

    picker.picked
}

/// Mix collections into one list with the configured strategy and shuffles.
///
/// Collection order is shuffled first (when enabled), then each collection's
/// items, both with a uniform Fisher-Yates shuffle. The result never exceeds
/// `options.limit` and never repeats a product ID.
pub fn mix_collections<R: Rng + ?Sized>(
    sources: &[CollectionItems],
    options: &MixOptions,
    rng: &mut R,
) -> Vec<CatalogItem> {
    if options.limit == 0 || sources.is_empty() {
        return Vec::new();
    }

    let mut sources = sources.to_vec();
    if options.shuffle_collections {
        sources.shuffle(rng);
    }
    if options.shuffle_items {
        for source in &mut sources {
            source.items.shuffle(rng);
        }
    }

    match options.strategy {
        MixStrategy::RoundRobin => round_robin_mix(&sources, options.limit),
        MixStrategy::Sequential => sequential_mix(&sources, options.limit),
        MixStrategy::Weighted => weighted_mix(&sources, options.limit, rng),
    }
}
