//! Core types for Tidewater.
//!
//! This module provides type-safe IDs and the catalog data model shared by
//! search, mixing and every binary.

pub mod catalog;
pub mod id;

pub use catalog::*;
pub use id::*;
