//! CLI subcommands.

pub mod catalog;
pub mod mix;
pub mod search;
pub mod validate;
