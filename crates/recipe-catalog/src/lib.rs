//! Ingredient catalog maintenance and recipe table reshaping.
//!
//! The [`catalog`] module owns name normalization, duplicate detection and
//! catalog compaction. The [`recipes`] module covers the recipe master and
//! recipe ingredient detail tables.

pub mod catalog;
pub mod config;
pub mod error;
pub mod recipes;
pub mod telemetry;
