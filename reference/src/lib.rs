//! D&D 5e reference data.
//!
//! Fetches race, class, monster and spell documents from the reference REST
//! service, caches responses on disk, and turns documents into the sheets the
//! character builder works with.
//!
//! # Layout
//!
//! - [`client`]: the [`ReferenceSource`] trait and its HTTP implementation.
//! - [`cache`]: on-disk response cache keyed by URL.
//! - [`config`]: YAML configuration shared by every command.
//! - [`sheet`]: race and class sheet assembly, including equipment parsing.
//! - [`averages`]: sampled monster ability-score averages.

pub mod averages;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod sheet;

pub use averages::{AbilityAverages, monster_ability_averages, sample_indices};
pub use cache::{CacheEntry, ResponseCache};
pub use client::{ApiReference, HttpReferenceClient, ReferenceSource, index_for_name};
pub use config::{CacheConfig, FighterConfig, LlmConfig, ReferenceConfig, SamplingConfig};
pub use error::{ReferenceError, Result};
pub use sheet::{
    class_sheet_from_documents, load_class_sheet, load_race_sheet, race_sheet_from_documents,
};
