//! Insight operations over the catalogue matching engine.
//!
//! [`InsightsService`] wires the fetch boundary ([`catalogue_transport`]) to
//! the pure matching core ([`catalogue_engine`]) and caches the snapshots it
//! builds along the way. The four public operations are:
//!
//! - [`InsightsService::buildable_assemblies`]
//! - [`InsightsService::find_collaborator`]
//! - [`InsightsService::recommend_build_size`]
//! - [`InsightsService::color_flexible_assemblies`]

pub mod cache;
pub mod error;
pub mod service;

pub use cache::{CatalogueStore, MemoryStore};
pub use error::InsightError;
pub use service::InsightsService;
