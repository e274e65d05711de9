//! Network transport for the upstream catalogue data source.
//!
//! The [`CatalogueSource`] trait is the fetch boundary the insight layer
//! depends on; [`HttpCatalogueSource`] is the HTTP implementation. Retry and
//! backoff are deliberately not implemented here; callers that want them
//! wrap the source.

pub mod client;
pub mod error;

pub use client::{CatalogueSource, HttpCatalogueSource};
pub use error::FetchError;
