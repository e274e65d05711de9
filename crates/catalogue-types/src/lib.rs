//! Shared types for the builder-catalogue workspace.
//!
//! This crate provides foundational types used across multiple crates in the
//! workspace, breaking circular dependency chains:
//! - [`external`] - models for data fetched from the upstream catalogue API
//! - [`contracts`] - caller-facing response shapes for the insight operations
//! - [`pieces`] - piece/color/count primitives shared by the matching engine
//! - [`env_utils`] - environment variable parsing helpers

pub mod contracts;
pub mod env_utils;
pub mod external;
pub mod pieces;

// Re-export commonly used types at crate root
pub use contracts::{
    AssemblyRef, BuildSizeRecommendation, BuildableAssemblies, Collaboration,
    ColorFlexibleAssemblies, ColorFlexibleAssembly,
};
pub use external::{
    AssemblyDetail, AssemblyPage, AssemblyPiece, AssemblySummary, CollectionEntry, OwnerDetail,
    OwnerPage, OwnerSummary, PartInfo, PieceVariant,
};
pub use pieces::{PieceEntry, PieceKey, SubstitutionAssignment};
