//! Caller-facing response shapes for the insight operations.
//!
//! These are what the (excluded) web or CLI layer serializes back to its
//! users. The core exchanges them as plain in-memory values.

use serde::{Deserialize, Serialize};

use crate::external::{AssemblyDetail, AssemblySummary};
use crate::pieces::SubstitutionAssignment;

/// Reference to one catalogued assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyRef {
    pub id: String,
    pub name: String,
    pub catalog_number: String,
    pub total_piece_count: u32,
}

impl From<&AssemblySummary> for AssemblyRef {
    fn from(summary: &AssemblySummary) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            catalog_number: summary.catalog_number.clone(),
            total_piece_count: summary.total_piece_count,
        }
    }
}

impl From<&AssemblyDetail> for AssemblyRef {
    fn from(detail: &AssemblyDetail) -> Self {
        Self {
            id: detail.id.clone(),
            name: detail.name.clone(),
            catalog_number: detail.catalog_number.clone(),
            total_piece_count: detail.total_piece_count,
        }
    }
}

/// Assemblies an owner can build with exact colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildableAssemblies {
    pub owner_name: String,
    pub count: usize,
    pub assemblies: Vec<AssemblyRef>,
}

/// Owners able to individually supply everything missing for one assembly.
///
/// `collaborator_pairs` is empty when the owner already covers the
/// requirement, or when no single candidate covers the whole deficit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub owner_name: String,
    pub assembly_id: String,
    pub assembly_name: String,
    pub collaborator_pairs: Vec<(String, String)>,
}

/// Build-size threshold derived from a percentile of comparable owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSizeRecommendation {
    pub owner_name: String,
    pub threshold: u64,
    pub comparable_owner_count: usize,
    pub percentile: f64,
}

/// One assembly buildable once color substitution is allowed, with the
/// satisfying color assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorFlexibleAssembly {
    pub id: String,
    pub name: String,
    pub catalog_number: String,
    pub total_piece_count: u32,
    pub color_assignments: Vec<SubstitutionAssignment>,
}

/// Assemblies an owner can build once color substitution is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorFlexibleAssemblies {
    pub owner_name: String,
    pub count: usize,
    pub assemblies: Vec<ColorFlexibleAssembly>,
}
