//! Models for data fetched from the upstream catalogue API.
//!
//! These mirror the upstream JSON (camelCase keys) and are deliberately
//! lenient: collection and piece lists default to empty, and a set piece may
//! arrive without its part metadata. The requirement builder tolerates and
//! skips such entries rather than failing the whole assembly.

use serde::{Deserialize, Serialize};

/// Envelope for `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPage {
    #[serde(default)]
    pub users: Vec<OwnerSummary>,
}

/// Owner summary row as listed by the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub total_owned_count: u64,
}

/// Full owner record including the piece collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetail {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub total_owned_count: u64,
    #[serde(default)]
    pub collection: Vec<CollectionEntry>,
}

/// One piece design in an owner's collection, with its color variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub piece_id: String,
    #[serde(default)]
    pub variants: Vec<PieceVariant>,
}

/// Owned quantity of one color of a piece design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceVariant {
    pub color_id: String,
    pub count: u32,
}

/// Envelope for `GET /api/sets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyPage {
    #[serde(default)]
    pub sets: Vec<AssemblySummary>,
}

/// Assembly summary row as listed by the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblySummary {
    pub id: String,
    pub name: String,
    pub catalog_number: String,
    #[serde(default)]
    pub total_piece_count: u32,
}

/// Full assembly record including its parts list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyDetail {
    pub id: String,
    pub name: String,
    pub catalog_number: String,
    #[serde(default)]
    pub total_piece_count: u32,
    #[serde(default)]
    pub pieces: Vec<AssemblyPiece>,
}

/// One requirement line of an assembly. `part` may be absent upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyPiece {
    #[serde(default)]
    pub part: Option<PartInfo>,
    pub quantity: u32,
}

/// Part metadata: the piece design plus its material (color) code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartInfo {
    pub design_id: String,
    pub material_id: u32,
    #[serde(default)]
    pub part_type: String,
}
