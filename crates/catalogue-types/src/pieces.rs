//! Piece/color/count primitives shared by the matching engine.
//!
//! String IDs keep these types aligned with the upstream JSON representation
//! and avoid parsing at the fetch boundary. Counts are unsigned: a snapshot
//! never records a negative quantity, and a zero count is a valid row
//! ("owns/requires none"), not a removal.

use serde::{Deserialize, Serialize};

/// Composite key identifying one row of a snapshot: a piece design in one
/// specific color/material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceKey {
    pub piece_id: String,
    pub color_id: String,
}

impl PieceKey {
    pub fn new(piece_id: impl Into<String>, color_id: impl Into<String>) -> Self {
        Self {
            piece_id: piece_id.into(),
            color_id: color_id.into(),
        }
    }
}

/// One `(piece, color, count)` row. Depending on the snapshot it lives in,
/// the count is an owned quantity, a required quantity, or a shortfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceEntry {
    pub piece_id: String,
    pub color_id: String,
    pub count: u32,
}

impl PieceEntry {
    pub fn new(piece_id: impl Into<String>, color_id: impl Into<String>, count: u32) -> Self {
        Self {
            piece_id: piece_id.into(),
            color_id: color_id.into(),
            count,
        }
    }

    pub fn key(&self) -> PieceKey {
        PieceKey::new(self.piece_id.clone(), self.color_id.clone())
    }
}

/// Record that `quantity` units of `required_color_id` were satisfied using
/// `used_color_id` stock. Equal color ids denote an exact, non-substituted
/// fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionAssignment {
    pub piece_id: String,
    pub required_color_id: String,
    pub used_color_id: String,
    pub quantity: u32,
}

impl SubstitutionAssignment {
    pub fn is_substitution(&self) -> bool {
        self.required_color_id != self.used_color_id
    }
}
