//! Converters from upstream catalogue records into snapshots.

use std::sync::Arc;

use tracing::debug;

use catalogue_types::{AssemblyDetail, OwnerDetail, PieceEntry};

use crate::snapshot::InventorySnapshot;

/// Flatten an owner's collection into an owned-inventory snapshot.
pub fn owner_snapshot(detail: &OwnerDetail) -> Arc<InventorySnapshot> {
    let entries = detail.collection.iter().flat_map(|entry| {
        entry
            .variants
            .iter()
            .map(|variant| PieceEntry::new(&entry.piece_id, &variant.color_id, variant.count))
    });
    InventorySnapshot::create(entries, Some(detail.id.clone()))
}

/// Convert an assembly's parts list into a requirement snapshot keyed by
/// `(design_id, material_id-as-color)`.
///
/// Pieces without part metadata are a known upstream data-quality gap; they
/// are skipped, not treated as an error.
pub fn requirements_of(detail: &AssemblyDetail) -> Arc<InventorySnapshot> {
    let entries = detail.pieces.iter().filter_map(|piece| match &piece.part {
        Some(part) => Some(PieceEntry::new(
            &part.design_id,
            part.material_id.to_string(),
            piece.quantity,
        )),
        None => {
            debug!(assembly = %detail.id, "skipping assembly piece without part metadata");
            None
        }
    });
    InventorySnapshot::create(entries, None)
}
