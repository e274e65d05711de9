//! Missing-piece computation and buildability.

use std::sync::Arc;

use crate::snapshot::InventorySnapshot;

/// Per-key shortfall of `owned` against `required`.
///
/// For every required row, a key absent from `owned` counts as zero. Only
/// strictly positive shortfalls produce a row, so the result is empty
/// exactly when the requirement is fully covered. The result is a regular
/// snapshot and can be fed back into any snapshot consumer.
pub fn compute_deficit(
    owned: &InventorySnapshot,
    required: &InventorySnapshot,
) -> Arc<InventorySnapshot> {
    let missing = required.rows().filter_map(|row| {
        let held = owned.count_of(row.piece_id, row.color_id).unwrap_or(0);
        (row.count > held).then(|| {
            let mut entry = row.to_entry();
            entry.count = row.count - held;
            entry
        })
    });
    InventorySnapshot::create(missing, None)
}

/// An assembly is buildable when its deficit is empty.
pub fn is_buildable(owned: &InventorySnapshot, required: &InventorySnapshot) -> bool {
    compute_deficit(owned, required).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_types::PieceEntry;

    fn snapshot(entries: Vec<(&str, &str, u32)>) -> Arc<InventorySnapshot> {
        InventorySnapshot::create(
            entries
                .into_iter()
                .map(|(p, c, n)| PieceEntry::new(p, c, n)),
            None,
        )
    }

    #[test]
    fn deficit_is_empty_when_everything_is_covered() {
        let owned = snapshot(vec![("brick-1", "Red", 4), ("brick-2", "Blue", 1)]);
        let required = snapshot(vec![("brick-1", "Red", 2), ("brick-2", "Blue", 1)]);

        assert!(compute_deficit(&owned, &required).is_empty());
        assert!(is_buildable(&owned, &required));
    }

    #[test]
    fn deficit_reports_exact_shortfalls() {
        let owned = snapshot(vec![("brick-1", "Red", 1)]);
        let required = snapshot(vec![("brick-1", "Red", 3), ("brick-2", "Blue", 2)]);

        let deficit = compute_deficit(&owned, &required);
        assert_eq!(deficit.len(), 2);
        assert_eq!(deficit.count_of("brick-1", "Red"), Some(2));
        assert_eq!(deficit.count_of("brick-2", "Blue"), Some(2));
        assert!(!is_buildable(&owned, &required));
    }

    #[test]
    fn absent_owned_key_counts_as_zero() {
        let owned = InventorySnapshot::empty();
        let required = snapshot(vec![("brick-1", "Red", 2)]);

        let deficit = compute_deficit(&owned, &required);
        assert_eq!(deficit.count_of("brick-1", "Red"), Some(2));
    }

    #[test]
    fn zero_count_requirements_are_always_covered() {
        let owned = InventorySnapshot::empty();
        let required = snapshot(vec![("brick-1", "Red", 0)]);

        assert!(is_buildable(&owned, &required));
    }
}
