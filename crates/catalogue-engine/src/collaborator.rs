//! Inverted piece index and full-coverage collaborator search.
//!
//! The index maps every `(piece, color)` key to the owners holding it and
//! how many they hold. Building it is a one-time O(candidates x pieces)
//! cost; afterwards any deficit can be checked against the whole candidate
//! pool with one bucket lookup per missing key.
//!
//! The finder answers a deliberately narrow question: which candidates can
//! *individually* supply the entire deficit. A deficit only coverable by
//! two owners jointly returns no match.

use std::collections::{HashMap, HashSet};

use catalogue_types::PieceKey;

use crate::snapshot::InventorySnapshot;

/// `(piece, color) -> owner -> owned count`, built once per query from the
/// candidate pool and read-only afterwards.
#[derive(Debug, Default)]
pub struct CollaboratorIndex {
    buckets: HashMap<PieceKey, HashMap<String, u32>>,
}

impl CollaboratorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one candidate's snapshot into the index.
    ///
    /// Snapshot rows are already aggregated per key, so a plain insert per
    /// row is sufficient; fold order across candidates does not matter.
    pub fn add_owner(&mut self, owner: &str, snapshot: &InventorySnapshot) {
        for row in snapshot.rows() {
            self.buckets
                .entry(PieceKey::new(row.piece_id, row.color_id))
                .or_default()
                .insert(owner.to_owned(), row.count);
        }
    }

    pub fn bucket(&self, piece_id: &str, color_id: &str) -> Option<&HashMap<String, u32>> {
        self.buckets.get(&PieceKey::new(piece_id, color_id))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Owners able to unilaterally cover every row of `deficit`, sorted by name.
///
/// Deficit rows are visited in ascending required-count order so the most
/// selective buckets shrink the accumulator first; an absent bucket or an
/// emptied accumulator short-circuits to no match.
pub fn find_full_coverage(deficit: &InventorySnapshot, index: &CollaboratorIndex) -> Vec<String> {
    if deficit.is_empty() {
        return Vec::new();
    }

    let mut rows: Vec<_> = deficit.rows().collect();
    rows.sort_by_key(|row| row.count);

    let mut eligible: Option<HashSet<&str>> = None;
    for row in rows {
        let Some(bucket) = index.bucket(row.piece_id, row.color_id) else {
            return Vec::new();
        };
        let covering: HashSet<&str> = bucket
            .iter()
            .filter(|(_, &count)| count >= row.count)
            .map(|(owner, _)| owner.as_str())
            .collect();

        eligible = Some(match eligible {
            None => covering,
            Some(accumulator) => accumulator.intersection(&covering).copied().collect(),
        });

        if eligible.as_ref().is_some_and(HashSet::is_empty) {
            return Vec::new();
        }
    }

    let mut owners: Vec<String> = eligible
        .unwrap_or_default()
        .into_iter()
        .map(str::to_owned)
        .collect();
    owners.sort();
    owners
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_types::PieceEntry;
    use std::sync::Arc;

    fn snapshot(entries: Vec<(&str, &str, u32)>) -> Arc<InventorySnapshot> {
        InventorySnapshot::create(
            entries
                .into_iter()
                .map(|(p, c, n)| PieceEntry::new(p, c, n)),
            None,
        )
    }

    fn index(owners: Vec<(&str, Vec<(&str, &str, u32)>)>) -> CollaboratorIndex {
        let mut index = CollaboratorIndex::new();
        for (owner, entries) in owners {
            index.add_owner(owner, &snapshot(entries));
        }
        index
    }

    #[test]
    fn returns_owners_covering_every_deficit_row() {
        let deficit = snapshot(vec![("brick-1", "Red", 2), ("brick-2", "Blue", 1)]);
        let index = index(vec![
            ("userA", vec![("brick-1", "Red", 3), ("brick-2", "Blue", 1)]),
            ("userB", vec![("brick-1", "Red", 2)]),
        ]);

        assert_eq!(find_full_coverage(&deficit, &index), vec!["userA"]);
    }

    #[test]
    fn returns_empty_when_counts_are_insufficient() {
        let deficit = snapshot(vec![("brick-1", "Red", 5), ("brick-2", "Blue", 1)]);
        let index = index(vec![
            ("userA", vec![("brick-1", "Red", 4), ("brick-2", "Blue", 1)]),
        ]);

        assert!(find_full_coverage(&deficit, &index).is_empty());
    }

    #[test]
    fn missing_bucket_short_circuits_to_empty() {
        let deficit = snapshot(vec![("brick-1", "Red", 1), ("brick-9", "Green", 1)]);
        let index = index(vec![("userA", vec![("brick-1", "Red", 10)])]);

        assert!(find_full_coverage(&deficit, &index).is_empty());
    }

    #[test]
    fn partial_joint_coverage_is_not_a_match() {
        // userA covers the red brick, userB the blue one; neither covers both.
        let deficit = snapshot(vec![("brick-1", "Red", 2), ("brick-2", "Blue", 2)]);
        let index = index(vec![
            ("userA", vec![("brick-1", "Red", 5)]),
            ("userB", vec![("brick-2", "Blue", 5)]),
        ]);

        assert!(find_full_coverage(&deficit, &index).is_empty());
    }

    #[test]
    fn multiple_full_coverers_are_all_returned_sorted() {
        let deficit = snapshot(vec![("brick-1", "Red", 1)]);
        let index = index(vec![
            ("zoe", vec![("brick-1", "Red", 2)]),
            ("amy", vec![("brick-1", "Red", 1)]),
            ("tim", vec![("brick-1", "Red", 0)]),
        ]);

        assert_eq!(find_full_coverage(&deficit, &index), vec!["amy", "zoe"]);
    }
}
