//! Columnar inventory snapshot.
//!
//! A snapshot aggregates raw `(piece, color, count)` rows at creation time,
//! stores them as parallel columns sorted by `(piece_id, color_id)`, and
//! exposes O(1) point lookups plus a contiguous variant slice per piece
//! design. The same structure serves both "owned" and "required" roles, and
//! a deficit is itself a snapshot, so every component downstream consumes
//! one shape.
//!
//! Snapshots are immutable once built. Callers that need to mutate
//! quantities (the substitution search) copy the relevant column data into
//! private working state first.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::sync::{Arc, OnceLock};

use catalogue_types::{PieceEntry, PieceKey};

/// Contiguous run of column indices holding all color variants of one piece.
#[derive(Debug, Clone, Copy)]
struct PieceSlice {
    offset: usize,
    len: usize,
}

/// Borrowed view of one snapshot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRow<'a> {
    pub piece_id: &'a str,
    pub color_id: &'a str,
    pub count: u32,
}

impl PieceRow<'_> {
    pub fn to_entry(&self) -> PieceEntry {
        PieceEntry::new(self.piece_id, self.color_id, self.count)
    }
}

/// Immutable, deduplicated, sorted piece/color/count store.
#[derive(Debug, Default)]
pub struct InventorySnapshot {
    owner: Option<String>,
    // Parallel columns, sorted by (piece_id, color_id) ascending.
    piece_ids: Vec<String>,
    color_ids: Vec<String>,
    counts: Vec<u32>,
    // Point-lookup index into the columns.
    lookup: HashMap<PieceKey, usize>,
    // Per-design run of column indices (all variants are adjacent after sorting).
    slices: HashMap<String, PieceSlice>,
}

impl InventorySnapshot {
    /// Canonical empty snapshot, shared so trivial cases allocate nothing.
    pub fn empty() -> Arc<Self> {
        static EMPTY: OnceLock<Arc<InventorySnapshot>> = OnceLock::new();
        Arc::clone(EMPTY.get_or_init(|| Arc::new(Self::default())))
    }

    /// Build a snapshot from raw entries.
    ///
    /// Duplicate `(piece, color)` rows are summed, so split quantities are
    /// never lost and the result is independent of input ordering. Zero
    /// counts are retained: "requires none" is a valid row.
    pub fn create<I>(entries: I, owner: Option<String>) -> Arc<Self>
    where
        I: IntoIterator<Item = PieceEntry>,
    {
        // BTreeMap gives the (piece_id, color_id) ordinal ordering for free.
        let mut totals: BTreeMap<PieceKey, u32> = BTreeMap::new();
        for entry in entries {
            let total = totals.entry(entry.key()).or_insert(0);
            *total = total.saturating_add(entry.count);
        }

        if totals.is_empty() && owner.is_none() {
            return Self::empty();
        }

        let len = totals.len();
        let mut snapshot = Self {
            owner,
            piece_ids: Vec::with_capacity(len),
            color_ids: Vec::with_capacity(len),
            counts: Vec::with_capacity(len),
            lookup: HashMap::with_capacity(len),
            slices: HashMap::new(),
        };

        for (index, (key, count)) in totals.into_iter().enumerate() {
            // Open a new slice whenever the piece id changes; the sorted
            // ordering guarantees each design occupies one contiguous run.
            match snapshot.slices.get_mut(&key.piece_id) {
                Some(slice) => slice.len += 1,
                None => {
                    snapshot
                        .slices
                        .insert(key.piece_id.clone(), PieceSlice { offset: index, len: 1 });
                }
            }
            snapshot.piece_ids.push(key.piece_id.clone());
            snapshot.color_ids.push(key.color_id.clone());
            snapshot.counts.push(count);
            snapshot.lookup.insert(key, index);
        }

        Arc::new(snapshot)
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count stored for `(piece_id, color_id)`, or `None` when the key is
    /// absent from this snapshot.
    pub fn count_of(&self, piece_id: &str, color_id: &str) -> Option<u32> {
        self.lookup
            .get(&PieceKey::new(piece_id, color_id))
            .map(|&index| self.counts[index])
    }

    /// The raw count column, for linear scans.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn row(&self, index: usize) -> PieceRow<'_> {
        PieceRow {
            piece_id: &self.piece_ids[index],
            color_id: &self.color_ids[index],
            count: self.counts[index],
        }
    }

    /// All rows in `(piece_id, color_id)` ascending order.
    pub fn rows(&self) -> impl Iterator<Item = PieceRow<'_>> + '_ {
        (0..self.len()).map(move |index| self.row(index))
    }

    fn variant_range(&self, piece_id: &str) -> Range<usize> {
        match self.slices.get(piece_id) {
            Some(slice) => slice.offset..slice.offset + slice.len,
            None => 0..0,
        }
    }

    /// All color variants of one piece design, ascending by color id.
    /// Empty for an absent design.
    pub fn variants<'a>(&'a self, piece_id: &str) -> impl Iterator<Item = PieceRow<'a>> + 'a {
        self.variant_range(piece_id).map(move |index| self.row(index))
    }

    /// Distinct piece designs, ascending.
    pub fn distinct_piece_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.piece_ids
            .iter()
            .enumerate()
            .filter(|(index, id)| *index == 0 || self.piece_ids[index - 1] != **id)
            .map(|(_, id)| id.as_str())
    }
}
