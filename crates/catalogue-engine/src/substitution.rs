//! Backtracking color-substitution solver.
//!
//! Designs are independent: each is solved on its own against the owner's
//! stock of that design, and one unresolved design fails the whole assembly.
//! Within a design the search is depth-first over the required colors,
//! decrementing a private working copy of the stock on descent and restoring
//! it on backtrack; the shared snapshots are never mutated.
//!
//! Worst case is exponential in the distinct colors of one design, which in
//! this catalogue stays small; no memoization across designs is needed.

use catalogue_types::SubstitutionAssignment;

use crate::snapshot::InventorySnapshot;

/// A satisfying assignment for every required `(design, color)` pair.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub assignments: Vec<SubstitutionAssignment>,
    /// True when at least one assignment used a different color than required.
    pub has_substitution: bool,
}

/// Assign every required color of every design to available stock,
/// respecting cumulative quantities. `None` when any design is unsolvable.
pub fn solve_assembly(
    required: &InventorySnapshot,
    available: &InventorySnapshot,
) -> Option<SolveOutcome> {
    let mut assignments = Vec::with_capacity(required.len());
    let mut has_substitution = false;

    for design in required.distinct_piece_ids() {
        let demands: Vec<(&str, u32)> = required
            .variants(design)
            .map(|row| (row.color_id, row.count))
            .collect();

        // Private working copy of the stock; quantities mutate during search.
        let mut stock: Vec<(&str, u32)> = available
            .variants(design)
            .map(|row| (row.color_id, row.count))
            .collect();
        if stock.is_empty() {
            return None;
        }
        // Exhaust larger stocks first; ties broken by color id for determinism.
        stock.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut chosen = vec![usize::MAX; demands.len()];
        if !assign(&demands, &mut stock, &mut chosen, 0) {
            return None;
        }

        for (slot, (color, quantity)) in chosen.iter().zip(&demands) {
            let used = stock[*slot].0;
            if used != *color {
                has_substitution = true;
            }
            assignments.push(SubstitutionAssignment {
                piece_id: design.to_owned(),
                required_color_id: (*color).to_owned(),
                used_color_id: used.to_owned(),
                quantity: *quantity,
            });
        }
    }

    Some(SolveOutcome {
        assignments,
        has_substitution,
    })
}

/// Depth-first search: give the required color at `depth` a stock slot whose
/// remaining quantity covers it, then recurse; undo the decrement when the
/// branch fails.
fn assign(
    demands: &[(&str, u32)],
    stock: &mut [(&str, u32)],
    chosen: &mut [usize],
    depth: usize,
) -> bool {
    if depth == demands.len() {
        return true;
    }
    let (_, quantity) = demands[depth];
    for slot in 0..stock.len() {
        if stock[slot].1 >= quantity {
            stock[slot].1 -= quantity;
            chosen[depth] = slot;
            if assign(demands, stock, chosen, depth + 1) {
                return true;
            }
            stock[slot].1 += quantity;
        }
    }
    false
}
