//! In-memory matching engine for the builder catalogue.
//!
//! Pure, synchronous computation over immutable [`InventorySnapshot`]s:
//!
//! - [`snapshot`] - the columnar, deduplicated piece/color/count store
//! - [`requirements`] - converts upstream owner/assembly records into snapshots
//! - [`deficit`] - missing-piece computation and buildability
//! - [`collaborator`] - inverted index and full-coverage owner search
//! - [`substitution`] - backtracking color-substitution solver
//!
//! Snapshots are immutable once built and safe to share across concurrent
//! queries without synchronization. Nothing in this crate performs I/O.

pub mod collaborator;
pub mod deficit;
pub mod requirements;
pub mod snapshot;
pub mod substitution;

pub use collaborator::{find_full_coverage, CollaboratorIndex};
pub use deficit::{compute_deficit, is_buildable};
pub use requirements::{owner_snapshot, requirements_of};
pub use snapshot::{InventorySnapshot, PieceRow};
pub use substitution::{solve_assembly, SolveOutcome};
