//! The insight operations.
//!
//! The service owns the fetch source and a snapshot store. All matching is
//! delegated to the pure engine; this layer only decides what to fetch,
//! what to cache, and how failures surface. Candidate detail fetches for
//! the collaborator index fan out concurrently; the fold into the index is
//! commutative per key, so completion order does not matter.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use catalogue_engine::{
    compute_deficit, find_full_coverage, is_buildable, owner_snapshot, requirements_of,
    solve_assembly, CollaboratorIndex, InventorySnapshot,
};
use catalogue_transport::CatalogueSource;
use catalogue_types::{
    AssemblyDetail, AssemblyRef, BuildSizeRecommendation, BuildableAssemblies, Collaboration,
    ColorFlexibleAssemblies, ColorFlexibleAssembly, OwnerSummary,
};

use crate::cache::{CatalogueStore, MemoryStore};
use crate::error::InsightError;

/// Buildability insights over one catalogue source.
pub struct InsightsService<S> {
    source: Arc<S>,
    store: Arc<dyn CatalogueStore>,
}

impl<S: CatalogueSource + 'static> InsightsService<S> {
    /// Create a service with a default in-memory store.
    pub fn new(source: S) -> Self {
        Self::with_store(source, Arc::new(MemoryStore::default()))
    }

    /// Create a service over a caller-provided store.
    pub fn with_store(source: S, store: Arc<dyn CatalogueStore>) -> Self {
        Self {
            source: Arc::new(source),
            store,
        }
    }

    /// Assemblies the owner can build with exact colors.
    pub async fn buildable_assemblies(
        &self,
        owner_name: &str,
    ) -> Result<BuildableAssemblies, InsightError> {
        ensure_not_blank(owner_name, "owner name")?;

        let owned = self.cached_owner_snapshot(owner_name).await?;
        let summaries = self.source.assemblies().await?;

        let mut assemblies = Vec::new();
        for summary in &summaries {
            let detail = self.cached_assembly_detail(&summary.id).await?;
            if detail.pieces.is_empty() {
                continue;
            }
            let required = self.cached_requirements(&detail);
            if is_buildable(&owned, &required) {
                assemblies.push(AssemblyRef::from(summary));
            }
        }

        debug!(owner = owner_name, buildable = assemblies.len(), "evaluated catalogue");
        Ok(BuildableAssemblies {
            owner_name: owner_name.to_owned(),
            count: assemblies.len(),
            assemblies,
        })
    }

    /// Owners who can individually supply everything the owner is missing
    /// for one assembly.
    pub async fn find_collaborator(
        &self,
        owner_name: &str,
        assembly_id: &str,
    ) -> Result<Collaboration, InsightError> {
        ensure_not_blank(owner_name, "owner name")?;
        ensure_not_blank(assembly_id, "assembly id")?;

        let detail = self.cached_assembly_detail(assembly_id).await?;
        let required = self.cached_requirements(&detail);
        let owned = self.cached_owner_snapshot(owner_name).await?;

        let mut collaboration = Collaboration {
            owner_name: owner_name.to_owned(),
            assembly_id: detail.id.clone(),
            assembly_name: detail.name.clone(),
            collaborator_pairs: Vec::new(),
        };

        let deficit = compute_deficit(&owned, &required);
        if deficit.is_empty() {
            return Ok(collaboration);
        }

        let candidates = self.other_owners(owner_name).await?;
        if candidates.is_empty() {
            // An owner with no peers simply has no collaborators.
            return Ok(collaboration);
        }

        let index = self.build_collaborator_index(candidates).await;
        collaboration.collaborator_pairs = find_full_coverage(&deficit, &index)
            .into_iter()
            .map(|candidate| (owner_name.to_owned(), candidate))
            .collect();
        Ok(collaboration)
    }

    /// Build-size threshold from a percentile of comparable owners.
    ///
    /// Candidates are every other owner, ordered ascending by total owned
    /// count; the reference sits at `floor(count * percentile)`, clamped to
    /// the last index. The threshold is the reference owner's total when the
    /// owner's inventory covers the reference inventory entirely, otherwise
    /// the owner's own total.
    pub async fn recommend_build_size(
        &self,
        owner_name: &str,
        percentile: f64,
    ) -> Result<BuildSizeRecommendation, InsightError> {
        ensure_not_blank(owner_name, "owner name")?;
        if !(percentile > 0.0 && percentile <= 1.0) {
            return Err(InsightError::InvalidArgument(format!(
                "percentile must be within (0, 1], got {percentile}"
            )));
        }

        let mut candidates = self.other_owners(owner_name).await?;
        if candidates.is_empty() {
            return Err(InsightError::EmptyCandidatePool);
        }
        candidates.sort_by(|a, b| {
            a.total_owned_count
                .cmp(&b.total_owned_count)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        let skip = (candidates.len() as f64 * percentile).floor() as usize;
        let index = skip.min(candidates.len() - 1);
        let reference = &candidates[index];
        let reference_snapshot = self.cached_owner_snapshot(&reference.display_name).await?;

        let owner_detail = self.source.owner_detail(owner_name).await?;
        let owned = match self.store.owner_snapshot(owner_name) {
            Some(snapshot) => snapshot,
            None => self
                .store
                .insert_owner_snapshot(owner_name, owner_snapshot(&owner_detail)),
        };

        // If the owner's stock covers the reference owner's stock entirely,
        // anything the reference can build fits within the owner's pieces.
        let threshold = if is_buildable(&owned, &reference_snapshot) {
            reference.total_owned_count
        } else {
            owner_detail.total_owned_count
        };

        Ok(BuildSizeRecommendation {
            owner_name: owner_name.to_owned(),
            threshold,
            comparable_owner_count: candidates.len() - index,
            percentile,
        })
    }

    /// Assemblies buildable once same-design color substitution is allowed.
    ///
    /// An assembly that is already exactly buildable and whose solve used no
    /// substitution is not reported; it is not a flexibility discovery.
    pub async fn color_flexible_assemblies(
        &self,
        owner_name: &str,
    ) -> Result<ColorFlexibleAssemblies, InsightError> {
        ensure_not_blank(owner_name, "owner name")?;

        let owned = self.cached_owner_snapshot(owner_name).await?;
        let summaries = self.source.assemblies().await?;

        let mut assemblies = Vec::new();
        for summary in &summaries {
            let detail = self.cached_assembly_detail(&summary.id).await?;
            if detail.pieces.is_empty() {
                continue;
            }
            let required = self.cached_requirements(&detail);

            let Some(outcome) = solve_assembly(&required, &owned) else {
                continue;
            };
            if outcome.assignments.is_empty() {
                continue;
            }
            let exactly_buildable = is_buildable(&owned, &required);
            if exactly_buildable && !outcome.has_substitution {
                continue;
            }

            assemblies.push(ColorFlexibleAssembly {
                id: summary.id.clone(),
                name: summary.name.clone(),
                catalog_number: summary.catalog_number.clone(),
                total_piece_count: summary.total_piece_count,
                color_assignments: outcome.assignments,
            });
        }

        Ok(ColorFlexibleAssemblies {
            owner_name: owner_name.to_owned(),
            count: assemblies.len(),
            assemblies,
        })
    }

    /// Resolve an assembly id from its name (case-insensitive).
    pub async fn resolve_assembly_id(&self, name: &str) -> Result<String, InsightError> {
        ensure_not_blank(name, "assembly name")?;
        let summaries = self.source.assemblies().await?;
        summaries
            .into_iter()
            .find(|summary| summary.name.eq_ignore_ascii_case(name))
            .map(|summary| summary.id)
            .ok_or(InsightError::NotFound {
                kind: "assembly",
                id: name.to_owned(),
            })
    }

    async fn other_owners(&self, owner_name: &str) -> Result<Vec<OwnerSummary>, InsightError> {
        Ok(self
            .source
            .owners()
            .await?
            .into_iter()
            .filter(|owner| owner.display_name != owner_name)
            .collect())
    }

    /// Fan out candidate detail fetches and fold the results into one index.
    ///
    /// A failed candidate fetch is skipped with a warning: one owner's flaky
    /// record must not mask another owner's valid full coverage.
    async fn build_collaborator_index(&self, candidates: Vec<OwnerSummary>) -> CollaboratorIndex {
        let mut fetches = JoinSet::new();
        for candidate in candidates {
            let source = Arc::clone(&self.source);
            fetches.spawn(async move {
                let result = source.owner_detail(&candidate.display_name).await;
                (candidate.display_name, result)
            });
        }

        let mut index = CollaboratorIndex::new();
        while let Some(joined) = fetches.join_next().await {
            let Ok((name, result)) = joined else {
                warn!("candidate fetch task failed to complete");
                continue;
            };
            match result {
                Ok(detail) => {
                    let snapshot = self
                        .store
                        .insert_owner_snapshot(&name, owner_snapshot(&detail));
                    index.add_owner(&name, &snapshot);
                }
                Err(e) => {
                    warn!(candidate = %name, error = %e, "skipping candidate after fetch failure");
                }
            }
        }
        index
    }

    async fn cached_owner_snapshot(
        &self,
        owner_name: &str,
    ) -> Result<Arc<InventorySnapshot>, InsightError> {
        if let Some(snapshot) = self.store.owner_snapshot(owner_name) {
            return Ok(snapshot);
        }
        let detail = self.source.owner_detail(owner_name).await?;
        Ok(self
            .store
            .insert_owner_snapshot(owner_name, owner_snapshot(&detail)))
    }

    async fn cached_assembly_detail(
        &self,
        assembly_id: &str,
    ) -> Result<Arc<AssemblyDetail>, InsightError> {
        if let Some(detail) = self.store.assembly_detail(assembly_id) {
            return Ok(detail);
        }
        let detail = self.source.assembly_detail(assembly_id).await?;
        Ok(self.store.insert_assembly_detail(Arc::new(detail)))
    }

    fn cached_requirements(&self, detail: &AssemblyDetail) -> Arc<InventorySnapshot> {
        if let Some(required) = self.store.requirements(&detail.id) {
            return required;
        }
        self.store
            .insert_requirements(&detail.id, requirements_of(detail))
    }
}

fn ensure_not_blank(value: &str, what: &str) -> Result<(), InsightError> {
    if value.trim().is_empty() {
        return Err(InsightError::InvalidArgument(format!("{what} must not be blank")));
    }
    Ok(())
}
