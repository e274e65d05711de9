//! Snapshot and assembly-detail caching.
//!
//! All lookups go through the [`CatalogueStore`] capability trait so the
//! storage backend can be swapped without touching the evaluation flow.
//! [`MemoryStore`] is the in-process variant: per-kind LRU maps, bounded so
//! a long-running process cannot grow without limit. Inserts keep the
//! winner on a race; recomputing a snapshot is a pure function of upstream
//! data, so a discarded duplicate costs nothing but the work already done.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::{info, warn};

use catalogue_engine::InventorySnapshot;
use catalogue_types::AssemblyDetail;

/// Store for computed snapshots and fetched assembly details, one accessor
/// pair per result kind.
pub trait CatalogueStore: Send + Sync {
    fn owner_snapshot(&self, owner_name: &str) -> Option<Arc<InventorySnapshot>>;

    /// Insert if absent; returns the stored value (the existing one on a race).
    fn insert_owner_snapshot(
        &self,
        owner_name: &str,
        snapshot: Arc<InventorySnapshot>,
    ) -> Arc<InventorySnapshot>;

    fn requirements(&self, assembly_id: &str) -> Option<Arc<InventorySnapshot>>;

    fn insert_requirements(
        &self,
        assembly_id: &str,
        snapshot: Arc<InventorySnapshot>,
    ) -> Arc<InventorySnapshot>;

    fn assembly_detail(&self, assembly_id: &str) -> Option<Arc<AssemblyDetail>>;

    fn insert_assembly_detail(&self, detail: Arc<AssemblyDetail>) -> Arc<AssemblyDetail>;
}

/// In-process store: bounded LRU map per result kind.
pub struct MemoryStore {
    owner_snapshots: Mutex<LruCache<String, Arc<InventorySnapshot>>>,
    requirements: Mutex<LruCache<String, Arc<InventorySnapshot>>>,
    assembly_details: Mutex<LruCache<String, Arc<AssemblyDetail>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl MemoryStore {
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Create a store holding at most `capacity` entries per kind.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            owner_snapshots: Mutex::new(LruCache::new(capacity)),
            requirements: Mutex::new(LruCache::new(capacity)),
            assembly_details: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Create a store pre-warmed with assembly details from a JSON file
    /// (a list of assembly detail records).
    ///
    /// A missing or malformed seed file logs a warning and yields an empty,
    /// fully usable store; seeding is an optimization, not a requirement.
    pub fn with_seed_file(path: impl AsRef<Path>) -> Self {
        let store = Self::default();
        let path = path.as_ref();
        match store.load_seed(path) {
            Ok(count) => info!(path = %path.display(), count, "pre-warmed assembly details"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to load seed file"),
        }
        store
    }

    fn load_seed(&self, path: &Path) -> anyhow::Result<usize> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let details: Vec<AssemblyDetail> =
            serde_json::from_str(&text).context("decoding seed file")?;
        let count = details.len();
        for detail in details {
            self.insert_assembly_detail(Arc::new(detail));
        }
        Ok(count)
    }
}

fn get<V: Clone>(cache: &Mutex<LruCache<String, V>>, key: &str) -> Option<V> {
    cache.lock().get(key).cloned()
}

fn insert_if_absent<V: Clone>(cache: &Mutex<LruCache<String, V>>, key: &str, value: V) -> V {
    let mut guard = cache.lock();
    if let Some(existing) = guard.get(key) {
        return existing.clone();
    }
    guard.put(key.to_owned(), value.clone());
    value
}

impl CatalogueStore for MemoryStore {
    fn owner_snapshot(&self, owner_name: &str) -> Option<Arc<InventorySnapshot>> {
        get(&self.owner_snapshots, owner_name)
    }

    fn insert_owner_snapshot(
        &self,
        owner_name: &str,
        snapshot: Arc<InventorySnapshot>,
    ) -> Arc<InventorySnapshot> {
        insert_if_absent(&self.owner_snapshots, owner_name, snapshot)
    }

    fn requirements(&self, assembly_id: &str) -> Option<Arc<InventorySnapshot>> {
        get(&self.requirements, assembly_id)
    }

    fn insert_requirements(
        &self,
        assembly_id: &str,
        snapshot: Arc<InventorySnapshot>,
    ) -> Arc<InventorySnapshot> {
        insert_if_absent(&self.requirements, assembly_id, snapshot)
    }

    fn assembly_detail(&self, assembly_id: &str) -> Option<Arc<AssemblyDetail>> {
        get(&self.assembly_details, assembly_id)
    }

    fn insert_assembly_detail(&self, detail: Arc<AssemblyDetail>) -> Arc<AssemblyDetail> {
        let id = detail.id.clone();
        insert_if_absent(&self.assembly_details, &id, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot() -> Arc<InventorySnapshot> {
        InventorySnapshot::create(
            vec![catalogue_types::PieceEntry::new("3024", "5", 1)],
            None,
        )
    }

    #[test]
    fn insert_keeps_the_first_writer() {
        let store = MemoryStore::default();
        let first = store.insert_owner_snapshot("brickfan35", snapshot());
        let second = store.insert_owner_snapshot("brickfan35", snapshot());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn capacity_bounds_evict_least_recently_used() {
        let store = MemoryStore::new(1);
        store.insert_requirements("set-1", snapshot());
        store.insert_requirements("set-2", snapshot());
        assert!(store.requirements("set-1").is_none());
        assert!(store.requirements("set-2").is_some());
    }

    #[test]
    fn seed_file_pre_warms_assembly_details() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "id": "set-1", "name": "tropical-island", "catalogNumber": "40583",
                 "totalPieceCount": 2,
                 "pieces": [{{ "part": {{ "designId": "3024", "materialId": 5, "partType": "rigid" }}, "quantity": 2 }}] }}]"#
        )
        .unwrap();

        let store = MemoryStore::with_seed_file(file.path());
        let detail = store.assembly_detail("set-1").unwrap();
        assert_eq!(detail.name, "tropical-island");
    }

    #[test]
    fn malformed_seed_file_yields_an_empty_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let store = MemoryStore::with_seed_file(file.path());
        assert!(store.assembly_detail("set-1").is_none());
        // Still usable.
        store.insert_requirements("set-1", snapshot());
        assert!(store.requirements("set-1").is_some());
    }
}
