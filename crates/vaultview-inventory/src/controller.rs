// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generic list controller — one instance per asset view. Owns the full
// in-memory record set, derives the visible slice from the active filter,
// sort, and paging state, and keeps the time-bounded cache in sync.
//
// Load protocol: `begin_load` publishes a fresh cache hit immediately,
// then the caller awaits the data source and hands the result to
// `complete_load`, which replaces the set wholesale and writes it back to
// the cache. The split exists because UI state containers cannot hold a
// mutable borrow across an await; `load` glues the two halves together
// for direct async callers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};

use vaultview_core::error::Result;
use vaultview_core::types::{FilterState, SortConfig, SortDirection};
use vaultview_store::AssetCache;

use crate::record::InventoryRecord;
use crate::source::DataSource;

/// How a view walks through its filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// The whole filtered set is visible.
    All,
    /// Fixed-size pages; page N shows rows `[(N-1)·size, N·size)`.
    Paged { page_size: usize, page: usize },
    /// Cumulative window that grows by `chunk` per `load_more` call.
    Incremental { chunk: usize, loaded: usize },
}

impl Paging {
    pub fn all() -> Self {
        Self::All
    }

    /// Fixed pages of `page_size` rows, starting on page 1.
    pub fn paged(page_size: usize) -> Self {
        Self::Paged { page_size, page: 1 }
    }

    /// Incremental window of `chunk` rows per step, starting with one
    /// chunk visible.
    pub fn incremental(chunk: usize) -> Self {
        Self::Incremental {
            chunk,
            loaded: chunk,
        }
    }

    /// Back to the first page / first window.
    fn reset(&mut self) {
        match self {
            Self::All => {}
            Self::Paged { page, .. } => *page = 1,
            Self::Incremental { chunk, loaded } => *loaded = *chunk,
        }
    }
}

/// Filter/sort/paginate/cache orchestration for one asset type.
pub struct ListController<T: InventoryRecord> {
    all: Vec<T>,
    filtered: Vec<T>,
    filter: FilterState,
    sort: SortConfig,
    paging: Paging,
    expanded: HashSet<String>,
    loading: bool,
    error: bool,
    cache: Arc<Mutex<AssetCache>>,
}

impl<T: InventoryRecord> ListController<T> {
    pub fn new(cache: Arc<Mutex<AssetCache>>, sort: SortConfig, paging: Paging) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            filter: FilterState::default(),
            sort,
            paging,
            expanded: HashSet::new(),
            loading: false,
            error: false,
            cache,
        }
    }

    // -- Loading -------------------------------------------------------------

    /// Start a load: raise the loading flag, clear any previous error, and
    /// publish a fresh cached set immediately if there is one. Returns
    /// whether the cache hit.
    pub fn begin_load(&mut self) -> bool {
        self.loading = true;
        self.error = false;

        let cached: Option<Vec<T>> = self
            .cache
            .lock()
            .expect("cache lock poisoned")
            .get(T::DATASET);

        match cached {
            Some(set) => {
                debug!(dataset = T::DATASET, count = set.len(), "published cached set");
                self.all = set;
                self.apply_filters();
                true
            }
            None => false,
        }
    }

    /// Finish a load with the data source's result. On success the fetched
    /// set replaces `all` wholesale and is written back to the cache; on
    /// failure the previous set stays in place and the error flag is
    /// raised.
    pub fn complete_load(&mut self, result: Result<Vec<T>>) {
        match result {
            Ok(set) => {
                self.all = set;
                self.apply_filters();

                let written = self
                    .cache
                    .lock()
                    .expect("cache lock poisoned")
                    .set(T::DATASET, &self.all);
                if let Err(e) = written {
                    warn!(dataset = T::DATASET, error = %e, "cache write-back failed");
                    self.error = true;
                }
            }
            Err(e) => {
                error!(dataset = T::DATASET, error = %e, "load failed");
                self.error = true;
            }
        }
        self.loading = false;
    }

    /// Cache-first load: publish a hit if fresh, then fetch from `source`
    /// unconditionally and replace the set with the result.
    pub async fn load<S: DataSource<T>>(&mut self, source: &S) {
        self.begin_load();
        let result = source.fetch_all().await;
        self.complete_load(result);
    }

    // -- Filtering and sorting -----------------------------------------------

    /// Recompute the filtered set: keep records passing every active
    /// criterion, stable-sort by the configured field, and reset paging to
    /// the first window.
    pub fn apply_filters(&mut self) {
        let mut result: Vec<T> = self
            .all
            .iter()
            .filter(|record| record.matches(&self.filter))
            .cloned()
            .collect();

        let field = self.sort.field.clone();
        let direction = self.sort.direction;
        result.sort_by(|a, b| {
            let ord = a.compare_by(&field, b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        self.filtered = result;
        self.paging.reset();
    }

    /// Replace the filter criteria and re-derive the visible slice.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.apply_filters();
    }

    /// Reselecting the current field flips the direction; a new field
    /// resets to ascending. Re-derives the visible slice either way.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
        self.apply_filters();
    }

    // -- Paging --------------------------------------------------------------

    /// Jump to `page` (fixed-page strategy only), clamped to the valid
    /// range.
    pub fn set_page(&mut self, page: usize) {
        let max_page = self.page_count().max(1);
        if let Paging::Paged { page: current, .. } = &mut self.paging {
            *current = page.clamp(1, max_page);
        }
    }

    /// Grow the incremental window by one chunk. Ignored while a load is
    /// outstanding so a scroll sentinel cannot double-step the window.
    pub fn load_more(&mut self) {
        if self.loading {
            return;
        }
        if let Paging::Incremental { chunk, loaded } = &mut self.paging {
            *loaded += *chunk;
        }
    }

    /// Whether the incremental window has not yet covered the filtered
    /// set.
    pub fn has_more(&self) -> bool {
        match self.paging {
            Paging::Incremental { loaded, .. } => loaded < self.filtered.len(),
            _ => false,
        }
    }

    /// Current page (fixed-page strategy; 1 otherwise).
    pub fn page(&self) -> usize {
        match self.paging {
            Paging::Paged { page, .. } => page,
            _ => 1,
        }
    }

    /// Number of pages in the filtered set (fixed-page strategy; 1
    /// otherwise).
    pub fn page_count(&self) -> usize {
        match self.paging {
            Paging::Paged { page_size, .. } => self.filtered.len().div_ceil(page_size),
            _ => 1,
        }
    }

    /// The slice of the filtered set the view should render.
    pub fn visible(&self) -> &[T] {
        let len = self.filtered.len();
        match self.paging {
            Paging::All => &self.filtered,
            Paging::Paged { page_size, page } => {
                let start = (page - 1) * page_size;
                let end = (start + page_size).min(len);
                &self.filtered[start.min(len)..end]
            }
            Paging::Incremental { loaded, .. } => &self.filtered[..loaded.min(len)],
        }
    }

    // -- Row expansion -------------------------------------------------------

    /// Membership toggle in the expanded-row set.
    pub fn toggle_expand(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // -- Editing -------------------------------------------------------------

    /// Replace the record with the same id in the full set, persist the
    /// whole updated set to the cache, and re-derive the visible slice.
    pub fn save_edit(&mut self, record: T) -> Result<()> {
        if let Some(slot) = self.all.iter_mut().find(|r| r.id() == record.id()) {
            *slot = record;
        }

        self.cache
            .lock()
            .expect("cache lock poisoned")
            .set(T::DATASET, &self.all)?;

        self.apply_filters();
        Ok(())
    }

    // -- State accessors -----------------------------------------------------

    pub fn all(&self) -> &[T] {
        &self.all
    }

    pub fn total_filtered(&self) -> usize {
        self.filtered.len()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> bool {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    use vaultview_core::error::VaultviewError;
    use vaultview_core::types::{SshKey, TrustLevel};
    use vaultview_store::AssetCache;

    /// Synchronous stub source — resolves immediately with a fixed set.
    struct StubSource(Vec<SshKey>);

    impl DataSource<SshKey> for StubSource {
        fn fetch_all(&self) -> impl Future<Output = Result<Vec<SshKey>>> + Send {
            let records = self.0.clone();
            async move { Ok(records) }
        }
    }

    /// Stub source that always fails.
    struct FailingSource;

    impl DataSource<SshKey> for FailingSource {
        fn fetch_all(&self) -> impl Future<Output = Result<Vec<SshKey>>> + Send {
            async { Err(VaultviewError::Fixture("ssh-keys: boom".into())) }
        }
    }

    fn ssh_key(id: &str, owner: &str, trust: TrustLevel) -> SshKey {
        SshKey {
            id: id.into(),
            key_owner: owner.into(),
            fingerprint: format!("SHA256:{id}"),
            last_used: "2026-08-01T09:00:00Z".parse().expect("timestamp"),
            trust_level: trust,
            key_type: "ed25519".into(),
            created_at: "2024-06-11T00:00:00Z".parse().expect("timestamp"),
            servers: Vec::new(),
        }
    }

    fn test_keys() -> Vec<SshKey> {
        vec![
            ssh_key("k1", "ci-deploy", TrustLevel::High),
            ssh_key("k2", "alice", TrustLevel::Medium),
            ssh_key("k3", "CI-runner", TrustLevel::Low),
            ssh_key("k4", "bob", TrustLevel::High),
            ssh_key("k5", "ci-legacy", TrustLevel::Low),
        ]
    }

    fn make_controller(paging: Paging) -> ListController<SshKey> {
        let cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory().expect("open in-memory cache"),
        ));
        ListController::new(
            cache,
            SortConfig::new("key_owner", SortDirection::Asc),
            paging,
        )
    }

    #[tokio::test]
    async fn load_publishes_and_writes_back_to_cache() {
        let ctl_cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory().expect("open in-memory cache"),
        ));
        let mut ctl = ListController::new(
            ctl_cache.clone(),
            SortConfig::new("key_owner", SortDirection::Asc),
            Paging::all(),
        );

        ctl.load(&StubSource(test_keys())).await;

        assert!(!ctl.loading());
        assert!(!ctl.error());
        assert_eq!(ctl.all().len(), 5);

        let cached: Vec<SshKey> = ctl_cache
            .lock()
            .expect("cache lock")
            .get(SshKey::DATASET)
            .expect("cache populated");
        assert_eq!(cached.len(), 5);
    }

    #[tokio::test]
    async fn cache_hit_publishes_before_the_fetch_lands() {
        let cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory().expect("open in-memory cache"),
        ));
        let seeded = vec![ssh_key("old", "cached-owner", TrustLevel::High)];
        cache
            .lock()
            .expect("cache lock")
            .set(SshKey::DATASET, &seeded)
            .expect("seed cache");

        let mut ctl: ListController<SshKey> = ListController::new(
            cache,
            SortConfig::new("key_owner", SortDirection::Asc),
            Paging::all(),
        );

        assert!(ctl.begin_load());
        assert!(ctl.loading());
        assert_eq!(ctl.visible()[0].key_owner, "cached-owner");

        // The fetch still replaces the cached set wholesale.
        ctl.complete_load(Ok(test_keys()));
        assert_eq!(ctl.all().len(), 5);
        assert!(!ctl.loading());
    }

    #[tokio::test]
    async fn failed_load_flags_error_and_keeps_previous_set() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;
        assert_eq!(ctl.all().len(), 5);

        ctl.load(&FailingSource).await;
        assert!(ctl.error());
        assert!(!ctl.loading());
        assert_eq!(ctl.all().len(), 5, "previous set must survive a failed load");

        // A retry clears the flag.
        ctl.load(&StubSource(test_keys())).await;
        assert!(!ctl.error());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring_on_owner() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;

        ctl.set_filter(FilterState {
            search: Some("ci-".into()),
            ..FilterState::default()
        });

        // Default sort (owner, ascending, case-insensitive) applies too.
        let owners: Vec<_> = ctl.visible().iter().map(|k| k.key_owner.clone()).collect();
        assert_eq!(owners, vec!["ci-deploy", "ci-legacy", "CI-runner"]);
    }

    #[tokio::test]
    async fn filtering_twice_is_idempotent() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;

        let filter = FilterState {
            search: Some("ci".into()),
            ..FilterState::default()
        };
        ctl.set_filter(filter.clone());
        let first: Vec<_> = ctl.visible().to_vec();

        ctl.set_filter(filter);
        assert_eq!(ctl.visible(), &first[..]);
    }

    #[tokio::test]
    async fn sort_direction_toggle_reverses_exactly() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;

        ctl.toggle_sort("fingerprint"); // new field → ascending
        let ascending: Vec<_> = ctl.visible().iter().map(|k| k.id.clone()).collect();

        ctl.toggle_sort("fingerprint"); // same field → descending
        let descending: Vec<_> = ctl.visible().iter().map(|k| k.id.clone()).collect();

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[tokio::test]
    async fn trust_level_sorts_through_the_rank_table() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;

        ctl.toggle_sort("trust_level");
        ctl.toggle_sort("trust_level"); // descending: high first

        let ranks: Vec<_> = ctl
            .visible()
            .iter()
            .map(|k| k.trust_level.rank())
            .collect();
        let mut expected = ranks.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ranks, expected);
        assert_eq!(ctl.visible()[0].trust_level, TrustLevel::High);
    }

    #[tokio::test]
    async fn pages_concatenate_to_the_whole_filtered_set() {
        for page_size in [1, 2, 3, 7] {
            let mut ctl = make_controller(Paging::paged(page_size));
            ctl.load(&StubSource(test_keys())).await;

            let mut gathered = Vec::new();
            for page in 1..=ctl.page_count() {
                ctl.set_page(page);
                gathered.extend(ctl.visible().iter().map(|k| k.id.clone()));
            }

            let expected: Vec<_> = {
                let mut all = ctl.all().to_vec();
                all.sort_by(|a, b| a.compare_by("key_owner", b));
                all.iter().map(|k| k.id.clone()).collect()
            };
            assert_eq!(gathered, expected, "page size {page_size}");
        }
    }

    #[tokio::test]
    async fn set_page_clamps_to_valid_range() {
        let mut ctl = make_controller(Paging::paged(2));
        ctl.load(&StubSource(test_keys())).await;
        assert_eq!(ctl.page_count(), 3);

        ctl.set_page(99);
        assert_eq!(ctl.page(), 3);
        ctl.set_page(0);
        assert_eq!(ctl.page(), 1);
    }

    #[tokio::test]
    async fn incremental_window_terminates_exactly_at_the_set_size() {
        let mut ctl = make_controller(Paging::incremental(2));
        ctl.load(&StubSource(test_keys())).await;

        assert_eq!(ctl.visible().len(), 2);
        assert!(ctl.has_more());

        ctl.load_more();
        assert_eq!(ctl.visible().len(), 4);
        assert!(ctl.has_more());

        ctl.load_more();
        assert_eq!(ctl.visible().len(), 5);
        assert!(!ctl.has_more());
    }

    #[tokio::test]
    async fn load_more_is_ignored_while_loading() {
        let mut ctl = make_controller(Paging::incremental(2));
        ctl.load(&StubSource(test_keys())).await;

        ctl.begin_load();
        ctl.load_more();
        ctl.complete_load(Ok(test_keys()));

        assert_eq!(ctl.visible().len(), 2, "window must not grow mid-load");
    }

    #[tokio::test]
    async fn refiltering_resets_paging_to_the_first_window() {
        let mut ctl = make_controller(Paging::paged(2));
        ctl.load(&StubSource(test_keys())).await;

        ctl.set_page(3);
        assert_eq!(ctl.page(), 3);

        ctl.set_filter(FilterState::default());
        assert_eq!(ctl.page(), 1);
    }

    #[tokio::test]
    async fn expand_is_a_membership_toggle() {
        let mut ctl = make_controller(Paging::all());
        ctl.load(&StubSource(test_keys())).await;

        assert!(!ctl.is_expanded("k1"));
        ctl.toggle_expand("k1");
        assert!(ctl.is_expanded("k1"));
        ctl.toggle_expand("k1");
        assert!(!ctl.is_expanded("k1"));
    }

    #[tokio::test]
    async fn save_edit_updates_exactly_one_record_in_the_persisted_set() {
        let cache = Arc::new(Mutex::new(
            AssetCache::open_in_memory().expect("open in-memory cache"),
        ));
        let mut ctl = ListController::new(
            cache.clone(),
            SortConfig::new("key_owner", SortDirection::Asc),
            Paging::all(),
        );
        ctl.load(&StubSource(test_keys())).await;

        let mut edited = ctl.all().iter().find(|k| k.id == "k2").cloned().expect("k2");
        edited.key_owner = "alice.maintained".into();
        ctl.save_edit(edited).expect("save edit");

        let persisted: Vec<SshKey> = cache
            .lock()
            .expect("cache lock")
            .get(SshKey::DATASET)
            .expect("cache populated");

        let originals = test_keys();
        assert_eq!(persisted.len(), originals.len());
        for original in &originals {
            let stored = persisted
                .iter()
                .find(|k| k.id == original.id)
                .expect("record kept");
            if original.id == "k2" {
                assert_eq!(stored.key_owner, "alice.maintained");
            } else {
                assert_eq!(stored, original, "untouched record must be unchanged");
            }
        }
    }
}
