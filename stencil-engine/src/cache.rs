//! Template cache storages.
//!
//! The template loader owns lookup and freshness; a storage only keeps
//! built templates by key. Implementations must be thread-safe.

use crate::template::Template;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub trait CacheStorage: Debug + Send + Sync {
    /// Setting value that selects this storage kind, e.g. `strong`.
    fn name(&self) -> &'static str;

    fn get(&self, key: &str) -> Option<Arc<Template>>;

    fn put(&self, key: String, template: Arc<Template>);

    fn remove(&self, key: &str);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// STRONG STORAGE
// ============================================================================

/// Unbounded storage that never drops entries on its own.
#[derive(Debug, Default)]
pub struct StrongCacheStorage {
    entries: RwLock<HashMap<String, Arc<Template>>>,
}

impl StrongCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for StrongCacheStorage {
    fn name(&self) -> &'static str {
        "strong"
    }

    fn get(&self, key: &str) -> Option<Arc<Template>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn put(&self, key: String, template: Arc<Template>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, template);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// ============================================================================
// MRU STORAGE
// ============================================================================

#[derive(Debug, Default)]
struct MruState {
    /// Template and the tick of its last use.
    entries: HashMap<String, (Arc<Template>, u64)>,
    /// Keys by last-use tick; the first entry is the least recently used.
    recency: BTreeMap<u64, String>,
    next_tick: u64,
}

impl MruState {
    fn tick(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }

    fn get(&mut self, key: &str) -> Option<Arc<Template>> {
        let tick = self.tick();
        let (template, last_used) = self.entries.get_mut(key)?;
        let previous = std::mem::replace(last_used, tick);
        let template = Arc::clone(template);
        if let Some(k) = self.recency.remove(&previous) {
            self.recency.insert(tick, k);
        }
        Some(template)
    }

    fn put(&mut self, key: String, template: Arc<Template>) {
        let tick = self.tick();
        if let Some((_, previous)) = self.entries.insert(key.clone(), (template, tick)) {
            self.recency.remove(&previous);
        }
        self.recency.insert(tick, key);
    }

    fn evict_least_recently_used(&mut self) -> Option<String> {
        let (_, key) = self.recency.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }

    fn remove(&mut self, key: &str) {
        if let Some((_, tick)) = self.entries.remove(key) {
            self.recency.remove(&tick);
        }
    }
}

/// Storage that keeps at most `max_entries` most recently used templates.
#[derive(Debug)]
pub struct MruCacheStorage {
    max_entries: usize,
    state: Mutex<MruState>,
}

impl MruCacheStorage {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            state: Mutex::new(MruState::default()),
        }
    }

    /// Storage without an upper bound.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl CacheStorage for MruCacheStorage {
    fn name(&self) -> &'static str {
        "mru"
    }

    fn get(&self, key: &str) -> Option<Arc<Template>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.get(key)
    }

    fn put(&self, key: String, template: Arc<Template>) {
        if self.max_entries == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.put(key, template);
        while state.entries.len() > self.max_entries {
            match state.evict_least_recently_used() {
                Some(evicted) => {
                    tracing::trace!(key = %evicted, "Evicted template from MRU cache storage");
                }
                None => break,
            }
        }
    }

    fn remove(&self, key: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.remove(key);
    }

    fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
        state.recency.clear();
    }

    fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

/// Parse a `cache_storage` setting value: `strong`, `mru`, or `mru:<max entries>`.
pub fn cache_storage_from_setting(value: &str) -> Result<Arc<dyn CacheStorage>, String> {
    let value = value.trim();
    let (kind, arg) = match value.split_once(':') {
        Some((kind, arg)) => (kind.trim(), Some(arg.trim())),
        None => (value, None),
    };
    match (kind.to_ascii_lowercase().as_str(), arg) {
        ("strong", None) => Ok(Arc::new(StrongCacheStorage::new())),
        ("mru", None) => Ok(Arc::new(MruCacheStorage::unbounded())),
        ("mru", Some(arg)) => arg
            .parse::<usize>()
            .map(|max| Arc::new(MruCacheStorage::new(max)) as Arc<dyn CacheStorage>)
            .map_err(|_| "MRU capacity must be a non-negative integer".to_string()),
        ("strong", Some(_)) => Err("strong cache storage takes no capacity".to_string()),
        _ => Err("expected \"strong\", \"mru\" or \"mru:<max entries>\"".to_string()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
