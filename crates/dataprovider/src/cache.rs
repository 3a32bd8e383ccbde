//! Process-wide cache of loaded provider data.
//!
//! Providers with caching enabled are invoked once per key; later loads share
//! the stored [`Arc`]. The lock is not held while a provider runs, so a
//! provider may itself expand other providers.

use std::sync::{Arc, LazyLock, Mutex};

use hashbrown::HashMap;

use crate::convert::ProviderData;

static CACHE: LazyLock<Mutex<HashMap<String, Arc<ProviderData>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[cfg(any(test, feature = "diagnostics"))]
mod diagnostics {
    use std::sync::{LazyLock, Mutex};
    use std::thread;

    use hashbrown::HashMap;

    static COUNTERS: LazyLock<Mutex<HashMap<thread::ThreadId, usize>>> =
        LazyLock::new(|| Mutex::new(HashMap::new()));

    pub(super) fn record_miss() {
        let mut map = COUNTERS
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *map.entry(thread::current().id()).or_insert(0) += 1;
    }

    pub(super) fn count() -> usize {
        COUNTERS
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&thread::current().id())
            .copied()
            .unwrap_or(0)
    }

    pub(super) fn reset() {
        COUNTERS
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&thread::current().id());
    }
}

#[inline]
fn record_cache_miss() {
    #[cfg(any(test, feature = "diagnostics"))]
    diagnostics::record_miss();
}

/// Return the number of cache misses observed by the current thread. Available
/// in tests and when the `diagnostics` feature is enabled.
#[cfg(any(test, feature = "diagnostics"))]
#[must_use]
pub fn cache_miss_count() -> usize {
    diagnostics::count()
}

/// Reset the cache miss counter for the current thread. Available in tests and
/// when the `diagnostics` feature is enabled.
#[cfg(any(test, feature = "diagnostics"))]
pub fn reset_cache_miss_count() {
    diagnostics::reset();
}

/// Return the data stored under `key`, running `load` on a miss.
///
/// When two threads miss concurrently both run `load`; the first result
/// stored wins and is returned to both.
pub(crate) fn load_cached<F>(key: &str, load: F) -> Arc<ProviderData>
where
    F: FnOnce() -> ProviderData,
{
    let hit = CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(key)
        .map(Arc::clone);
    if let Some(data) = hit {
        log::trace!("provider cache hit for `{key}`");
        return data;
    }
    log::trace!("provider cache miss for `{key}`");
    record_cache_miss();
    let loaded = Arc::new(load());
    let mut cache = CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    Arc::clone(cache.entry(key.to_owned()).or_insert(loaded))
}

/// Drop every cached provider result.
pub fn clear_provider_cache() {
    CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clear();
}

/// Number of provider results currently cached.
#[must_use]
pub fn cached_provider_count() -> usize {
    CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .len()
}
