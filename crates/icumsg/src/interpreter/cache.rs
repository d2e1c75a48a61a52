//! Memoized construction of locale formatters.
//!
//! Building a formatter can be expensive, and messages are often formatted
//! many times with the same locale and style. [`FormatterCache`] keys each
//! formatter on its serialized `(kind, locale, options)` and hands out shared
//! handles. The backing [`CacheStore`] decides the eviction policy.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::intl::{
    BasicIntl, DateTimeFormat, DateTimeFormatOptions, IntlProvider, NumberFormat,
    NumberFormatOptions, PluralRulesOptions, PluralSelector,
};

/// Minimal key-value contract for a cache backing store.
pub trait CacheStore<V>: Send {
    fn has(&self, key: &str) -> bool;

    /// Takes `&mut self` so stores can track recency on reads.
    fn get(&mut self, key: &str) -> Option<V>;

    fn set(&mut self, key: String, value: V);
}

/// Keeps every entry for the life of the store.
#[derive(Debug)]
pub struct UnboundedStore<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for UnboundedStore<V> {
    fn default() -> Self {
        UnboundedStore {
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone + Send> CacheStore<V> for UnboundedStore<V> {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }
}

/// Holds at most `capacity` entries, evicting the least recently used.
#[derive(Debug)]
pub struct LruStore<V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<String, (V, u64)>,
    /// Last-use tick to key, oldest first.
    recency: BTreeMap<u64, String>,
}

impl<V> LruStore<V> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        LruStore {
            capacity: capacity.max(1),
            tick: 0,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: &str) {
        self.tick += 1;
        let tick = self.tick;
        if let Some((_, used)) = self.entries.get_mut(key) {
            self.recency.remove(used);
            *used = tick;
            self.recency.insert(tick, key.to_string());
        }
    }
}

impl<V: Clone + Send> CacheStore<V> for LruStore<V> {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Option<V> {
        self.touch(key);
        self.entries.get(key).map(|(value, _)| value.clone())
    }

    fn set(&mut self, key: String, value: V) {
        if let Some((old, _)) = self.entries.get_mut(&key) {
            *old = value;
            self.touch(&key);
            return;
        }
        if self.entries.len() >= self.capacity {
            if let Some((_, oldest)) = self.recency.pop_first() {
                self.entries.remove(&oldest);
            }
        }
        self.tick += 1;
        self.recency.insert(self.tick, key.clone());
        self.entries.insert(key, (value, self.tick));
    }
}

type Store<V> = Mutex<Box<dyn CacheStore<V>>>;

/// Shared, thread-safe memo of number, date/time, and plural formatters.
///
/// A miss builds the formatter outside the lock, so two threads missing the
/// same key may both build it; the second insert simply replaces the first.
pub struct FormatterCache {
    provider: Arc<dyn IntlProvider>,
    numbers: Store<Arc<dyn NumberFormat>>,
    date_times: Store<Arc<dyn DateTimeFormat>>,
    plurals: Store<Option<Arc<dyn PluralSelector>>>,
}

impl FormatterCache {
    /// Unbounded cache over the built-in provider.
    pub fn new() -> Self {
        FormatterCache::with_provider(Arc::new(BasicIntl))
    }

    /// Unbounded cache over a custom provider.
    pub fn with_provider(provider: Arc<dyn IntlProvider>) -> Self {
        FormatterCache::with_stores(
            provider,
            UnboundedStore::default(),
            UnboundedStore::default(),
            UnboundedStore::default(),
        )
    }

    /// Cache holding at most `capacity` formatters of each kind.
    pub fn bounded(provider: Arc<dyn IntlProvider>, capacity: usize) -> Self {
        FormatterCache::with_stores(
            provider,
            LruStore::new(capacity),
            LruStore::new(capacity),
            LruStore::new(capacity),
        )
    }

    /// Cache over caller-supplied backing stores.
    pub fn with_stores(
        provider: Arc<dyn IntlProvider>,
        numbers: impl CacheStore<Arc<dyn NumberFormat>> + 'static,
        date_times: impl CacheStore<Arc<dyn DateTimeFormat>> + 'static,
        plurals: impl CacheStore<Option<Arc<dyn PluralSelector>>> + 'static,
    ) -> Self {
        FormatterCache {
            provider,
            numbers: Mutex::new(Box::new(numbers)),
            date_times: Mutex::new(Box::new(date_times)),
            plurals: Mutex::new(Box::new(plurals)),
        }
    }

    pub fn number_format(&self, locale: &str, options: &NumberFormatOptions) -> Arc<dyn NumberFormat> {
        memoize(&self.numbers, cache_key("number", locale, options), || {
            self.provider.number_format(locale, options)
        })
    }

    pub fn date_time_format(
        &self,
        locale: &str,
        options: &DateTimeFormatOptions,
    ) -> Arc<dyn DateTimeFormat> {
        memoize(&self.date_times, cache_key("dateTime", locale, options), || {
            self.provider.date_time_format(locale, options)
        })
    }

    /// `None` when the provider has no plural rules; that answer is cached too.
    pub fn plural_rules(
        &self,
        locale: &str,
        options: &PluralRulesOptions,
    ) -> Option<Arc<dyn PluralSelector>> {
        memoize(&self.plurals, cache_key("plural", locale, options), || {
            self.provider.plural_rules(locale, options)
        })
    }
}

impl Default for FormatterCache {
    fn default() -> Self {
        FormatterCache::new()
    }
}

impl Debug for FormatterCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FormatterCache").finish_non_exhaustive()
    }
}

fn cache_key(kind: &str, locale: &str, options: &impl Serialize) -> String {
    serde_json::to_string(&(kind, locale, options)).unwrap_or_else(|_| format!("{kind}:{locale}"))
}

fn memoize<V: Clone>(store: &Store<V>, key: String, build: impl FnOnce() -> V) -> V {
    if let Some(hit) = lock(store).get(&key) {
        return hit;
    }
    tracing::trace!(%key, "formatter cache miss");
    let value = build();
    lock(store).set(key, value.clone());
    value
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut store = LruStore::new(2);
        store.set("a".to_string(), 1);
        store.set("b".to_string(), 2);
        assert_eq!(store.get("a"), Some(1));
        store.set("c".to_string(), 3);
        assert!(store.has("a"));
        assert!(!store.has("b"));
        assert!(store.has("c"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lru_overwrite_keeps_size() {
        let mut store = LruStore::new(1);
        store.set("a".to_string(), 1);
        store.set("a".to_string(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(2));
    }

    #[test]
    fn keys_distinguish_kind_locale_and_options() {
        let options = NumberFormatOptions::default();
        assert_ne!(cache_key("number", "en", &options), cache_key("number", "fr", &options));
        assert_ne!(
            cache_key("number", "en", &options),
            cache_key("dateTime", "en", &DateTimeFormatOptions::default())
        );
    }

    #[test]
    fn same_options_return_same_handle() {
        let cache = FormatterCache::new();
        let options = NumberFormatOptions::default();
        let first = cache.number_format("en", &options);
        let second = cache.number_format("en", &options);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
