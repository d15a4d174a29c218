use std::collections::BTreeSet;
use std::rc::Rc;

use anyhow::Context;
use image::DynamicImage;
use indexmap::IndexMap;

/// Resident size of a cached payload, in bytes.
pub trait Weigh {
    fn weight(&self) -> u64;
}

impl Weigh for DynamicImage {
    fn weight(&self) -> u64 {
        (self.as_bytes().len() + std::mem::size_of::<DynamicImage>()) as u64
    }
}

impl Weigh for Vec<u8> {
    fn weight(&self) -> u64 {
        self.len() as u64
    }
}

/// Produces the payload for a key on a cache miss.
pub trait Loader<A> {
    fn load(&mut self, key: &str) -> anyhow::Result<A>;
}

impl<A, F> Loader<A> for F
where
    F: FnMut(&str) -> anyhow::Result<A>,
{
    fn load(&mut self, key: &str) -> anyhow::Result<A> {
        self(key)
    }
}

/// Decodes image files from disk; the key is the file path.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImageLoader;

impl Loader<DynamicImage> for ImageLoader {
    fn load(&mut self, key: &str) -> anyhow::Result<DynamicImage> {
        image::open(key).with_context(|| format!("failed to load image '{key}'"))
    }
}

struct CacheEntry<A> {
    payload: Rc<A>,
    size: u64,
}

/// Byte-budgeted least-recently-used cache.
///
/// Invariant: the sizes of resident entries never sum past `capacity` once a
/// call returns. Entries leave only through eviction or when the cache is
/// dropped; there is no manual invalidation.
///
/// Single-threaded by construction (`Rc` payloads). Callers sharing a cache
/// across threads need their own locking around [`get`](Self::get).
pub struct AssetCache<A, L> {
    capacity: u64,
    available: u64,
    // Recency order: index 0 is least recently used.
    entries: IndexMap<String, CacheEntry<A>>,
    loader: L,
}

/// Cache of decoded images keyed by file path.
pub type ImageCache = AssetCache<DynamicImage, ImageLoader>;

impl ImageCache {
    pub fn images(capacity: u64) -> Self {
        Self::with_loader(capacity, ImageLoader)
    }
}

impl<A, L> AssetCache<A, L>
where
    A: Weigh,
    L: Loader<A>,
{
    pub fn with_loader(capacity: u64, loader: L) -> Self {
        Self { capacity, available: capacity, entries: IndexMap::new(), loader }
    }

    /// Returns the payload for `key`, loading it on a miss.
    ///
    /// A hit marks the entry most recently used. A miss loads the resource,
    /// then evicts least recently used entries one at a time until the new
    /// entry fits. Load failures propagate unchanged and leave the cache
    /// untouched.
    ///
    /// A payload larger than the whole capacity is returned without being
    /// cached, and nothing is evicted for it.
    pub fn get(&mut self, key: &str) -> anyhow::Result<Rc<A>> {
        if let Some(entry) = self.entries.shift_remove(key) {
            let payload = entry.payload.clone();
            self.entries.insert(key.to_string(), entry);
            return Ok(payload);
        }

        let payload = Rc::new(self.loader.load(key)?);
        let size = payload.weight();
        log::debug!("asset cache miss for '{key}' ({size} bytes)");

        if size > self.capacity {
            log::warn!(
                "asset '{key}' ({size} bytes) exceeds cache capacity of {} bytes; not cached",
                self.capacity
            );
            return Ok(payload);
        }

        while self.available < size {
            let Some((evicted, entry)) = self.entries.shift_remove_index(0) else {
                break;
            };
            self.available += entry.size;
            log::debug!("evicted '{evicted}' ({} bytes)", entry.size);
        }

        self.available -= size;
        self.entries.insert(key.to_string(), CacheEntry { payload: payload.clone(), size });
        Ok(payload)
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Bytes still free before the next miss has to evict.
    pub fn available(&self) -> u64 {
        self.available
    }

    /// Total bytes of resident entries.
    pub fn storage_use(&self) -> u64 {
        self.entries.values().map(|entry| entry.size).sum()
    }

    /// Resident keys, least recently used first.
    pub fn lru_keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Resident keys as a set.
    pub fn storage_keys(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Loader producing blobs whose size is encoded in the key (`"a:6"`),
    /// recording every load.
    fn blob_cache(capacity: u64) -> (AssetCache<Vec<u8>, impl Loader<Vec<u8>>>, Rc<RefCell<Vec<String>>>) {
        let loads = Rc::new(RefCell::new(Vec::new()));
        let log = loads.clone();
        let loader = move |key: &str| -> anyhow::Result<Vec<u8>> {
            log.borrow_mut().push(key.to_string());
            let (_, size) = key.split_once(':').context("key without size")?;
            Ok(vec![0u8; size.parse()?])
        };
        (AssetCache::with_loader(capacity, loader), loads)
    }

    fn set<'a>(keys: &[&'a str]) -> BTreeSet<&'a str> {
        keys.iter().copied().collect()
    }

    // ── eviction ──────────────────────────────────────────────────────────

    #[test]
    fn second_insert_evicts_first_when_full() {
        let (mut cache, _) = blob_cache(10);
        cache.get("a:6").unwrap();
        cache.get("b:6").unwrap();

        assert_eq!(cache.storage_keys(), set(&["b:6"]));
        assert_eq!(cache.storage_use(), 6);
    }

    #[test]
    fn reloading_evicted_key_evicts_the_other() {
        let (mut cache, loads) = blob_cache(10);
        cache.get("a:6").unwrap();
        cache.get("b:6").unwrap();
        cache.get("a:6").unwrap();

        assert_eq!(cache.storage_keys(), set(&["a:6"]));
        assert_eq!(*loads.borrow(), vec!["a:6", "b:6", "a:6"]);
    }

    #[test]
    fn hit_does_not_reload_and_returns_same_payload() {
        let (mut cache, loads) = blob_cache(10);
        let first = cache.get("a:4").unwrap();
        let second = cache.get("a:4").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(loads.borrow().len(), 1);
    }

    #[test]
    fn hit_refreshes_recency() {
        let (mut cache, _) = blob_cache(10);
        cache.get("a:3").unwrap();
        cache.get("b:3").unwrap();
        cache.get("c:3").unwrap();
        assert_eq!(cache.lru_keys(), vec!["a:3", "b:3", "c:3"]);

        cache.get("a:3").unwrap();
        assert_eq!(cache.lru_keys(), vec!["b:3", "c:3", "a:3"]);

        // "b" is now least recently used and goes first.
        cache.get("d:3").unwrap();
        assert_eq!(cache.lru_keys(), vec!["c:3", "a:3", "d:3"]);
    }

    #[test]
    fn evicts_as_many_entries_as_needed() {
        let (mut cache, _) = blob_cache(10);
        cache.get("a:3").unwrap();
        cache.get("b:3").unwrap();
        cache.get("c:3").unwrap();
        cache.get("big:8").unwrap();

        assert_eq!(cache.lru_keys(), vec!["big:8"]);
        assert_eq!(cache.available(), 2);
    }

    #[test]
    fn usage_never_exceeds_capacity() {
        let (mut cache, _) = blob_cache(16);
        for (i, size) in [5, 7, 3, 9, 1, 16, 2, 8].into_iter().enumerate() {
            cache.get(&format!("k{i}:{size}")).unwrap();
            assert!(cache.storage_use() <= cache.capacity());
            assert_eq!(cache.storage_use() + cache.available(), cache.capacity());
        }
    }

    // ── edge cases ────────────────────────────────────────────────────────

    #[test]
    fn oversized_payload_is_returned_but_not_cached() {
        let (mut cache, _) = blob_cache(10);
        cache.get("a:4").unwrap();
        let huge = cache.get("huge:11").unwrap();

        assert_eq!(huge.len(), 11);
        assert_eq!(cache.storage_keys(), set(&["a:4"]));
        assert_eq!(cache.available(), 6);
    }

    #[test]
    fn load_failure_propagates_and_leaves_cache_untouched() {
        let (mut cache, _) = blob_cache(10);
        cache.get("a:4").unwrap();
        assert!(cache.get("no-size").is_err());
        assert_eq!(cache.lru_keys(), vec!["a:4"]);
        assert_eq!(cache.available(), 6);
    }

    #[test]
    fn missing_image_file_reports_path() {
        let mut cache = ImageCache::images(1024);
        let err = cache.get("/definitely/not/here.png").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.png"));
        assert!(cache.is_empty());
    }
}
