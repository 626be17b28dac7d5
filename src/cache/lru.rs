//! Fixed-capacity LRU cache of owned tracks.
//!
//! The cache owns every track it holds, keyed by title. Recency is a
//! strict total order driven by a monotonic stamp counter: every `get`
//! hit and every `put` promotes its key to most-recently-used, and
//! overflow evicts the exact least-recently-used entry. A lazy recency
//! queue (stale stamps are skipped on eviction and compacted
//! periodically) keeps both touch and evict O(1) amortized.

use std::collections::{HashMap, VecDeque};

use log::{info, warn};

use crate::types::{AudioTrack, BoxedTrack};

/// Compact the recency queue when it grows past this many stale slots
/// per live entry.
const COMPACT_FACTOR: usize = 4;

/// A cached track with its last-touch stamp.
struct CacheEntry {
    track: BoxedTrack,
    last_used: u64,
}

/// One line of the read-only cache status enumeration.
///
/// Rank 0 is the most recently used entry. Display only; nothing in the
/// crate makes decisions based on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatusLine {
    pub title: String,
    pub rank: usize,
}

/// Bounded LRU cache of owned tracks, keyed by title.
pub struct LruCache {
    capacity: usize,
    entries: HashMap<String, CacheEntry>,
    /// (stamp, key) pairs, oldest first. A pair is live only while the
    /// keyed entry's `last_used` still equals the stamp.
    recency: VecDeque<(u64, String)>,
    clock: u64,
}

impl LruCache {
    /// Creates a cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            recency: VecDeque::new(),
            clock: 0,
        }
    }

    /// Maximum number of entries the cache may hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of cached tracks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership test. Does not affect recency.
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Returns the cached track for `title`, promoting it to
    /// most-recently-used on a hit.
    ///
    /// The returned borrow is into cache-owned storage; callers wanting
    /// an owned track go through the controller's `fetch_copy`.
    pub fn get(&mut self, title: &str) -> Option<&dyn AudioTrack> {
        if !self.entries.contains_key(title) {
            return None;
        }
        self.touch(title);
        self.entries.get(title).map(|entry| entry.track.as_ref())
    }

    /// Inserts a track under its title, returning true if the insert
    /// evicted an entry.
    ///
    /// A put on an already-cached title replaces the owned track and
    /// promotes it: that is a refresh, not a capacity event, so it
    /// reports no eviction. With capacity 0 the track is rejected
    /// outright and reported as evicted-without-insert.
    pub fn put(&mut self, track: BoxedTrack) -> bool {
        let title = track.title().to_string();

        if self.capacity == 0 {
            warn!("Cache capacity is 0, rejecting \"{}\"", title);
            return true;
        }

        if let Some(entry) = self.entries.get_mut(&title) {
            entry.track = track;
            self.touch(&title);
            return false;
        }

        let mut evicted = false;
        if self.entries.len() == self.capacity {
            if let Some(old_title) = self.evict_lru() {
                info!("Evicted \"{}\" to make room for \"{}\"", old_title, title);
                evicted = true;
            }
        }

        self.entries.insert(
            title.clone(),
            CacheEntry {
                track,
                last_used: self.clock,
            },
        );
        self.touch(&title);
        evicted
    }

    /// Shrinks or grows the capacity bound.
    ///
    /// Shrinking below the current size evicts least-recently-used
    /// entries, oldest first, until the cache fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > self.capacity {
            if let Some(title) = self.evict_lru() {
                info!("Evicted \"{}\" during capacity shrink", title);
            }
        }
    }

    /// Read-only recency enumeration, most recently used first.
    pub fn status(&self) -> Vec<CacheStatusLine> {
        let mut order: Vec<(&String, u64)> = self
            .entries
            .iter()
            .map(|(title, entry)| (title, entry.last_used))
            .collect();
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order
            .into_iter()
            .enumerate()
            .map(|(rank, (title, _))| CacheStatusLine {
                title: title.clone(),
                rank,
            })
            .collect()
    }

    /// Removes and drops the least-recently-used entry, returning its
    /// title.
    fn evict_lru(&mut self) -> Option<String> {
        while let Some((stamp, title)) = self.recency.pop_front() {
            let is_live = self
                .entries
                .get(&title)
                .is_some_and(|entry| entry.last_used == stamp);
            if is_live {
                self.entries.remove(&title);
                return Some(title);
            }
        }
        None
    }

    /// Promotes `title` to most-recently-used.
    fn touch(&mut self, title: &str) {
        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(title) {
            entry.last_used = self.clock;
            self.recency.push_back((self.clock, title.to_string()));
        }
        if self.recency.len() > COMPACT_FACTOR * self.entries.len().max(8) {
            self.compact();
        }
    }

    /// Drops stale recency slots, preserving order of live ones.
    fn compact(&mut self) {
        let entries = &self.entries;
        self.recency.retain(|(stamp, title)| {
            entries
                .get(title)
                .is_some_and(|entry| entry.last_used == *stamp)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mp3Track;

    fn make_track(title: &str) -> BoxedTrack {
        Box::new(Mp3Track::new(
            title,
            vec!["Artist".to_string()],
            100,
            120,
            320,
            false,
        ))
    }

    fn make_track_with_bpm(title: &str, bpm: u32) -> BoxedTrack {
        Box::new(Mp3Track::new(title, vec![], 100, bpm, 320, false))
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = LruCache::new(4);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn put_and_get() {
        let mut cache = LruCache::new(4);

        let evicted = cache.put(make_track("First"));
        assert!(!evicted);
        assert!(cache.contains("First"));
        assert_eq!(cache.len(), 1);

        let track = cache.get("First").unwrap();
        assert_eq!(track.title(), "First");
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let mut cache = LruCache::new(4);
        assert!(cache.get("nothing").is_none());
    }

    #[test]
    fn lru_order_with_touch_promotion() {
        let mut cache = LruCache::new(2);

        assert!(!cache.put(make_track("A")));
        assert!(!cache.put(make_track("B")));

        // Touch A so B becomes the LRU entry
        assert!(cache.get("A").is_some());

        assert!(cache.put(make_track("C")));
        assert!(!cache.contains("B"));
        assert!(cache.contains("A"));
        assert!(cache.contains("C"));

        // Touch C, then D must evict A
        assert!(cache.get("C").is_some());
        assert!(cache.put(make_track("D")));
        assert!(!cache.contains("A"));
        assert!(cache.contains("C"));
        assert!(cache.contains("D"));
    }

    #[test]
    fn put_existing_key_is_refresh_not_eviction() {
        let mut cache = LruCache::new(2);
        cache.put(make_track_with_bpm("A", 120));
        cache.put(make_track("B"));

        // Cache is full; replacing A must not evict anything
        let evicted = cache.put(make_track_with_bpm("A", 140));
        assert!(!evicted);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("A").unwrap().bpm(), 140);
    }

    #[test]
    fn refresh_promotes_to_mru() {
        let mut cache = LruCache::new(2);
        cache.put(make_track("A"));
        cache.put(make_track("B"));

        // Refreshing A makes B the LRU entry
        cache.put(make_track("A"));
        assert!(cache.put(make_track("C")));
        assert!(cache.contains("A"));
        assert!(!cache.contains("B"));
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut cache = LruCache::new(3);
        for i in 0..10 {
            cache.put(make_track(&format!("Track {}", i)));
            assert!(cache.len() <= 3);
        }
    }

    #[test]
    fn keys_stay_unique() {
        let mut cache = LruCache::new(4);
        cache.put(make_track("Same"));
        cache.put(make_track("Same"));
        cache.put(make_track("Same"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn contains_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.put(make_track("A"));
        cache.put(make_track("B"));

        // contains must not refresh A's recency
        assert!(cache.contains("A"));
        assert!(cache.put(make_track("C")));
        assert!(!cache.contains("A"));
        assert!(cache.contains("B"));
    }

    #[test]
    fn capacity_zero_rejects_and_reports() {
        let mut cache = LruCache::new(0);
        let evicted = cache.put(make_track("A"));
        assert!(evicted);
        assert!(cache.is_empty());
        assert!(!cache.contains("A"));
    }

    #[test]
    fn set_capacity_shrink_keeps_most_recent() {
        let mut cache = LruCache::new(3);
        cache.put(make_track("A"));
        cache.put(make_track("B"));
        cache.put(make_track("C"));

        cache.set_capacity(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("C"));
    }

    #[test]
    fn set_capacity_shrink_evicts_oldest_first() {
        let mut cache = LruCache::new(3);
        cache.put(make_track("A"));
        cache.put(make_track("B"));
        cache.put(make_track("C"));
        cache.get("A");

        cache.set_capacity(2);
        assert!(!cache.contains("B"));
        assert!(cache.contains("A"));
        assert!(cache.contains("C"));
    }

    #[test]
    fn status_ranks_most_recent_first() {
        let mut cache = LruCache::new(3);
        cache.put(make_track("A"));
        cache.put(make_track("B"));
        cache.get("A");

        let status = cache.status();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].title, "A");
        assert_eq!(status[0].rank, 0);
        assert_eq!(status[1].title, "B");
        assert_eq!(status[1].rank, 1);
    }

    #[test]
    fn heavy_touch_traffic_keeps_exact_order() {
        // Exercises lazy-queue compaction
        let mut cache = LruCache::new(2);
        cache.put(make_track("A"));
        cache.put(make_track("B"));
        for _ in 0..200 {
            cache.get("A");
        }
        assert!(cache.put(make_track("C")));
        assert!(cache.contains("A"));
        assert!(!cache.contains("B"));
    }
}
