//! Cache-fronting controller: get-or-load over the LRU cache.
//!
//! The controller is the only way the rest of the crate reaches the
//! cache. On a miss it takes ownership of a cloned, loaded, analyzed
//! track and inserts it; on a hit it touches the entry. Callers that
//! need a track of their own get a fresh clone, never a reference into
//! cache-owned storage.

use log::warn;

use crate::cache::{CacheStatusLine, LruCache};
use crate::error::Result;
use crate::types::{AudioTrack, BoxedTrack};

/// Outcome of [`DeckController::ensure_loaded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The track was already cached; its recency was refreshed.
    Hit,
    /// The track was cloned, prepared, and inserted with room to spare.
    Inserted,
    /// The insert evicted the least-recently-used entry.
    InsertedWithEviction,
}

impl LoadOutcome {
    /// Returns the string representation of the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadOutcome::Hit => "HIT",
            LoadOutcome::Inserted => "INSERTED",
            LoadOutcome::InsertedWithEviction => "INSERTED_WITH_EVICTION",
        }
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Front-end service that keeps prepared tracks in an LRU cache.
pub struct DeckController {
    cache: LruCache,
}

impl DeckController {
    /// Creates a controller with a cache bounded to `cache_capacity`.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: LruCache::new(cache_capacity),
        }
    }

    /// Ensures `track` is cached, cloning and preparing it on a miss.
    ///
    /// A clone failure propagates as `CLONE_FAILURE` and leaves the
    /// cache exactly as it was.
    pub fn ensure_loaded(&mut self, track: &dyn AudioTrack) -> Result<LoadOutcome> {
        if self.cache.contains(track.title()) {
            // Promote to most-recently-used
            self.cache.get(track.title());
            return Ok(LoadOutcome::Hit);
        }

        let prepared = track.clone_track()?;
        prepared.load();
        prepared.analyze_beatgrid();

        if self.cache.put(prepared) {
            Ok(LoadOutcome::InsertedWithEviction)
        } else {
            Ok(LoadOutcome::Inserted)
        }
    }

    /// Returns an owned clone of the cached track for `title`.
    ///
    /// The lookup promotes the entry; the cache keeps its own copy. A
    /// miss or a clone failure yields `None` (the failure is logged).
    pub fn fetch_copy(&mut self, title: &str) -> Option<BoxedTrack> {
        let cached = self.cache.get(title)?;
        match cached.clone_track() {
            Ok(copy) => Some(copy),
            Err(err) => {
                warn!("fetch_copy failed for \"{}\": {}", title, err);
                None
            }
        }
    }

    /// Membership test without touching recency.
    pub fn contains(&self, title: &str) -> bool {
        self.cache.contains(title)
    }

    /// Number of currently cached tracks.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Rebounds the cache, evicting oldest-first when shrinking.
    pub fn set_cache_capacity(&mut self, capacity: usize) {
        self.cache.set_capacity(capacity);
    }

    /// Read-only cache status, most recently used first.
    pub fn status(&self) -> Vec<CacheStatusLine> {
        self.cache.status()
    }

    /// Prints a human-readable cache status table to stdout.
    ///
    /// Diagnostic side channel only; no program should parse it.
    pub fn print_status(&self) {
        println!("=== Cache Status ({} tracks) ===", self.cache.len());
        for line in self.status() {
            println!("  #{} {}", line.rank, line.title);
        }
        println!("================================");
    }
}
