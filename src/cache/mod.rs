//! Cache module for track storage.
//!
//! Provides the bounded LRU cache that owns loaded tracks.

pub mod lru;

// Re-export commonly used types
pub use lru::{CacheStatusLine, LruCache};
