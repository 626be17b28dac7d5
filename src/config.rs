//! Runtime configuration.
//!
//! Configuration comes from defaults, then `TRACKDECK_*` environment
//! variables, then command-line flags, each layer overriding the last.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default LRU cache capacity when neither the session file nor the
/// caller specifies one.
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Default BPM tolerance for deck mixing.
pub const DEFAULT_BPM_TOLERANCE: u32 = 5;

/// Runtime configuration for a trackdeck run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Path to the session file. If None, the built-in demo session is
    /// used.
    pub session_path: Option<PathBuf>,

    /// Capacity of the track cache. A session file's `cache_capacity`
    /// takes precedence when no explicit override is given.
    pub cache_capacity: usize,

    /// Whether deck loading BPM-syncs incoming tracks automatically.
    pub auto_sync: bool,

    /// Maximum BPM difference two tracks may have and still mix.
    pub bpm_tolerance: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            session_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            auto_sync: false,
            bpm_tolerance: DEFAULT_BPM_TOLERANCE,
        }
    }
}

impl DeckConfig {
    /// Creates a DeckConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DeckConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `TRACKDECK_SESSION` - Path to a session file
    /// - `TRACKDECK_CACHE_CAPACITY` - Track cache capacity
    /// - `TRACKDECK_AUTO_SYNC` - Enable BPM auto-sync (`1`/`true`)
    /// - `TRACKDECK_BPM_TOLERANCE` - Mixing BPM tolerance
    ///
    /// Falls back to defaults for unset or unparseable variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("TRACKDECK_SESSION") {
            config.session_path = Some(PathBuf::from(path));
        }

        if let Ok(capacity) = std::env::var("TRACKDECK_CACHE_CAPACITY") {
            if let Ok(capacity) = capacity.parse() {
                config.cache_capacity = capacity;
            }
        }

        if let Ok(auto_sync) = std::env::var("TRACKDECK_AUTO_SYNC") {
            config.auto_sync = matches!(auto_sync.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Ok(tolerance) = std::env::var("TRACKDECK_BPM_TOLERANCE") {
            if let Ok(tolerance) = tolerance.parse() {
                config.bpm_tolerance = tolerance;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DeckConfig::new();
        assert_eq!(config.session_path, None);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(!config.auto_sync);
        assert_eq!(config.bpm_tolerance, DEFAULT_BPM_TOLERANCE);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = DeckConfig {
            session_path: Some(PathBuf::from("/tmp/session.json")),
            cache_capacity: 3,
            auto_sync: true,
            bpm_tolerance: 8,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DeckConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cache_capacity, 3);
        assert!(parsed.auto_sync);
        assert_eq!(parsed.session_path, config.session_path);
    }
}
