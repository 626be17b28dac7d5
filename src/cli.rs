//! CLI argument parser for the session runner.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DeckConfig;

/// trackdeck: simulated DJ track manager with an LRU track cache
#[derive(Parser, Debug)]
#[command(name = "trackdeck")]
#[command(about = "Simulated DJ track manager with an LRU track cache and two-deck mixing")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON session file (omit to run the built-in demo session)
    #[arg(short, long)]
    pub session: Option<PathBuf>,

    /// Name of the playlist to run (defaults to the session's first playlist)
    #[arg(short, long)]
    pub playlist: Option<String>,

    /// Override the track cache capacity
    #[arg(short, long)]
    pub cache_capacity: Option<usize>,

    /// BPM-sync tracks against the active deck while mixing
    #[arg(long)]
    pub auto_sync: bool,

    /// Maximum BPM difference two tracks may have and still mix
    #[arg(long)]
    pub bpm_tolerance: Option<u32>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Applies CLI overrides on top of an environment-derived config.
    pub fn apply_to(&self, mut config: DeckConfig) -> DeckConfig {
        if let Some(session) = &self.session {
            config.session_path = Some(session.clone());
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        if self.auto_sync {
            config.auto_sync = true;
        }
        if let Some(tolerance) = self.bpm_tolerance {
            config.bpm_tolerance = tolerance;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli {
            session: Some(PathBuf::from("/tmp/s.json")),
            playlist: None,
            cache_capacity: Some(2),
            auto_sync: true,
            bpm_tolerance: Some(10),
        };

        let config = cli.apply_to(DeckConfig::default());
        assert_eq!(config.session_path, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(config.cache_capacity, 2);
        assert!(config.auto_sync);
        assert_eq!(config.bpm_tolerance, 10);
    }

    #[test]
    fn cli_without_flags_keeps_config() {
        let cli = Cli {
            session: None,
            playlist: None,
            cache_capacity: None,
            auto_sync: false,
            bpm_tolerance: None,
        };

        let config = cli.apply_to(DeckConfig::default());
        assert_eq!(config.cache_capacity, crate::config::DEFAULT_CACHE_CAPACITY);
        assert!(!config.auto_sync);
    }
}
