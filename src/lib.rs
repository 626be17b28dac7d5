//! trackdeck: simulated DJ track manager built around an LRU track cache.
//!
//! This library models the track-handling core of a DJ playback
//! front-end: polymorphic track variants with format-specific quality
//! and beat-grid behavior, a fixed-capacity LRU cache that owns every
//! track it holds, and a controller that fronts the cache with
//! get-or-load semantics. Around that core sit the session-file
//! library/playlist bookkeeping and a simulated two-deck mixing engine.
//! All load/analyze work is simulated; no real audio is decoded.
//!
//! # Modules
//!
//! - [`types`]: The [`AudioTrack`] contract and its MP3/WAV variants
//! - [`handle`]: Move-only ownership [`Handle`] with null-access errors
//! - [`cache`]: The bounded [`LruCache`] of owned tracks
//! - [`controller`]: Get-or-load [`DeckController`] fronting the cache
//! - [`library`]: Session [`Library`] and cloned [`Playlist`]s
//! - [`mixing`]: Two-deck [`MixingEngine`]
//! - [`session`]: JSON session-file parsing
//! - [`config`]: Runtime configuration (`TRACKDECK_*` environment)
//! - [`error`]: Error codes and the crate [`Result`] alias
//!
//! # Example
//!
//! ```
//! use trackdeck::{DeckController, LoadOutcome, Mp3Track};
//!
//! let mut controller = DeckController::new(2);
//! let track = Mp3Track::new("Intro", vec!["DJ".to_string()], 240, 124, 320, true);
//!
//! assert_eq!(controller.ensure_loaded(&track).unwrap(), LoadOutcome::Inserted);
//! assert_eq!(controller.ensure_loaded(&track).unwrap(), LoadOutcome::Hit);
//!
//! // The cache keeps its own copy; the fetched one is independent
//! let copy = controller.fetch_copy("Intro").unwrap();
//! assert_eq!(copy.title(), "Intro");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod handle;
pub mod library;
pub mod mixing;
pub mod session;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use cache::{CacheStatusLine, LruCache};
pub use config::DeckConfig;
pub use controller::{DeckController, LoadOutcome};
pub use error::{ErrorCode, Result, TrackdeckError};
pub use handle::Handle;
pub use library::{Library, Playlist};
pub use mixing::MixingEngine;
pub use session::{PlaylistSpec, SessionConfig, TrackSpec};
pub use types::{AudioTrack, BoxedTrack, Mp3Track, TrackFormat, WavTrack};
