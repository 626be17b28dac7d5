//! Session file parsing.
//!
//! A session file is a JSON document describing a library of track
//! specs, named playlists over that library (1-based indices), and the
//! cache capacity to run with. Parsing happens once at startup; the
//! specs are then built into real track objects by the
//! [`Library`](crate::library::Library).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::error::{Result, TrackdeckError};
use crate::types::{BoxedTrack, Mp3Track, WavTrack};

/// Declarative description of one library track.
///
/// The `format` tag selects the concrete variant and its
/// format-specific parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum TrackSpec {
    /// Compressed variant.
    Mp3 {
        title: String,
        #[serde(default)]
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        bitrate_kbps: u32,
        #[serde(default)]
        has_id3_tags: bool,
    },
    /// Uncompressed variant.
    Wav {
        title: String,
        #[serde(default)]
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        sample_rate_hz: u32,
        bit_depth_bits: u32,
    },
}

impl TrackSpec {
    /// Title of the described track.
    pub fn title(&self) -> &str {
        match self {
            TrackSpec::Mp3 { title, .. } | TrackSpec::Wav { title, .. } => title,
        }
    }

    /// Builds the concrete track this spec describes.
    pub fn build(&self) -> BoxedTrack {
        match self {
            TrackSpec::Mp3 {
                title,
                artists,
                duration_seconds,
                bpm,
                bitrate_kbps,
                has_id3_tags,
            } => Box::new(Mp3Track::new(
                title.clone(),
                artists.clone(),
                *duration_seconds,
                *bpm,
                *bitrate_kbps,
                *has_id3_tags,
            )),
            TrackSpec::Wav {
                title,
                artists,
                duration_seconds,
                bpm,
                sample_rate_hz,
                bit_depth_bits,
            } => Box::new(WavTrack::new(
                title.clone(),
                artists.clone(),
                *duration_seconds,
                *bpm,
                *sample_rate_hz,
                *bit_depth_bits,
            )),
        }
    }
}

/// A named playlist referencing library tracks by 1-based index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSpec {
    /// Display name of the playlist.
    pub name: String,
    /// 1-based indices into the session library.
    pub track_indices: Vec<usize>,
}

/// A full parsed session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Display name of the session.
    pub name: String,

    /// Cache capacity to run the session with.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Track specs making up the library.
    pub library: Vec<TrackSpec>,

    /// Playlists over the library.
    #[serde(default)]
    pub playlists: Vec<PlaylistSpec>,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl SessionConfig {
    /// Loads and parses a session file from disk.
    ///
    /// Fails with `SESSION_NOT_FOUND` if the file cannot be read and
    /// `SESSION_PARSE_FAILED` if it is not a valid session document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TrackdeckError::session_not_found(path.display().to_string(), e))?;
        serde_json::from_str(&text)
            .map_err(|e| TrackdeckError::session_parse_failed(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    const SESSION_JSON: &str = r#"{
        "name": "Friday Night",
        "cache_capacity": 2,
        "library": [
            {
                "format": "mp3",
                "title": "Opening Set",
                "artists": ["DJ One"],
                "duration_seconds": 240,
                "bpm": 124,
                "bitrate_kbps": 320,
                "has_id3_tags": true
            },
            {
                "format": "wav",
                "title": "Peak Hour",
                "duration_seconds": 300,
                "bpm": 128,
                "sample_rate_hz": 44100,
                "bit_depth_bits": 16
            }
        ],
        "playlists": [
            { "name": "Warmup", "track_indices": [1, 2] }
        ]
    }"#;

    #[test]
    fn load_parses_session_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SESSION_JSON.as_bytes()).unwrap();

        let session = SessionConfig::load(file.path()).unwrap();
        assert_eq!(session.name, "Friday Night");
        assert_eq!(session.cache_capacity, 2);
        assert_eq!(session.library.len(), 2);
        assert_eq!(session.playlists[0].track_indices, vec![1, 2]);
    }

    #[test]
    fn load_missing_file_is_session_not_found() {
        let err = SessionConfig::load(Path::new("/nonexistent/session.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[test]
    fn load_bad_json_is_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = SessionConfig::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionParseFailed);
    }

    #[test]
    fn unknown_format_is_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "name": "Bad",
                "library": [
                    { "format": "flac", "title": "Nope", "duration_seconds": 1, "bpm": 1 }
                ]
            }"#,
        )
        .unwrap();

        let err = SessionConfig::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionParseFailed);
    }

    #[test]
    fn cache_capacity_defaults_when_absent() {
        let json = r#"{ "name": "Defaults", "library": [] }"#;
        let session: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(session.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn specs_build_matching_variants() {
        let session: SessionConfig = serde_json::from_str(SESSION_JSON).unwrap();

        let mp3 = session.library[0].build();
        assert_eq!(mp3.title(), "Opening Set");
        // 320 kbps with tags clamps to 100
        assert!((mp3.quality_score() - 100.0).abs() < 1e-9);

        let wav = session.library[1].build();
        assert_eq!(wav.title(), "Peak Hour");
        assert!((wav.quality_score() - 90.0).abs() < 1e-9);
    }
}
