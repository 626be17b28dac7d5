//! Core track abstraction.
//!
//! An [`AudioTrack`] is one audio asset with format-specific load,
//! analysis, and quality behavior. Concrete variants live in
//! [`mp3`](crate::types::Mp3Track) and [`wav`](crate::types::WavTrack);
//! everything else in the crate works through `Box<dyn AudioTrack>`
//! trait objects so adding a format touches nothing but its own module.

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Length of the simulated waveform buffer owned by every track.
pub const WAVEFORM_SAMPLES: usize = 64;

/// An owned, heap-allocated track trait object.
pub type BoxedTrack = Box<dyn AudioTrack>;

/// Concrete binary format of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    /// Lossy compressed format with bitrate/tag metadata.
    Mp3,
    /// Uncompressed PCM format with sample-rate/bit-depth metadata.
    Wav,
}

impl TrackFormat {
    /// Returns the string representation of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackFormat::Mp3 => "MP3",
            TrackFormat::Wav => "WAV",
        }
    }
}

impl std::fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a simulated beat-grid analysis.
///
/// Diagnostic output only; analysis never mutates the track it ran on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatgridAnalysis {
    /// `(duration_seconds / 60.0) * bpm`.
    pub estimated_beats: f64,
    /// Format-specific precision: `bitrate / 320.0` for MP3, `1.0` for WAV.
    pub precision_factor: f64,
}

/// A polymorphic audio asset.
///
/// The title is the track's identity: two tracks with the same title are
/// treated as the same logical track everywhere in the crate. `set_bpm`
/// is the only mutation in the contract; `load` and `analyze_beatgrid`
/// are simulated computations that leave the track untouched.
pub trait AudioTrack: std::fmt::Debug {
    /// Concrete format of this track.
    fn format(&self) -> TrackFormat;

    /// Track title, the immutable identity key.
    fn title(&self) -> &str;

    /// Artist list.
    fn artists(&self) -> &[String];

    /// Duration in seconds.
    fn duration_seconds(&self) -> u32;

    /// Current beats-per-minute.
    fn bpm(&self) -> u32;

    /// Adjusts the BPM (used by external sync logic).
    fn set_bpm(&mut self, bpm: u32);

    /// Borrows the owned waveform sample buffer.
    fn waveform(&self) -> &[f64];

    /// Copies up to `buf.len()` waveform samples into `buf`.
    ///
    /// Returns the number of samples copied.
    fn copy_waveform_into(&self, buf: &mut [f64]) -> usize {
        let waveform = self.waveform();
        let n = buf.len().min(waveform.len());
        buf[..n].copy_from_slice(&waveform[..n]);
        n
    }

    /// Simulates decoding the track.
    ///
    /// Logs format-specific diagnostics; idempotent and side-effect-free
    /// with respect to track data.
    fn load(&self);

    /// Simulates beat-grid analysis.
    ///
    /// Emits a diagnostic log record and returns the computed estimate;
    /// never mutates the track.
    fn analyze_beatgrid(&self) -> BeatgridAnalysis;

    /// Deterministic quality score in `[0, 100]`.
    fn quality_score(&self) -> f64;

    /// Produces an independent deep copy of the same concrete variant.
    ///
    /// The copy gets its own waveform buffer; mutating either track
    /// never affects the other. Fails with `CLONE_FAILURE` if the source
    /// is corrupt, never yielding a partial object.
    fn clone_track(&self) -> Result<BoxedTrack>;
}

/// State shared by every track variant.
#[derive(Debug, Clone)]
pub struct TrackData {
    pub(crate) title: String,
    pub(crate) artists: Vec<String>,
    pub(crate) duration_seconds: u32,
    pub(crate) bpm: u32,
    pub(crate) waveform: Vec<f64>,
}

impl TrackData {
    /// Creates shared track state with a synthesized waveform buffer.
    pub fn new(title: impl Into<String>, artists: Vec<String>, duration_seconds: u32, bpm: u32) -> Self {
        let title = title.into();
        let waveform = synthesize_waveform(&title);
        Self {
            title,
            artists,
            duration_seconds,
            bpm,
            waveform,
        }
    }

    /// Returns the reason this track cannot be cloned, if any.
    pub(crate) fn corruption(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            return Some("empty title");
        }
        if self.waveform.len() != WAVEFORM_SAMPLES {
            return Some("waveform buffer has the wrong length");
        }
        None
    }

    /// `(duration_seconds / 60.0) * bpm`, shared by every variant's analysis.
    pub(crate) fn estimated_beats(&self) -> f64 {
        (f64::from(self.duration_seconds) / 60.0) * f64::from(self.bpm)
    }
}

/// Synthesizes a deterministic waveform buffer from a track title.
///
/// The title is hashed to a seed so equal titles always produce
/// element-wise equal buffers, which is what the deep-copy checks in the
/// test suite compare against. Samples are in `[-1, 1]`.
pub fn synthesize_waveform(title: &str) -> Vec<f64> {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    let digest = hasher.finalize();

    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    let seed = u64::from_le_bytes(seed_bytes);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..WAVEFORM_SAMPLES).map(|_| rng.gen_range(-1.0..1.0)).collect()
}
