//! Core types for trackdeck.
//!
//! This module re-exports the track abstraction and its concrete
//! variants:
//! - [`AudioTrack`]: the polymorphic track contract
//! - [`Mp3Track`]: compressed variant with bitrate/tag metadata
//! - [`WavTrack`]: uncompressed variant with sample-rate/bit-depth metadata

mod mp3;
mod track;
mod wav;

// Re-export all types at the module level
pub use mp3::Mp3Track;
pub use track::{
    synthesize_waveform, AudioTrack, BeatgridAnalysis, BoxedTrack, TrackFormat, WAVEFORM_SAMPLES,
};
pub use wav::WavTrack;
