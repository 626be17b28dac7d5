//! Uncompressed (WAV) track variant.

use log::{debug, info};

use crate::error::{Result, TrackdeckError};
use crate::types::track::{AudioTrack, BeatgridAnalysis, BoxedTrack, TrackData, TrackFormat};

/// An uncompressed PCM track with sample-rate and bit-depth metadata.
#[derive(Debug, Clone)]
pub struct WavTrack {
    data: TrackData,
    sample_rate_hz: u32,
    bit_depth_bits: u32,
}

impl WavTrack {
    /// Creates a WAV track with a synthesized waveform buffer.
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        sample_rate_hz: u32,
        bit_depth_bits: u32,
    ) -> Self {
        Self {
            data: TrackData::new(title, artists, duration_seconds, bpm),
            sample_rate_hz,
            bit_depth_bits,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Bit depth in bits per sample.
    pub fn bit_depth_bits(&self) -> u32 {
        self.bit_depth_bits
    }

    /// Estimated on-disk size in bytes for stereo PCM of this duration.
    fn estimated_file_size(&self) -> u64 {
        u64::from(self.data.duration_seconds)
            * u64::from(self.sample_rate_hz)
            * u64::from(self.bit_depth_bits / 8)
            * 2
    }
}

impl AudioTrack for WavTrack {
    fn format(&self) -> TrackFormat {
        TrackFormat::Wav
    }

    fn title(&self) -> &str {
        &self.data.title
    }

    fn artists(&self) -> &[String] {
        &self.data.artists
    }

    fn duration_seconds(&self) -> u32 {
        self.data.duration_seconds
    }

    fn bpm(&self) -> u32 {
        self.data.bpm
    }

    fn set_bpm(&mut self, bpm: u32) {
        self.data.bpm = bpm;
    }

    fn waveform(&self) -> &[f64] {
        &self.data.waveform
    }

    fn load(&self) {
        info!(
            "Loading WAV \"{}\" at {} Hz / {} bit (uncompressed)",
            self.data.title, self.sample_rate_hz, self.bit_depth_bits
        );
        debug!(
            "Estimated file size for \"{}\": {} bytes, fast path (no decode)",
            self.data.title,
            self.estimated_file_size()
        );
    }

    fn analyze_beatgrid(&self) -> BeatgridAnalysis {
        let analysis = BeatgridAnalysis {
            estimated_beats: self.data.estimated_beats(),
            precision_factor: 1.0,
        };
        debug!(
            "Beat grid for \"{}\": {:.1} beats, precision 1.0 (uncompressed audio)",
            self.data.title, analysis.estimated_beats
        );
        analysis
    }

    fn quality_score(&self) -> f64 {
        let mut score: f64 = 70.0;
        if self.sample_rate_hz >= 44_100 {
            score += 10.0;
        }
        if self.sample_rate_hz >= 96_000 {
            score += 5.0;
        }
        if self.bit_depth_bits >= 16 {
            score += 10.0;
        }
        if self.bit_depth_bits >= 24 {
            score += 5.0;
        }
        score.min(100.0)
    }

    fn clone_track(&self) -> Result<BoxedTrack> {
        if let Some(reason) = self.data.corruption() {
            return Err(TrackdeckError::clone_failure(&self.data.title, reason));
        }
        Ok(Box::new(self.clone()))
    }
}
