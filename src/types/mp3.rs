//! Compressed (MP3) track variant.

use log::{debug, info};

use crate::error::{Result, TrackdeckError};
use crate::types::track::{AudioTrack, BeatgridAnalysis, BoxedTrack, TrackData, TrackFormat};

/// Reference bitrate used for quality and precision scoring.
const REFERENCE_BITRATE_KBPS: u32 = 320;

/// Bitrates below this take a quality penalty.
const LOW_BITRATE_KBPS: u32 = 128;

/// A lossy compressed track with bitrate and tag metadata.
#[derive(Debug, Clone)]
pub struct Mp3Track {
    data: TrackData,
    bitrate_kbps: u32,
    has_id3_tags: bool,
}

impl Mp3Track {
    /// Creates an MP3 track with a synthesized waveform buffer.
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        duration_seconds: u32,
        bpm: u32,
        bitrate_kbps: u32,
        has_id3_tags: bool,
    ) -> Self {
        Self {
            data: TrackData::new(title, artists, duration_seconds, bpm),
            bitrate_kbps,
            has_id3_tags,
        }
    }

    /// Encoded bitrate in kbps.
    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }

    /// Whether ID3 metadata tags are present.
    pub fn has_id3_tags(&self) -> bool {
        self.has_id3_tags
    }
}

impl AudioTrack for Mp3Track {
    fn format(&self) -> TrackFormat {
        TrackFormat::Mp3
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
            "Loading MP3 \"{}\" at {} kbps",
            self.data.title, self.bitrate_kbps
        );
        if self.has_id3_tags {
            debug!("Processing ID3 metadata for \"{}\"", self.data.title);
        } else {
            debug!("No ID3 tags found for \"{}\"", self.data.title);
        }
        debug!("Decoded MP3 frames for \"{}\"", self.data.title);
    }

    fn analyze_beatgrid(&self) -> BeatgridAnalysis {
        let analysis = BeatgridAnalysis {
            estimated_beats: self.data.estimated_beats(),
            precision_factor: f64::from(self.bitrate_kbps) / f64::from(REFERENCE_BITRATE_KBPS),
        };
        debug!(
            "Beat grid for \"{}\": {:.1} beats, compression precision {:.3}",
            self.data.title, analysis.estimated_beats, analysis.precision_factor
        );
        analysis
    }

    fn quality_score(&self) -> f64 {
        let mut score =
            f64::from(self.bitrate_kbps) / f64::from(REFERENCE_BITRATE_KBPS) * 100.0;
        if self.has_id3_tags {
            score += 5.0;
        }
        if self.bitrate_kbps < LOW_BITRATE_KBPS {
            score -= 10.0;
        }
        score.clamp(0.0, 100.0)
    }

    fn clone_track(&self) -> Result<BoxedTrack> {
        if let Some(reason) = self.data.corruption() {
            return Err(TrackdeckError::clone_failure(&self.data.title, reason));
        }
        Ok(Box::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track(bitrate_kbps: u32, has_id3_tags: bool) -> Mp3Track {
        Mp3Track::new(
            "Test MP3",
            vec!["Tester".to_string()],
            200,
            128,
            bitrate_kbps,
            has_id3_tags,
        )
    }

    #[test]
    fn quality_score_clamps_at_100() {
        // 320 kbps with tags: 100 + 5, clamped
        let track = make_track(320, true);
        assert!((track.quality_score() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn quality_score_penalizes_low_bitrate() {
        // 96/320*100 = 30, minus 10 for the low bitrate
        let track = make_track(96, false);
        assert!((track.quality_score() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn quality_score_never_negative() {
        let track = make_track(16, false);
        assert_eq!(track.quality_score(), 0.0);
    }

    #[test]
    fn beatgrid_uses_compression_precision() {
        let track = make_track(160, false);
        let analysis = track.analyze_beatgrid();
        // 200s at 128 bpm
        assert!((analysis.estimated_beats - (200.0 / 60.0) * 128.0).abs() < 1e-9);
        assert!((analysis.precision_factor - 0.5).abs() < 1e-9);
    }

    #[test]
    fn load_does_not_mutate() {
        let track = make_track(320, true);
        let bpm = track.bpm();
        let waveform = track.waveform().to_vec();
        track.load();
        track.load();
        assert_eq!(track.bpm(), bpm);
        assert_eq!(track.waveform(), waveform.as_slice());
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let mut original = make_track(256, true);
        let copy = original.clone_track().unwrap();

        // Buffers are equal element-wise but separately owned
        assert_eq!(original.waveform(), copy.waveform());
        assert_ne!(original.waveform().as_ptr(), copy.waveform().as_ptr());

        original.set_bpm(999);
        assert_eq!(copy.bpm(), 128);
        assert_eq!(copy.format(), TrackFormat::Mp3);
        assert_eq!(copy.title(), "Test MP3");
    }

    #[test]
    fn copy_waveform_into_fills_partial_buffer() {
        let track = make_track(320, false);
        let mut buf = [0.0f64; 10];
        let copied = track.copy_waveform_into(&mut buf);
        assert_eq!(copied, 10);
        assert_eq!(buf.as_slice(), &track.waveform()[..10]);
    }

    #[test]
    fn clone_fails_on_empty_title() {
        let track = Mp3Track::new("", vec![], 100, 120, 320, false);
        let err = track.clone_track().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CloneFailure);
    }
}
