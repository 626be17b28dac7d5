//! Track library and playlists.
//!
//! The library owns one master copy of every track built from the
//! session file. Playlists never share those copies: loading a playlist
//! clones each referenced track, so mutating a playlist entry (BPM sync
//! during mixing, for example) leaves the library untouched. Bad
//! playlist indices are warnings, not errors; the rest of the batch
//! still loads.

use log::{info, warn};

use crate::error::{Result, TrackdeckError};
use crate::session::TrackSpec;
use crate::types::{AudioTrack, BoxedTrack};

/// Owner of the master track copies for one session.
#[derive(Default)]
pub struct Library {
    tracks: Vec<BoxedTrack>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from session track specs.
    pub fn build(specs: &[TrackSpec]) -> Self {
        let tracks: Vec<BoxedTrack> = specs.iter().map(TrackSpec::build).collect();
        info!("Track library built: {} tracks", tracks.len());
        Self { tracks }
    }

    /// Number of tracks in the library.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if the library holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Borrows the track at a 1-based index.
    ///
    /// Fails with `INVALID_INDEX` when the index is 0 or past the end.
    pub fn track_at(&self, index: usize) -> Result<&dyn AudioTrack> {
        if index == 0 || index > self.tracks.len() {
            return Err(TrackdeckError::invalid_index(index, self.tracks.len()));
        }
        Ok(self.tracks[index - 1].as_ref())
    }

    /// Finds a track by title.
    pub fn find_track(&self, title: &str) -> Option<&dyn AudioTrack> {
        self.tracks
            .iter()
            .find(|track| track.title() == title)
            .map(|track| track.as_ref())
    }

    /// Titles of all library tracks, in library order.
    pub fn titles(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.title().to_string()).collect()
    }

    /// Builds a playlist by cloning the tracks at the given 1-based
    /// indices, loading and analyzing each clone.
    ///
    /// Invalid indices and clone failures are logged and skipped; the
    /// remaining entries still load.
    pub fn playlist_from_indices(&self, name: &str, indices: &[usize]) -> Playlist {
        info!("Loading playlist: {}", name);
        let mut playlist = Playlist::new(name);

        for &index in indices {
            let track = match self.track_at(index) {
                Ok(track) => track,
                Err(err) => {
                    warn!("Skipping playlist entry: {}", err.message);
                    continue;
                }
            };
            match track.clone_track() {
                Ok(clone) => {
                    clone.load();
                    clone.analyze_beatgrid();
                    info!("Added \"{}\" to playlist {}", clone.title(), name);
                    playlist.add_track(clone);
                }
                Err(err) => {
                    warn!("Skipping \"{}\": {}", track.title(), err.message);
                }
            }
        }

        playlist
    }
}

/// An ordered list of owned tracks.
pub struct Playlist {
    name: String,
    tracks: Vec<BoxedTrack>,
}

impl Playlist {
    /// Creates an empty playlist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Display name of the playlist.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of tracks in the playlist.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if the playlist holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Takes ownership of a track, appending it.
    pub fn add_track(&mut self, track: BoxedTrack) {
        self.tracks.push(track);
    }

    /// Removes and drops the first track with the given title.
    ///
    /// Returns true if a track was removed.
    pub fn remove_track(&mut self, title: &str) -> bool {
        match self.tracks.iter().position(|t| t.title() == title) {
            Some(pos) => {
                self.tracks.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Finds a track by title.
    pub fn find_track(&self, title: &str) -> Option<&dyn AudioTrack> {
        self.tracks
            .iter()
            .find(|track| track.title() == title)
            .map(|track| track.as_ref())
    }

    /// Iterates the playlist tracks in order.
    pub fn tracks(&self) -> impl Iterator<Item = &dyn AudioTrack> {
        self.tracks.iter().map(|track| track.as_ref())
    }

    /// Titles of all playlist tracks, in order.
    pub fn track_titles(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.title().to_string()).collect()
    }

    /// Sum of track durations in seconds.
    pub fn total_duration_seconds(&self) -> u32 {
        self.tracks.iter().map(|t| t.duration_seconds()).sum()
    }
}
