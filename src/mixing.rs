//! Two-deck mixing session.
//!
//! The engine keeps two deck slots, each an ownership [`Handle`] over a
//! track. Loading always targets the inactive deck: the incoming track
//! is cloned, prepared, optionally BPM-synced against the active deck,
//! then the decks switch and the previous one is unloaded.

use log::{debug, info};

use crate::error::Result;
use crate::handle::Handle;
use crate::types::AudioTrack;

/// Number of deck slots.
const DECK_COUNT: usize = 2;

/// Snapshot of one deck for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatus {
    /// Deck slot index.
    pub deck: usize,
    /// Title of the loaded track, if any.
    pub title: Option<String>,
    /// Whether this is the active deck.
    pub active: bool,
}

/// Simulated two-deck mixing engine.
pub struct MixingEngine {
    decks: [Handle<dyn AudioTrack>; DECK_COUNT],
    active_deck: usize,
    auto_sync: bool,
    bpm_tolerance: u32,
}

impl MixingEngine {
    /// Creates an engine with two empty decks.
    pub fn new(auto_sync: bool, bpm_tolerance: u32) -> Self {
        debug!("Mixing engine initialized with {} empty decks", DECK_COUNT);
        Self {
            decks: [Handle::empty(), Handle::empty()],
            active_deck: 0,
            auto_sync,
            bpm_tolerance,
        }
    }

    /// Index of the currently active deck.
    pub fn active_deck(&self) -> usize {
        self.active_deck
    }

    /// Borrows the track on the active deck.
    ///
    /// Fails with `NULL_ACCESS` when the active deck is empty.
    pub fn active_track(&self) -> Result<&dyn AudioTrack> {
        self.decks[self.active_deck].get()
    }

    /// Clones `track` onto the inactive deck and switches to it.
    ///
    /// The clone is loaded and analyzed before going live. With
    /// auto-sync enabled, a clone whose BPM is outside the mixing
    /// tolerance is pulled to the average of the two BPMs. The
    /// previously active deck is unloaded after the switch. Returns the
    /// deck index the track landed on; a clone failure propagates and
    /// leaves both decks unchanged.
    pub fn load_track_to_deck(&mut self, track: &dyn AudioTrack) -> Result<usize> {
        let mut incoming = track.clone_track()?;

        let target = 1 - self.active_deck;
        debug!("Loading \"{}\" to deck {}", incoming.title(), target);

        incoming.load();
        incoming.analyze_beatgrid();

        if self.auto_sync
            && self.decks[self.active_deck].is_loaded()
            && !self.can_mix(incoming.as_ref())
        {
            self.sync_bpm(incoming.as_mut());
        }

        self.decks[target].reset(incoming);

        let previous = self.active_deck;
        self.active_deck = target;
        if self.decks[previous].is_loaded() {
            debug!("Unloading previous active deck {}", previous);
            self.decks[previous].clear();
        }

        if let Ok(live) = self.decks[target].get() {
            info!("\"{}\" is now live on deck {}", live.title(), target);
        }
        Ok(target)
    }

    /// Returns true if `candidate` can be mixed against the active deck
    /// without adjustment.
    ///
    /// False when the active deck is empty.
    pub fn can_mix(&self, candidate: &dyn AudioTrack) -> bool {
        match self.decks[self.active_deck].get() {
            Ok(active) => {
                let diff = i64::from(active.bpm()) - i64::from(candidate.bpm());
                diff.unsigned_abs() <= u64::from(self.bpm_tolerance)
            }
            Err(_) => false,
        }
    }

    /// Pulls `track` to the average of its BPM and the active deck's.
    fn sync_bpm(&self, track: &mut dyn AudioTrack) {
        if let Ok(active) = self.decks[self.active_deck].get() {
            let synced = (active.bpm() + track.bpm()) / 2;
            info!(
                "Syncing \"{}\" BPM {} -> {}",
                track.title(),
                track.bpm(),
                synced
            );
            track.set_bpm(synced);
        }
    }

    /// Snapshot of both decks for display.
    pub fn deck_status(&self) -> Vec<DeckStatus> {
        (0..DECK_COUNT)
            .map(|deck| DeckStatus {
                deck,
                title: self.decks[deck]
                    .get()
                    .ok()
                    .map(|track| track.title().to_string()),
                active: deck == self.active_deck,
            })
            .collect()
    }

    /// Prints a human-readable deck status table to stdout.
    pub fn print_status(&self) {
        println!("=== Deck Status ===");
        for status in self.deck_status() {
            let marker = if status.active { " (active)" } else { "" };
            match status.title {
                Some(title) => println!("  Deck {}: {}{}", status.deck, title, marker),
                None => println!("  Deck {}: [EMPTY]{}", status.deck, marker),
            }
        }
        println!("===================");
    }
}
