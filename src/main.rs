//! trackdeck session runner.
//!
//! Loads a session file (or the built-in demo session), builds the
//! library, runs a playlist through the track cache, and demos the
//! two-deck mixing engine. Status tables go to stdout; diagnostics go
//! through the logger (`RUST_LOG=debug` to see analysis records).

use log::warn;

use trackdeck::cli::Cli;
use trackdeck::config::DeckConfig;
use trackdeck::controller::DeckController;
use trackdeck::error::Result;
use trackdeck::library::Library;
use trackdeck::mixing::MixingEngine;
use trackdeck::session::{PlaylistSpec, SessionConfig, TrackSpec};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.apply_to(DeckConfig::from_env());

    let session = match &config.session_path {
        Some(path) => SessionConfig::load(path)?,
        None => demo_session(),
    };
    let cache_capacity = cli.cache_capacity.unwrap_or(session.cache_capacity);

    println!("=== Session: {} ===", session.name);

    let library = Library::build(&session.library);
    print_library(&library);

    let playlist_spec = pick_playlist(&session, cli.playlist.as_deref());
    let playlist = match &playlist_spec {
        Some(spec) => library.playlist_from_indices(&spec.name, &spec.track_indices),
        None => {
            // No playlists in the session: run the whole library in order
            let indices: Vec<usize> = (1..=library.len()).collect();
            library.playlist_from_indices("Library", &indices)
        }
    };
    println!(
        "Playlist \"{}\": {} tracks, {} seconds",
        playlist.name(),
        playlist.len(),
        playlist.total_duration_seconds()
    );

    let mut controller = DeckController::new(cache_capacity);
    for track in playlist.tracks() {
        match controller.ensure_loaded(track) {
            Ok(outcome) => println!("  {}: \"{}\"", outcome, track.title()),
            Err(err) => warn!("Skipping \"{}\": {}", track.title(), err),
        }
    }
    controller.print_status();

    let mut engine = MixingEngine::new(config.auto_sync, config.bpm_tolerance);
    for track in playlist.tracks().take(2) {
        if let Err(err) = engine.load_track_to_deck(track) {
            warn!("Deck load failed for \"{}\": {}", track.title(), err);
        }
    }
    engine.print_status();

    if let Some(first) = playlist.tracks().next() {
        if let Some(copy) = controller.fetch_copy(first.title()) {
            println!(
                "Fetched copy of \"{}\" ({}, quality {:.0})",
                copy.title(),
                copy.format(),
                copy.quality_score()
            );
        }
    }

    Ok(())
}

/// Prints the library listing to stdout.
fn print_library(library: &Library) {
    println!("=== Library ({} tracks) ===", library.len());
    for index in 1..=library.len() {
        if let Ok(track) = library.track_at(index) {
            println!(
                "  {}. \"{}\" [{}] {} bpm, {}s, quality {:.0}",
                index,
                track.title(),
                track.format(),
                track.bpm(),
                track.duration_seconds(),
                track.quality_score()
            );
        }
    }
}

/// Picks the requested playlist, or the session's first one.
fn pick_playlist<'a>(session: &'a SessionConfig, name: Option<&str>) -> Option<&'a PlaylistSpec> {
    match name {
        Some(name) => {
            let found = session.playlists.iter().find(|p| p.name == name);
            if found.is_none() {
                warn!("Playlist \"{}\" not found in session", name);
            }
            found
        }
        None => session.playlists.first(),
    }
}

/// Built-in session used when no `--session` file is given.
fn demo_session() -> SessionConfig {
    SessionConfig {
        name: "Demo Session".to_string(),
        cache_capacity: 3,
        library: vec![
            TrackSpec::Mp3 {
                title: "Midnight City".to_string(),
                artists: vec!["M83".to_string()],
                duration_seconds: 244,
                bpm: 105,
                bitrate_kbps: 320,
                has_id3_tags: true,
            },
            TrackSpec::Wav {
                title: "Strobe".to_string(),
                artists: vec!["deadmau5".to_string()],
                duration_seconds: 634,
                bpm: 128,
                sample_rate_hz: 44_100,
                bit_depth_bits: 16,
            },
            TrackSpec::Mp3 {
                title: "One More Time".to_string(),
                artists: vec!["Daft Punk".to_string()],
                duration_seconds: 320,
                bpm: 123,
                bitrate_kbps: 192,
                has_id3_tags: true,
            },
            TrackSpec::Wav {
                title: "Opus".to_string(),
                artists: vec!["Eric Prydz".to_string()],
                duration_seconds: 540,
                bpm: 126,
                sample_rate_hz: 96_000,
                bit_depth_bits: 24,
            },
            TrackSpec::Mp3 {
                title: "Levels".to_string(),
                artists: vec!["Avicii".to_string()],
                duration_seconds: 213,
                bpm: 126,
                bitrate_kbps: 112,
                has_id3_tags: false,
            },
        ],
        playlists: vec![PlaylistSpec {
            name: "Warmup".to_string(),
            track_indices: vec![1, 2, 3, 2, 4, 5],
        }],
    }
}
