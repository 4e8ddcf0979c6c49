// src/source/listing.rs

//! Track listings for the MP3 converter.
//!
//! The listing is a plain text file:
//!
//! ```text
//! album title
//! artist
//! 01 title of 1st song
//! ..
//! 14 title of 14th song
//! ```
//!
//! Track `N` is expected as `trackNN.cdda.wav` (the default cdparanoia name)
//! next to the listing, and is encoded to `trackNN.mp3`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::fs::FileSystem;
use crate::profile::AudioProfile;
use crate::source::WorkItem;

/// Parsed listing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListing {
    pub album: String,
    pub artist: String,
    pub tracks: Vec<Track>,
}

/// One `NN title` line, with the album-level tags copied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub number: u32,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl Track {
    pub fn padded_number(&self) -> String {
        format!("{:02}", self.number)
    }

    pub fn input_name(&self) -> String {
        format!("track{:02}.cdda.wav", self.number)
    }

    pub fn output_name(&self) -> String {
        format!("track{:02}.mp3", self.number)
    }
}

/// Parse listing text.
///
/// Returns `None` when the album and artist lines are missing. Blank lines
/// are ignored; lines without a leading track number are skipped with a
/// warning.
pub fn parse_listing(text: &str) -> Option<TrackListing> {
    let mut lines = text.lines();
    let album = lines.next()?.trim().to_string();
    let artist = lines.next()?.trim().to_string();

    let mut tracks = Vec::new();
    for line in lines {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };

        let number = match first.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                warn!(line = %line.trim(), "listing line has no track number, skipping it");
                continue;
            }
        };

        tracks.push(Track {
            number,
            title: words.collect::<Vec<_>>().join(" "),
            artist: artist.clone(),
            album: album.clone(),
        });
    }

    Some(TrackListing {
        album,
        artist,
        tracks,
    })
}

/// Build work items from a listing file.
///
/// An absent or unreadable listing yields an empty list, as do tracks whose
/// WAV file is not present. A listing that exists but cannot be decoded is
/// reported at warn level, since the batch silently becomes empty.
pub fn items_from_listing(
    fs: &dyn FileSystem,
    listing_path: &Path,
    profile: &AudioProfile,
) -> Vec<WorkItem> {
    let text = match fs.read_to_string(listing_path) {
        Ok(t) => t,
        Err(err) if fs.is_readable_file(listing_path) => {
            warn!(
                listing = %listing_path.display(),
                error = %err,
                "track listing exists but could not be read as UTF-8 text"
            );
            return Vec::new();
        }
        Err(err) => {
            info!(
                listing = %listing_path.display(),
                error = %err,
                "no readable track listing"
            );
            return Vec::new();
        }
    };

    let Some(listing) = parse_listing(&text) else {
        info!(listing = %listing_path.display(), "track listing lacks album/artist lines");
        return Vec::new();
    };

    let dir = listing_dir(listing_path);
    let mut items = Vec::with_capacity(listing.tracks.len());

    for track in &listing.tracks {
        let input = dir.join(track.input_name());
        if !fs.is_readable_file(&input) {
            debug!(track = track.number, input = %input.display(), "no WAV file for track");
            continue;
        }

        items.push(WorkItem {
            id: track.padded_number(),
            title: track.title.clone(),
            input,
            output: dir.join(track.output_name()),
            args: profile.track_args(track),
        });
    }

    items
}

fn listing_dir(listing_path: &Path) -> PathBuf {
    listing_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
