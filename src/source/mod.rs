// src/source/mod.rs

//! Work-item sources.
//!
//! A run starts by turning its inputs into an ordered list of [`WorkItem`]s:
//!
//! - [`files`] filters explicit file arguments by extension (video, TIFF).
//! - [`listing`] reads a track listing and matches it against cdparanoia
//!   WAV files on disk (MP3).
//!
//! Items are immutable once built and are consumed exactly once by the
//! dispatcher. Building them twice from the same inputs yields the same list.

use std::path::{Path, PathBuf};

pub mod files;
pub mod listing;

pub use files::{items_from_files, ExtensionFilter};
pub use listing::{items_from_listing, parse_listing, Track, TrackListing};

/// One unit of conversion work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Original file name, or the two-digit track number for listings.
    pub id: String,
    /// Human-readable title (track title or file stem).
    pub title: String,
    pub input: PathBuf,
    /// Derived from `input`; never equal to it.
    pub output: PathBuf,
    /// Profile-specific encoder arguments for this item.
    ///
    /// The launcher wraps these with the program name and the input/output
    /// arguments when it builds the full command line.
    pub args: Vec<String>,
}

impl WorkItem {
    /// Input path as shown to the user.
    pub fn input_name(&self) -> String {
        display_name(&self.input)
    }

    /// Output path as shown to the user.
    pub fn output_name(&self) -> String {
        display_name(&self.output)
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
