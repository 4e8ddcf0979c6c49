// src/profile/mod.rs

//! Encoder profiles.
//!
//! A [`Profile`] is the tool-specific policy for one converter: which
//! programs it needs, which input files it accepts, how output names are
//! derived, and how the argument vector for one [`WorkItem`] is built.
//!
//! - [`audio`]: `lame`, fed from a track listing.
//! - [`image`]: `tiff2pdf`, with page geometry probed through `tiffinfo`.
//! - [`video`]: `ffmpeg` to Theora/Vorbis in Matroska.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::exec::ToolRequirement;
use crate::source::WorkItem;
use crate::types::ProfileKind;

pub mod audio;
pub mod image;
pub mod video;

pub use audio::AudioProfile;
pub use image::{ImageProfile, PageLayout};
pub use video::VideoProfile;

/// Fully resolved external command for one item.
///
/// Arguments are OS strings so that file names reach the encoder byte for
/// byte, whatever their encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }
}

/// Lossy rendering for logs and dry runs.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// The converter selected for this run.
#[derive(Debug, Clone)]
pub enum Profile {
    Audio(AudioProfile),
    Image(ImageProfile),
    Video(VideoProfile),
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Audio(_) => ProfileKind::Audio,
            Profile::Image(_) => ProfileKind::Image,
            Profile::Video(_) => ProfileKind::Video,
        }
    }

    /// Programs that must be invocable before any item is launched.
    pub fn requirements(&self) -> Vec<ToolRequirement> {
        match self {
            Profile::Audio(_) => AudioProfile::requirements(),
            Profile::Image(_) => ImageProfile::requirements(),
            Profile::Video(_) => VideoProfile::requirements(),
        }
    }

    /// Input extensions accepted from the command line (without the dot).
    pub fn input_extensions(&self) -> &'static [&'static str] {
        match self {
            Profile::Audio(_) => audio::INPUT_EXTENSIONS,
            Profile::Image(_) => image::INPUT_EXTENSIONS,
            Profile::Video(_) => video::INPUT_EXTENSIONS,
        }
    }

    /// Output path for a file-based input.
    ///
    /// The audio profile derives its names from the track listing instead
    /// and returns `None` here.
    pub fn output_for(&self, input: &Path) -> Option<PathBuf> {
        match self {
            Profile::Audio(_) => None,
            Profile::Image(_) => ImageProfile::output_for(input),
            Profile::Video(_) => Some(VideoProfile::output_for(input)),
        }
    }

    /// Per-item encoder arguments for file-based inputs.
    pub fn file_encoder_args(&self) -> Vec<String> {
        match self {
            Profile::Audio(_) => Vec::new(),
            Profile::Image(p) => p.encoder_args(),
            Profile::Video(p) => p.encoder_args(),
        }
    }

    /// Build the full command for an item.
    ///
    /// For images this first probes the file with `tiffinfo`; a failed probe
    /// falls back to A4 page fitting rather than failing the item. The probe
    /// runs inside the dispatcher's launch step, so completions of other
    /// items are observed at the latest one probe later.
    pub async fn invocation(&self, item: &WorkItem) -> Invocation {
        match self {
            Profile::Audio(p) => p.command_line(item),
            Profile::Video(p) => p.command_line(item),
            Profile::Image(p) => {
                let layout = image::probe_layout(&item.input).await;
                p.command_line(item, &layout)
            }
        }
    }
}
