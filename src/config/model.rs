// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::LamePreset;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [dispatch]
/// jobs = 4
/// poll_interval_ms = 500
///
/// [mp3]
/// listing = "titels"
/// preset = "standard"
///
/// [tiff]
/// jpeg = true
/// quality = 85
///
/// [video]
/// video_quality = 6
/// audio_quality = 3
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unchecked form; convert it with `ConfigFile::try_from` before use.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub dispatch: DispatchSection,

    #[serde(default)]
    pub mp3: Mp3Section,

    #[serde(default)]
    pub tiff: TiffSection,

    #[serde(default)]
    pub video: VideoSection,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`], so every instance satisfies the range checks.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub dispatch: DispatchSection,
    pub mp3: Mp3Section,
    pub tiff: TiffSection,
    pub video: VideoSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            dispatch: raw.dispatch,
            mp3: raw.mp3,
            tiff: raw.tiff,
            video: raw.video,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[dispatch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchSection {
    /// Concurrency limit; `None` means "number of processing units".
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Pause between polling passes when nothing finished.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            jobs: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// `[mp3]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mp3Section {
    #[serde(default = "default_listing")]
    pub listing: PathBuf,

    #[serde(default)]
    pub preset: LamePreset,
}

fn default_listing() -> PathBuf {
    PathBuf::from("titels")
}

impl Default for Mp3Section {
    fn default() -> Self {
        Self {
            listing: default_listing(),
            preset: LamePreset::default(),
        }
    }
}

/// `[tiff]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiffSection {
    #[serde(default)]
    pub jpeg: bool,

    #[serde(default = "default_jpeg_quality")]
    pub quality: u8,
}

fn default_jpeg_quality() -> u8 {
    85
}

impl Default for TiffSection {
    fn default() -> Self {
        Self {
            jpeg: false,
            quality: default_jpeg_quality(),
        }
    }
}

/// `[video]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoSection {
    #[serde(default = "default_video_quality")]
    pub video_quality: u8,

    #[serde(default = "default_audio_quality")]
    pub audio_quality: u8,
}

fn default_video_quality() -> u8 {
    6
}

fn default_audio_quality() -> u8 {
    3
}

impl Default for VideoSection {
    fn default() -> Self {
        Self {
            video_quality: default_video_quality(),
            audio_quality: default_audio_quality(),
        }
    }
}
