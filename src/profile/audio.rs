// src/profile/audio.rs

use std::ffi::OsString;

use crate::exec::ToolRequirement;
use crate::profile::Invocation;
use crate::source::{Track, WorkItem};
use crate::types::LamePreset;

pub const PROGRAM: &str = "lame";

pub const INPUT_EXTENSIONS: &[&str] = &["wav"];

/// Variable-bitrate MP3 encoding with ID3 tags from the track listing.
#[derive(Debug, Clone, Default)]
pub struct AudioProfile {
    pub preset: LamePreset,
}

impl AudioProfile {
    pub fn new(preset: LamePreset) -> Self {
        Self { preset }
    }

    pub fn requirements() -> Vec<ToolRequirement> {
        vec![ToolRequirement::new(PROGRAM, ["--help"], 0)]
    }

    /// Tag arguments for one track.
    pub fn track_args(&self, track: &Track) -> Vec<String> {
        vec![
            "--tt".to_string(),
            track.title.clone(),
            "--ta".to_string(),
            track.artist.clone(),
            "--tl".to_string(),
            track.album.clone(),
            "--tn".to_string(),
            track.padded_number(),
        ]
    }

    /// `lame -S --preset <preset> <tags...> <input> <output>`
    pub fn command_line(&self, item: &WorkItem) -> Invocation {
        let mut inv = Invocation::new(PROGRAM, ["-S", "--preset", self.preset.as_str()]);
        inv.args.extend(item.args.iter().map(OsString::from));
        inv.arg(&item.input).arg(&item.output);
        inv
    }
}
