// src/profile/video.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::exec::ToolRequirement;
use crate::profile::Invocation;
use crate::source::WorkItem;

pub const PROGRAM: &str = "ffmpeg";

pub const INPUT_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "wmv", "flv", "mpg", "mpeg", "mov", "ogv", "mkv", "webm",
];

/// Theora video and Vorbis audio in a Matroska container.
#[derive(Debug, Clone)]
pub struct VideoProfile {
    pub video_quality: u8,
    pub audio_quality: u8,
}

impl Default for VideoProfile {
    fn default() -> Self {
        Self {
            video_quality: 6,
            audio_quality: 3,
        }
    }
}

impl VideoProfile {
    pub fn new(video_quality: u8, audio_quality: u8) -> Self {
        Self {
            video_quality,
            audio_quality,
        }
    }

    pub fn requirements() -> Vec<ToolRequirement> {
        vec![ToolRequirement::new(PROGRAM, ["-version"], 0)]
    }

    /// `<stem>.mkv` next to the input; `<stem>-theora.mkv` when the input is
    /// itself an `.mkv` file.
    pub fn output_for(input: &Path) -> PathBuf {
        let is_mkv = input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mkv"));
        if !is_mkv {
            return input.with_extension("mkv");
        }

        let mut name = input.file_stem().unwrap_or_default().to_os_string();
        name.push("-theora.mkv");
        input.with_file_name(name)
    }

    pub fn encoder_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            "libtheora".to_string(),
            "-q:v".to_string(),
            self.video_quality.to_string(),
            "-c:a".to_string(),
            "libvorbis".to_string(),
            "-q:a".to_string(),
            self.audio_quality.to_string(),
            "-sn".to_string(),
        ]
    }

    /// `ffmpeg -i <input> <codec args...> -y <output>`
    pub fn command_line(&self, item: &WorkItem) -> Invocation {
        let mut inv = Invocation::new(PROGRAM, ["-i"]);
        inv.arg(&item.input);
        inv.args.extend(item.args.iter().map(OsString::from));
        inv.arg("-y").arg(&item.output);
        inv
    }
}
