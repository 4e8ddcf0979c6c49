use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Variable-bitrate preset passed to `lame --preset`.
///
/// - `Standard`: transparent for most material (default).
/// - `Medium`: smaller files, slightly lower quality.
/// - `Extreme` / `Insane`: larger files for critical listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LamePreset {
    Medium,
    Standard,
    Extreme,
    Insane,
}

impl Default for LamePreset {
    fn default() -> Self {
        LamePreset::Standard
    }
}

impl LamePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LamePreset::Medium => "medium",
            LamePreset::Standard => "standard",
            LamePreset::Extreme => "extreme",
            LamePreset::Insane => "insane",
        }
    }
}

impl fmt::Display for LamePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LamePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medium" => Ok(LamePreset::Medium),
            "standard" => Ok(LamePreset::Standard),
            "extreme" => Ok(LamePreset::Extreme),
            "insane" => Ok(LamePreset::Insane),
            other => Err(format!(
                "invalid lame preset: {other} (expected \"medium\", \"standard\", \"extreme\" or \"insane\")"
            )),
        }
    }
}

/// Which converter is active for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Audio,
    Image,
    Video,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileKind::Audio => "audio",
            ProfileKind::Image => "image",
            ProfileKind::Video => "video",
        };
        f.write_str(s)
    }
}
