// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::LamePreset;

/// Command-line arguments for `batchconv`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "batchconv",
    version,
    about = "Convert batches of media files in parallel with external encoders.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to an optional config file (TOML).
    ///
    /// Default: `Batchconv.toml` in the current working directory, ignored
    /// if it does not exist.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of conversions running at the same time.
    ///
    /// Defaults to the number of processing units of this machine.
    #[arg(long, short = 'J', value_name = "N", global = true)]
    pub jobs: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BATCHCONV_LOG` or `warn` will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// List the work items and their encoder arguments, but don't run anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per converter.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Encode cdparanoia WAV rips to MP3 with lame, using a track listing.
    Mp3(Mp3Args),
    /// Convert TIFF images to PDF with tiff2pdf.
    Tiff(TiffArgs),
    /// Convert video files to Theora/Vorbis in a Matroska container with ffmpeg.
    Video(VideoArgs),
}

#[derive(Debug, Clone, Args)]
pub struct Mp3Args {
    /// Track listing: album on line 1, artist on line 2, then `NN title` lines.
    #[arg(long, value_name = "PATH")]
    pub listing: Option<PathBuf>,

    /// VBR preset handed to `lame --preset`.
    #[arg(long, value_enum, value_name = "PRESET")]
    pub preset: Option<LamePreset>,
}

#[derive(Debug, Clone, Args)]
pub struct TiffArgs {
    /// Use JPEG compression.
    #[arg(short, long)]
    pub jpeg: bool,

    /// JPEG compression quality (1-100, default 85).
    #[arg(short, long, value_name = "Q")]
    pub quality: Option<u8>,

    /// One or more files to process.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct VideoArgs {
    /// Video quality (0-10, default 6).
    #[arg(short = 'q', long, value_name = "Q")]
    pub video_quality: Option<u8>,

    /// Audio quality (0-10, default 3).
    #[arg(short = 'a', long, value_name = "Q")]
    pub audio_quality: Option<u8>,

    /// One or more files to process.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
