// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BatchError, Result};

pub const MAX_FFMPEG_QUALITY: u8 = 10;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::BatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_dispatch(cfg)?;
    validate_jpeg_quality(cfg.tiff.quality)?;
    validate_ffmpeg_quality("video_quality", cfg.video.video_quality)?;
    validate_ffmpeg_quality("audio_quality", cfg.video.audio_quality)?;
    Ok(())
}

fn validate_dispatch(cfg: &RawConfigFile) -> Result<()> {
    if let Some(jobs) = cfg.dispatch.jobs {
        validate_jobs(jobs)?;
    }

    if cfg.dispatch.poll_interval_ms == 0 {
        return Err(BatchError::Config(
            "[dispatch].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

/// Concurrency limits below one would never launch anything.
pub fn validate_jobs(jobs: usize) -> Result<()> {
    if jobs == 0 {
        return Err(BatchError::Config(
            "number of jobs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_jpeg_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(BatchError::Config(format!(
            "JPEG quality must be between 1 and 100 (got {quality})"
        )));
    }
    Ok(())
}

pub fn validate_ffmpeg_quality(name: &str, quality: u8) -> Result<()> {
    if quality > MAX_FFMPEG_QUALITY {
        return Err(BatchError::Config(format!(
            "{name} must be between 0 and {MAX_FFMPEG_QUALITY} (got {quality})"
        )));
    }
    Ok(())
}
