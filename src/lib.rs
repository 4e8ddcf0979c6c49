// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod profile;
pub mod report;
pub mod source;
pub mod types;

use std::io;
use std::time::Duration;

use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::validate::{validate_ffmpeg_quality, validate_jobs, validate_jpeg_quality};
use crate::config::{load_effective, ConfigFile};
use crate::dispatch::{host_parallelism, DispatchOptions, Dispatcher};
use crate::errors::{BatchError, Result};
use crate::exec::{ensure_tools, Launcher, ProcessLauncher, ToolRequirement};
use crate::fs::{FileSystem, RealFileSystem};
use crate::profile::{AudioProfile, ImageProfile, Profile, VideoProfile};
use crate::report::{ConsoleReporter, Reporter, RunSummary};
use crate::source::{items_from_files, items_from_listing, WorkItem};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - profile selection and work-item collection
/// - required-program checks
/// - the bounded dispatcher with the real process launcher
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let cfg = load_effective(args.config.as_deref())?;
    let profile = build_profile(&args.command, &cfg)?;
    let options = dispatch_options(args.jobs, &cfg)?;

    if args.dry_run {
        let items = collect_items(&args.command, &cfg, &profile, &RealFileSystem)?;
        print_dry_run(&profile, &options, &items);
        return Ok(RunSummary::default());
    }

    let reporter = ConsoleReporter::new(io::stdout()).with_usage_hint(usage_hint(&args.command));
    let launcher = ProcessLauncher::new(profile.clone());

    run_batch(
        &profile.requirements(),
        || collect_items(&args.command, &cfg, &profile, &RealFileSystem),
        options,
        launcher,
        reporter,
    )
    .await
}

/// Check `requirements`, collect the items, then dispatch them.
///
/// Items are collected only after every required program was found, so a
/// failed check returns its error before the listing is read and before
/// anything is launched.
pub async fn run_batch<F, L, R>(
    requirements: &[ToolRequirement],
    collect: F,
    options: DispatchOptions,
    launcher: L,
    reporter: R,
) -> Result<RunSummary>
where
    F: FnOnce() -> Result<Vec<WorkItem>>,
    L: Launcher,
    R: Reporter,
{
    ensure_tools(requirements).await?;
    let items = collect()?;
    Ok(Dispatcher::new(items, options, launcher, reporter).run().await)
}

/// Resolve the profile for a subcommand. CLI flags beat the config file.
pub fn build_profile(command: &Command, cfg: &ConfigFile) -> Result<Profile> {
    let profile = match command {
        Command::Mp3(args) => {
            let preset = args.preset.unwrap_or(cfg.mp3.preset);
            Profile::Audio(AudioProfile::new(preset))
        }
        Command::Tiff(args) => {
            let quality = args.quality.unwrap_or(cfg.tiff.quality);
            validate_jpeg_quality(quality)?;
            let jpeg = args.jpeg || cfg.tiff.jpeg;
            if jpeg {
                info!(quality, "using JPEG compression");
            }
            Profile::Image(ImageProfile::new(jpeg, quality))
        }
        Command::Video(args) => {
            let vq = args.video_quality.unwrap_or(cfg.video.video_quality);
            let aq = args.audio_quality.unwrap_or(cfg.video.audio_quality);
            validate_ffmpeg_quality("video quality", vq)?;
            validate_ffmpeg_quality("audio quality", aq)?;
            Profile::Video(VideoProfile::new(vq, aq))
        }
    };

    debug!(?profile, "selected profile");
    Ok(profile)
}

/// Concurrency limit and poll interval: `--jobs`, then `[dispatch]`, then
/// the host's processing units.
pub fn dispatch_options(cli_jobs: Option<usize>, cfg: &ConfigFile) -> Result<DispatchOptions> {
    let limit = match cli_jobs.or(cfg.dispatch.jobs) {
        Some(jobs) => {
            validate_jobs(jobs)?;
            jobs
        }
        None => host_parallelism(),
    };
    let poll_interval = Duration::from_millis(cfg.dispatch.poll_interval_ms);

    Ok(DispatchOptions::new(limit, poll_interval))
}

/// Build the work items for a subcommand.
pub fn collect_items(
    command: &Command,
    cfg: &ConfigFile,
    profile: &Profile,
    fs: &dyn FileSystem,
) -> Result<Vec<WorkItem>> {
    let items = match (command, profile) {
        (Command::Mp3(args), Profile::Audio(audio)) => {
            let listing = args.listing.as_deref().unwrap_or(cfg.mp3.listing.as_path());
            items_from_listing(fs, listing, audio)
        }
        (Command::Tiff(args), _) => items_from_files(&args.files, profile)?,
        (Command::Video(args), _) => items_from_files(&args.files, profile)?,
        (Command::Mp3(_), other) => {
            return Err(BatchError::Config(format!(
                "mp3 command needs the audio profile, got {}",
                other.kind()
            )));
        }
    };

    info!(count = items.len(), profile = %profile.kind(), "collected work items");
    Ok(items)
}

fn usage_hint(command: &Command) -> String {
    match command {
        Command::Mp3(_) => "usage: batchconv mp3\n\
             run in a directory where a file 'titels' and cdparanoia WAV files \
             (trackNN.cdda.wav) are present"
            .to_string(),
        Command::Tiff(_) => "usage: batchconv tiff [-j] [-q QUALITY] FILE.tif...".to_string(),
        Command::Video(_) => "usage: batchconv video [-q VQ] [-a AQ] FILE...".to_string(),
    }
}

/// Simple dry-run output: print items, outputs and encoder arguments.
fn print_dry_run(profile: &Profile, options: &DispatchOptions, items: &[WorkItem]) {
    println!("batchconv dry-run");
    println!("  profile = {}", profile.kind());
    println!("  jobs = {}", options.limit);
    println!();

    println!("items ({}):", items.len());
    for item in items {
        println!("  - {} -> {}", item.input_name(), item.output_name());
        if !item.title.is_empty() {
            println!("      title: {}", item.title);
        }
        if !item.args.is_empty() {
            println!("      args: {:?}", item.args);
        }
    }

    debug!("dry-run complete (no execution)");
}
