// src/profile/image.rs

//! TIFF to PDF conversion.
//!
//! The physical page size is computed from the pixel dimensions and the
//! resolution reported by `tiffinfo`. Images without resolution data (or
//! that `tiffinfo` cannot read) are fitted to an A4 page instead.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::exec::ToolRequirement;
use crate::profile::Invocation;
use crate::source::WorkItem;

pub const PROGRAM: &str = "tiff2pdf";
pub const PROBE_PROGRAM: &str = "tiffinfo";

pub const INPUT_EXTENSIONS: &[&str] = &["tif", "tiff"];

static TIFF_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.tiff?$").expect("static regex"));

/// Page geometry handed to `tiff2pdf`.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLayout {
    /// Size derived from pixels and resolution.
    ///
    /// Width and length are in inches, or centimetres when `metric` is set.
    Measured {
        width: f64,
        length: f64,
        xres: f64,
        yres: f64,
        metric: bool,
    },
    /// Fit the image onto an A4 page.
    FitA4,
}

impl PageLayout {
    pub fn args(&self) -> Vec<String> {
        match self {
            PageLayout::Measured {
                width,
                length,
                xres,
                yres,
                metric,
            } => {
                let mut args = Vec::with_capacity(10);
                if *metric {
                    args.push("-u".to_string());
                    args.push("m".to_string());
                }
                args.extend([
                    "-w".to_string(),
                    width.to_string(),
                    "-l".to_string(),
                    length.to_string(),
                    "-x".to_string(),
                    xres.to_string(),
                    "-y".to_string(),
                    yres.to_string(),
                ]);
                args
            }
            PageLayout::FitA4 => vec![
                "-z".to_string(),
                "-p".to_string(),
                "A4".to_string(),
                "-F".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageProfile {
    pub jpeg: bool,
    pub quality: u8,
}

impl Default for ImageProfile {
    fn default() -> Self {
        Self {
            jpeg: false,
            quality: 85,
        }
    }
}

impl ImageProfile {
    pub fn new(jpeg: bool, quality: u8) -> Self {
        Self { jpeg, quality }
    }

    /// `tiffinfo` without arguments prints usage and exits with 255.
    pub fn requirements() -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new(PROBE_PROGRAM, Vec::<String>::new(), 255),
            ToolRequirement::new(PROGRAM, ["-v"], 0),
        ]
    }

    /// Replace a `.tif`/`.tiff` suffix (any case) with `.pdf`.
    ///
    /// Only the ASCII suffix is inspected; the rest of the name is kept as
    /// is, even when it is not valid UTF-8.
    pub fn output_for(input: &Path) -> Option<PathBuf> {
        let name = input.file_name()?.to_string_lossy();
        if !TIFF_SUFFIX.is_match(&name) {
            return None;
        }
        Some(input.with_extension("pdf"))
    }

    pub fn encoder_args(&self) -> Vec<String> {
        if self.jpeg {
            vec![
                "-n".to_string(),
                "-j".to_string(),
                "-q".to_string(),
                self.quality.to_string(),
            ]
        } else {
            Vec::new()
        }
    }

    /// `tiff2pdf [compression...] <geometry...> -o <output> <input>`
    pub fn command_line(&self, item: &WorkItem, layout: &PageLayout) -> Invocation {
        let mut inv = Invocation::new(PROGRAM, item.args.iter().chain(&layout.args()));
        inv.arg("-o").arg(&item.output).arg(&item.input);
        inv
    }
}

/// Extract page geometry from `tiffinfo` output.
///
/// Returns `None` when the output has no image width at all. Missing,
/// malformed or zero resolution values yield [`PageLayout::FitA4`].
pub fn parse_tiffinfo(text: &str) -> Option<PageLayout> {
    let words: Vec<&str> = text.split_whitespace().collect();

    // "Image Width: 2480 Image Length: 3508"
    let w = words.iter().position(|w| *w == "Width:")?;
    let width: f64 = words.get(w + 1)?.parse().ok()?;
    let length: f64 = words.get(w + 4)?.parse().ok()?;

    // "Resolution: 300, 300 pixels/inch"
    let measured = words.iter().position(|w| *w == "Resolution:").and_then(|r| {
        let xres: f64 = words.get(r + 1)?.trim_end_matches(',').parse().ok()?;
        let yres: f64 = words.get(r + 2)?.parse().ok()?;
        if xres <= 0.0 || yres <= 0.0 {
            return None;
        }
        let metric = words
            .get(r + 3)
            .is_some_and(|unit| unit.ends_with("/cm"));
        Some(PageLayout::Measured {
            width: width / xres,
            length: length / yres,
            xres,
            yres,
            metric,
        })
    });

    Some(measured.unwrap_or(PageLayout::FitA4))
}

/// Run `tiffinfo` on `input` and derive the page layout.
pub async fn probe_layout(input: &Path) -> PageLayout {
    let output = Command::new(PROBE_PROGRAM)
        .arg(input)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await;

    let text = match output {
        Ok(out) => String::from_utf8_lossy(&out.stdout).into_owned(),
        Err(err) => {
            warn!(
                file = %input.display(),
                error = %err,
                "could not run {PROBE_PROGRAM}; fitting to A4"
            );
            return PageLayout::FitA4;
        }
    };

    match parse_tiffinfo(&text) {
        Some(PageLayout::FitA4) | None => {
            warn!(file = %input.display(), "no resolution in image; fitting to A4");
            PageLayout::FitA4
        }
        Some(layout) => {
            debug!(file = %input.display(), ?layout, "probed page layout");
            layout
        }
    }
}
