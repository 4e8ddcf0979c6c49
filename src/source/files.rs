// src/source/files.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::profile::Profile;
use crate::source::WorkItem;

/// Case-insensitive file-name filter built from a list of extensions.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    set: GlobSet,
}

impl ExtensionFilter {
    /// Build a filter from extensions without the leading dot (`"mp4"`).
    pub fn new(extensions: &[&str]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for ext in extensions {
            let glob = GlobBuilder::new(&format!("*.{ext}"))
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid extension pattern '{ext}'"))?;
            builder.add(glob);
        }
        let set = builder.build().context("building extension filter")?;
        Ok(Self { set })
    }

    /// Match against the final path component only.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.set.is_match(Path::new(name)))
            .unwrap_or(false)
    }
}

/// Turn explicit file arguments into work items for a file-based profile.
///
/// Files whose extension the profile does not recognise are skipped with a
/// warning. Argument order is preserved.
///
/// Every item writes its own file: a repeated input, an output already
/// claimed by an earlier item, or an output that is another item's input
/// is skipped with a warning.
pub fn items_from_files(paths: &[PathBuf], profile: &Profile) -> Result<Vec<WorkItem>> {
    let filter = ExtensionFilter::new(profile.input_extensions())?;
    let mut items = Vec::with_capacity(paths.len());

    let inputs: HashSet<&Path> = paths
        .iter()
        .filter(|p| filter.matches(p))
        .map(PathBuf::as_path)
        .collect();
    let mut seen_inputs: HashSet<&Path> = HashSet::new();
    let mut claimed_outputs: HashSet<PathBuf> = HashSet::new();

    for path in paths {
        if !filter.matches(path) {
            warn!(
                file = %path.display(),
                profile = %profile.kind(),
                "file has unknown extension, ignoring it"
            );
            continue;
        }

        let Some(output) = profile.output_for(path) else {
            warn!(
                file = %path.display(),
                profile = %profile.kind(),
                "cannot derive an output name, ignoring it"
            );
            continue;
        };

        if !seen_inputs.insert(path.as_path()) {
            warn!(file = %path.display(), "file given more than once, ignoring repeat");
            continue;
        }

        if inputs.contains(output.as_path()) {
            warn!(
                file = %path.display(),
                output = %output.display(),
                "output would overwrite another input file, ignoring it"
            );
            continue;
        }

        if !claimed_outputs.insert(output.clone()) {
            warn!(
                file = %path.display(),
                output = %output.display(),
                "output already produced by an earlier file, ignoring it"
            );
            continue;
        }

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(input = %path.display(), output = %output.display(), "work item");

        items.push(WorkItem {
            id: path.to_string_lossy().into_owned(),
            title,
            input: path.clone(),
            output,
            args: profile.file_encoder_args(),
        });
    }

    Ok(items)
}
