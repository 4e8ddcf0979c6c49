#![allow(dead_code)]

use std::path::PathBuf;

use batchconv::config::{ConfigFile, RawConfigFile};
use batchconv::source::WorkItem;

/// Builder for `WorkItem` to simplify test setup.
pub struct WorkItemBuilder {
    item: WorkItem,
}

impl WorkItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            item: WorkItem {
                id: id.to_string(),
                title: id.to_string(),
                input: PathBuf::from(format!("{id}.in")),
                output: PathBuf::from(format!("{id}.out")),
                args: vec![],
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.item.title = title.to_string();
        self
    }

    pub fn input(mut self, path: &str) -> Self {
        self.item.input = PathBuf::from(path);
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.item.output = PathBuf::from(path);
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.item.args.push(arg.to_string());
        self
    }

    pub fn build(self) -> WorkItem {
        self.item
    }
}

/// `n` items named `item_0` .. `item_{n-1}`.
pub fn numbered_items(n: usize) -> Vec<WorkItem> {
    (0..n)
        .map(|i| WorkItemBuilder::new(&format!("item_{i}")).build())
        .collect()
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.dispatch.jobs = Some(jobs);
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.dispatch.poll_interval_ms = ms;
        self
    }

    pub fn listing(mut self, path: &str) -> Self {
        self.config.mp3.listing = PathBuf::from(path);
        self
    }

    pub fn jpeg(mut self, quality: u8) -> Self {
        self.config.tiff.jpeg = true;
        self.config.tiff.quality = quality;
        self
    }

    pub fn video_quality(mut self, video: u8, audio: u8) -> Self {
        self.config.video.video_quality = video;
        self.config.video.audio_quality = audio;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
