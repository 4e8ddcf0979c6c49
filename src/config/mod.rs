// src/config/mod.rs

//! Configuration loading and validation for batchconv.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate value ranges (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_effective, load_from_path};
pub use model::{
    ConfigFile, DispatchSection, Mp3Section, RawConfigFile, TiffSection, VideoSection,
};
