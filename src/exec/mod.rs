// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually starting the external encoders,
//! using `tokio::process::Command`, and for the required-program checks.
//!
//! - [`backend`] provides the `Launcher` / `ProcessHandle` traits that the
//!   dispatcher uses, and which tests can replace with simulated processes.
//! - [`process`] holds the production `ProcessLauncher`.
//! - [`precheck`] probes required programs before a batch starts.

pub mod backend;
pub mod precheck;
pub mod process;

pub use backend::{Launcher, ProcessHandle};
pub use precheck::{check_tool, ensure_tools, ToolRequirement};
pub use process::{spawn_quiet, ChildHandle, ProcessLauncher};
