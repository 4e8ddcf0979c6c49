// src/exec/precheck.rs

//! Required-program checks performed once, before any item is launched.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{error, info};

use crate::errors::{BatchError, Result};

/// A program that must be invocable, and how to probe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    pub program: String,
    pub args: Vec<String>,
    /// Exit code the probe is expected to return.
    pub expected_code: i32,
}

impl ToolRequirement {
    pub fn new<I, S>(program: impl Into<String>, args: I, expected_code: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            expected_code,
        }
    }
}

/// Run the probe for a single requirement.
pub async fn check_tool(req: &ToolRequirement) -> Result<()> {
    let status = Command::new(&req.program)
        .args(&req.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| BatchError::ToolMissing {
            program: req.program.clone(),
            reason: e.to_string(),
        })?;

    match status.code() {
        Some(code) if code == req.expected_code => {
            info!(program = %req.program, "found required program");
            Ok(())
        }
        other => Err(BatchError::ToolMissing {
            program: req.program.clone(),
            reason: match other {
                Some(code) => format!(
                    "probe exited with code {code}, expected {}",
                    req.expected_code
                ),
                None => "probe was terminated by a signal".to_string(),
            },
        }),
    }
}

/// Check every requirement in order, stopping at the first failure.
pub async fn ensure_tools(requirements: &[ToolRequirement]) -> Result<()> {
    for req in requirements {
        if let Err(err) = check_tool(req).await {
            error!(program = %req.program, error = %err, "precondition failed");
            return Err(err);
        }
    }
    Ok(())
}
