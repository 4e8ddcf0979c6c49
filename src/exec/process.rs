// src/exec/process.rs

//! Real process launcher backed by `tokio::process::Command`.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::errors::{BatchError, Result};
use crate::exec::backend::{Launcher, ProcessHandle};
use crate::profile::{Invocation, Profile};
use crate::source::WorkItem;

/// Handle for a spawned external program.
#[derive(Debug)]
pub struct ChildHandle {
    program: String,
    child: Child,
}

impl ChildHandle {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}

impl ProcessHandle for ChildHandle {
    fn try_wait(&mut self) -> Result<Option<i32>> {
        let status = self.child.try_wait()?;
        Ok(status.map(|s| {
            let code = s.code().unwrap_or(-1);
            debug!(program = %self.program, exit_code = code, "process exited");
            code
        }))
    }
}

/// Spawn `invocation` with stdin, stdout and stderr attached to the null
/// device.
///
/// The caller learns about the result only through the exit status, so
/// concurrent conversions cannot interleave their output on the terminal.
pub fn spawn_quiet(invocation: &Invocation) -> Result<ChildHandle> {
    let child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BatchError::Launch {
            program: invocation.program.clone(),
            reason: e.to_string(),
        })?;

    Ok(ChildHandle {
        program: invocation.program.clone(),
        child,
    })
}

/// Launcher used in production: one external process per work item.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    profile: Profile,
}

impl ProcessLauncher {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

impl Launcher for ProcessLauncher {
    type Handle = ChildHandle;

    fn launch<'a>(
        &'a mut self,
        item: &'a WorkItem,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>> {
        Box::pin(async move {
            let invocation = self.profile.invocation(item).await;
            debug!(item = %item.id, command = %invocation, "calling external program");

            let handle = spawn_quiet(&invocation)?;
            info!(
                item = %item.id,
                title = %item.title,
                output = %item.output.display(),
                pid = ?handle.id(),
                "started conversion"
            );
            Ok(handle)
        })
    }
}
