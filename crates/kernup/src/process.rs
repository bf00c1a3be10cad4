// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! External tool invocation: dpkg and the kernel cleanup script

use crate::error::{KernupError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Simulate installing the staged packages with a dpkg dry run.
pub fn dry_run_install(debs: &[PathBuf]) -> Result<()> {
    if debs.is_empty() {
        return Err(KernupError::Process(
            "no .deb packages to install".to_string(),
        ));
    }
    let mut command = Command::new("sudo");
    command.args(["dpkg", "-i", "--dry-run"]).args(debs);
    run(command, "dpkg --dry-run")
}

/// Run the privileged cleanup script that removes old kernel packages.
pub fn run_cleanup(tool: &Path) -> Result<()> {
    let mut command = Command::new("sudo");
    command.arg(tool);
    run(command, "kernel cleanup script")
}

fn run(mut command: Command, what: &str) -> Result<()> {
    tracing::info!("running {what}");
    let status = command
        .status()
        .map_err(|e| KernupError::Process(format!("failed to run {what}: {e}")))?;

    if !status.success() {
        let exit = status
            .code()
            .map_or_else(|| "a signal".to_string(), |code| format!("code {code}"));
        return Err(KernupError::Process(format!("{what} exited with {exit}")));
    }
    Ok(())
}
