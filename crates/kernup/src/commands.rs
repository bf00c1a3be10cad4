// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Kernup.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Fixed command handlers behind the CLI flags and the menu
//!
//! The listing operation returns structured candidates from the archive
//! client; everything user-visible is rendered here, in one place.

use crate::archive::{ArchiveClient, KernelCandidate};
use crate::config::Config;
use crate::decision::{UpdateDecision, decide};
use crate::download::{PackageFetcher, staging_fragment};
use crate::error::{KernupError, Result};
use crate::host::HostInfo;
use crate::process;
use crate::version::KernelVersion;
use crossterm::style::Stylize;
use std::io::Write;

/// List the newest archive kernels with their build status.
pub async fn list(config: &Config, count: usize) -> Result<()> {
    let running = running_version().ok();
    let archive = ArchiveClient::new(&config.archive_url)?;
    let candidates = archive.list(count, running.as_ref()).await?;

    if candidates.is_empty() {
        println!(
            "{}",
            "No kernel entries found in the archive listing".yellow()
        );
        return Ok(());
    }
    for candidate in &candidates {
        println!("{:7} \t{}", candidate.label, status_text(candidate));
    }
    Ok(())
}

/// Update to the newest archive kernel if one is available and installable.
pub async fn update(config: &Config) -> Result<()> {
    let running = running_version()?;
    let archive = ArchiveClient::new(&config.archive_url)?;
    let candidates = archive.list(1, Some(&running)).await?;

    match decide(&running, &candidates)? {
        UpdateDecision::UpToDate => {
            println!(
                "{}",
                format!("No update required, latest version is already installed ({running})")
                    .green()
            );
        }
        UpdateDecision::Blocked { latest } => {
            println!(
                "{}",
                format!("No valid downloadable build for {}", latest.label).yellow()
            );
        }
        UpdateDecision::Proceed { latest } => {
            println!("Update required from {} to {}", running, latest.label);

            let fragment = staging_fragment(&latest.label);
            if !confirm("Do you want to continue? (yes/no): ")? {
                println!("To manually install the new kernel run:");
                println!(
                    "  sudo dpkg -i {}/*{}*.deb",
                    config.staging_dir.display(),
                    fragment
                );
                return Ok(());
            }

            let fetcher = PackageFetcher::new(&config.archive_url, &config.staging_dir)?;
            let mut debs = fetcher.staged_debs(fragment)?;
            if debs.is_empty() {
                debs = fetcher.fetch_debs(&latest.label).await?;
                println!(
                    "{}",
                    format!("Version {} has been downloaded.", latest.label).green()
                );
            } else {
                println!("Version {} has already been downloaded.", latest.label);
            }

            if debs.is_empty() {
                return Err(KernupError::Download(format!(
                    "no .deb packages staged for {}",
                    latest.label
                )));
            }
            process::dry_run_install(&debs)?;
        }
    }
    Ok(())
}

/// Download the packages for an explicitly named kernel version.
pub async fn get(config: &Config, version: &str) -> Result<()> {
    let fetcher = PackageFetcher::new(&config.archive_url, &config.staging_dir)?;
    let debs = fetcher.fetch_debs(version).await?;
    if debs.is_empty() {
        return Err(KernupError::Download(format!(
            "no .deb packages found for {version}"
        )));
    }
    println!("{}", "Download complete!".green());
    Ok(())
}

/// Remove old installed kernels via the privileged cleanup script.
pub fn clean(config: &Config) -> Result<()> {
    println!("Cleaning up old kernels");
    process::run_cleanup(&config.cleanup_tool)
}

/// Print the tool version and host system information.
pub fn version_report() -> Result<()> {
    let host = HostInfo::detect()?;
    println!();
    println!(
        "{}",
        format!("kernup v{}", env!("CARGO_PKG_VERSION")).bold()
    );
    println!("sysinfo:");
    println!(
        "- {} ({} {})",
        host.system, host.distro_name, host.distro_version
    );
    println!("- {}", host.kernel_release);
    println!("- {}", host.hostname);
    println!();
    Ok(())
}

fn running_version() -> Result<KernelVersion> {
    let host = HostInfo::detect()?;
    match KernelVersion::extract(&host.kernel_release) {
        Some(version) => Ok(version),
        None => Err(KernupError::UnrecognizedRelease(host.kernel_release)),
    }
}

fn status_text(candidate: &KernelCandidate) -> String {
    if candidate.running {
        "(Valid **Running**)".green().bold().to_string()
    } else if candidate.build_valid {
        "(Valid)".green().to_string()
    } else {
        "(Invalid)".red().to_string()
    }
}

/// Ask a yes/no question on stdin; anything but y/yes declines.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
