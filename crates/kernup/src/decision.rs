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

//! Update decision over the archive's candidate tail

use crate::archive::KernelCandidate;
use crate::error::{KernupError, Result};
use crate::version::KernelVersion;

/// Outcome of comparing the running kernel against the newest archive entry.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateDecision {
    /// The newest listed build is already running.
    UpToDate,
    /// A newer build is listed but has no valid build for this architecture.
    Blocked { latest: KernelCandidate },
    /// A newer, downloadable build is available.
    Proceed { latest: KernelCandidate },
}

/// Decide whether an update is needed and possible.
///
/// "Latest" is the last element of `candidates`: the archive lists entries
/// oldest to newest and that ordering is trusted as-is, with no numeric
/// re-sort. An empty slice is a caller error and is reported upward.
pub fn decide(running: &KernelVersion, candidates: &[KernelCandidate]) -> Result<UpdateDecision> {
    let latest = candidates.last().ok_or(KernupError::EmptyListing)?;

    if latest.version.as_ref() == Some(running) {
        return Ok(UpdateDecision::UpToDate);
    }
    if !latest.build_valid {
        return Ok(UpdateDecision::Blocked {
            latest: latest.clone(),
        });
    }
    Ok(UpdateDecision::Proceed {
        latest: latest.clone(),
    })
}
