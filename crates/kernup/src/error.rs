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

//! Error types for the kernup crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernupError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("archive fetch failed: {0}")]
    ArchiveFetch(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("process error: {0}")]
    Process(String),

    #[error("could not parse running kernel release {0:?}")]
    UnrecognizedRelease(String),

    #[error("archive listing returned no kernel entries")]
    EmptyListing,
}

pub type Result<T> = std::result::Result<T, KernupError>;
