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

//! Package download into the staging directory

use crate::archive::{ARCH, USER_AGENT, hrefs};
use crate::error::{KernupError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads a candidate's `.deb` packages and finds previously staged ones.
#[derive(Debug)]
pub struct PackageFetcher {
    client: reqwest::Client,
    base_url: String,
    staging_dir: PathBuf,
}

impl PackageFetcher {
    pub fn new(base_url: &str, staging_dir: &Path) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| KernupError::Download(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            staging_dir: staging_dir.to_path_buf(),
        })
    }

    /// Download every `.deb` linked from the candidate's per-arch page.
    ///
    /// Files are fetched one at a time, a single attempt each; a failed file
    /// is reported and skipped so the rest of the batch still lands.
    /// Returns the staged paths.
    pub async fn fetch_debs(&self, label: &str) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.staging_dir)?;

        let page_url = format!("{}/v{}/{}/", self.base_url, label, ARCH);
        let response = self
            .client
            .get(&page_url)
            .send()
            .await
            .map_err(|e| KernupError::Download(format!("request for {page_url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(KernupError::Download(format!(
                "kernel branch page {page_url} returned {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| KernupError::Download(format!("failed to read {page_url}: {e}")))?;

        let links: Vec<String> = hrefs(&html)
            .into_iter()
            .filter(|href| href.ends_with(".deb"))
            .map(str::to_string)
            .collect();
        let total = links.len();

        let mut staged = Vec::new();
        for (index, link) in links.iter().enumerate() {
            let file_url = if link.starts_with("http://") || link.starts_with("https://") {
                link.clone()
            } else {
                format!("{page_url}{link}")
            };
            let name = link.rsplit('/').next().unwrap_or(link);
            let dest = self.staging_dir.join(name);

            tracing::info!(
                "downloading file {}/{}: {} to {}",
                index + 1,
                total,
                name,
                self.staging_dir.display()
            );
            match self.download_file(&file_url, &dest).await {
                Ok(()) => staged.push(dest),
                Err(e) => tracing::error!("failed to download {name}: {e}"),
            }
        }
        Ok(staged)
    }

    async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| KernupError::Download(format!("request for {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(KernupError::Download(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| KernupError::Download(format!("failed to read {url}: {e}")))?;

        std::fs::write(dest, &bytes)?;
        Ok(())
    }

    /// Already-staged debs matching a candidate's version fragment.
    pub fn staged_debs(&self, fragment: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if !self.staging_dir.exists() {
            return Ok(found);
        }
        for entry in std::fs::read_dir(&self.staging_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(".deb") && name.contains(fragment) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }
}

/// Staging-file match fragment for a candidate label.
///
/// Mainline deb file names embed the rc tag ("...-061400rc3-..."), so an rc
/// label matches on its `rcN` part; labels without a dash match whole.
pub fn staging_fragment(label: &str) -> &str {
    label.split_once('-').map_or(label, |(_, fragment)| fragment)
}
