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

//! Mainline kernel archive index client

use crate::error::{KernupError, Result};
use crate::version::KernelVersion;
use std::time::Duration;

#[cfg(target_arch = "x86_64")]
pub(crate) const ARCH: &str = "amd64";
#[cfg(target_arch = "aarch64")]
pub(crate) const ARCH: &str = "arm64";

pub(crate) const USER_AGENT: &str = "kernup/0.2.0";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// One directory entry of the archive listing.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelCandidate {
    /// Directory name stripped of the `v` marker and trailing slash.
    pub label: String,
    /// Extracted version key; absent for out-of-pattern directory names.
    pub version: Option<KernelVersion>,
    /// Whether the per-architecture build-status probe succeeded.
    pub build_valid: bool,
    /// Whether this entry matches the running kernel.
    pub running: bool,
}

/// Client for the mainline kernel package archive.
#[derive(Debug)]
pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArchiveClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| KernupError::ArchiveFetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// List the newest `count` kernel directories as structured candidates.
    ///
    /// The index page is fetched once and its entries kept in document
    /// order, so the last candidate is the newest by the archive's own
    /// ordering. Build status is probed sequentially per candidate, except
    /// for the entry matching `running`, which is reported valid without a
    /// probe.
    pub async fn list(
        &self,
        count: usize,
        running: Option<&KernelVersion>,
    ) -> Result<Vec<KernelCandidate>> {
        let index_url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&index_url)
            .send()
            .await
            .map_err(|e| KernupError::ArchiveFetch(format!("request for {index_url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(KernupError::ArchiveFetch(format!(
                "{index_url} returned {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| KernupError::ArchiveFetch(format!("failed to read index page: {e}")))?;

        let labels = version_dirs(&html);
        let skip = labels.len().saturating_sub(count);

        let mut candidates = Vec::new();
        for label in labels.into_iter().skip(skip) {
            let version = KernelVersion::extract(&label);
            let is_running = running.is_some() && version.as_ref() == running;
            let build_valid = if is_running {
                true
            } else {
                self.build_status(&label).await
            };
            candidates.push(KernelCandidate {
                label,
                version,
                build_valid,
                running: is_running,
            });
        }
        Ok(candidates)
    }

    /// Probe the per-architecture build status resource for one entry.
    ///
    /// Fail-closed: 404, any other non-success status, and any transport
    /// error all count as an invalid build.
    async fn build_status(&self, label: &str) -> bool {
        let url = format!("{}/v{}/{}/status", self.base_url, label, ARCH);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("status probe for {label} failed: {e}");
                false
            }
        }
    }
}

/// Pull `href` attribute values out of a directory index page.
///
/// The archive serves a plain autoindex; scanning for the attribute text is
/// all the structure we need from it.
pub(crate) fn hrefs(html: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(position) = rest.find("href=\"") {
        rest = &rest[position + 6..];
        let Some(end) = rest.find('"') else {
            break;
        };
        found.push(&rest[..end]);
        rest = &rest[end + 1..];
    }
    found
}

/// Kernel version directory names from the index, in document order.
fn version_dirs(html: &str) -> Vec<String> {
    hrefs(html)
        .into_iter()
        .filter(|href| href.starts_with('v') && href.ends_with('/'))
        .map(|href| href[1..href.len() - 1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const INDEX_HTML: &str = r#"<html><head><title>Index of /~kernel-ppa/mainline</title></head>
<body><h1>Index of /~kernel-ppa/mainline</h1><table>
<tr><td><a href="../">Parent Directory</a></td><td>-</td></tr>
<tr><td><a href="v6.4/">v6.4/</a></td><td>2023-06-26 03:47</td></tr>
<tr><td><a href="v6.5/">v6.5/</a></td><td>2023-08-28 08:52</td></tr>
<tr><td><a href="v6.6-rc1/">v6.6-rc1/</a></td><td>2023-09-11 04:13</td></tr>
</table></body></html>"#;

    #[test]
    fn hrefs_are_scanned_in_document_order() {
        assert_eq!(
            hrefs(INDEX_HTML),
            vec!["../", "v6.4/", "v6.5/", "v6.6-rc1/"]
        );
    }

    #[test]
    fn hrefs_of_plain_text_is_empty() {
        assert!(hrefs("no anchors here").is_empty());
    }

    #[test]
    fn version_dirs_keep_only_marker_entries() {
        assert_eq!(version_dirs(INDEX_HTML), vec!["6.4", "6.5", "6.6-rc1"]);
    }

    #[tokio::test]
    async fn list_returns_the_candidate_tail() {
        let mut server = Server::new_async().await;
        let index = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(INDEX_HTML)
            .create_async()
            .await;
        let valid = server
            .mock("GET", format!("/v6.6-rc1/{ARCH}/status").as_str())
            .with_status(200)
            .with_body("4")
            .create_async()
            .await;
        let invalid = server
            .mock("GET", format!("/v6.5/{ARCH}/status").as_str())
            .with_status(404)
            .create_async()
            .await;

        let archive = ArchiveClient::new(&server.url()).unwrap();
        let candidates = archive.list(2, None).await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label, "6.5");
        assert!(!candidates[0].build_valid);
        assert_eq!(candidates[1].label, "6.6-rc1");
        assert!(candidates[1].build_valid);
        assert_eq!(
            candidates[1].version,
            Some(KernelVersion {
                major: 6,
                minor: 6,
                rc: Some(1)
            })
        );

        index.assert_async().await;
        valid.assert_async().await;
        invalid.assert_async().await;
    }

    #[tokio::test]
    async fn list_skips_the_probe_for_the_running_kernel() {
        let mut server = Server::new_async().await;
        let index = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(INDEX_HTML)
            .create_async()
            .await;
        // No status mock for v6.6-rc1: a probe would hit mockito's implicit
        // 501 and come back invalid.

        let running = KernelVersion {
            major: 6,
            minor: 6,
            rc: Some(1),
        };
        let archive = ArchiveClient::new(&server.url()).unwrap();
        let candidates = archive.list(1, Some(&running)).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].running);
        assert!(candidates[0].build_valid);

        index.assert_async().await;
    }

    #[tokio::test]
    async fn list_count_larger_than_index_returns_everything() {
        let mut server = Server::new_async().await;
        let _index = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(INDEX_HTML)
            .create_async()
            .await;
        let mut probes = Vec::new();
        for dir in ["v6.4", "v6.5", "v6.6-rc1"] {
            probes.push(
                server
                    .mock("GET", format!("/{dir}/{ARCH}/status").as_str())
                    .with_status(200)
                    .create_async()
                    .await,
            );
        }

        let archive = ArchiveClient::new(&server.url()).unwrap();
        let candidates = archive.list(50, None).await.unwrap();
        assert_eq!(candidates.len(), 3);
    }

    #[tokio::test]
    async fn index_error_status_is_reported() {
        let mut server = Server::new_async().await;
        let _index = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let archive = ArchiveClient::new(&server.url()).unwrap();
        let result = archive.list(5, None).await;
        assert!(matches!(result, Err(KernupError::ArchiveFetch(_))));
    }

    #[tokio::test]
    async fn unreachable_status_probe_is_invalid() {
        // Nothing listens here; the transport error must map to invalid.
        let archive = ArchiveClient::new("http://127.0.0.1:1").unwrap();
        assert!(!archive.build_status("6.6-rc1").await);
    }
}
