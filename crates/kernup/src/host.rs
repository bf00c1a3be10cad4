// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Host system information

use crate::error::Result;
use std::path::Path;

const DEBIAN_MARKER: &str = "/etc/debian_version";
const OS_RELEASE: &str = "/etc/os-release";

/// Identity of the host this tool operates on.
#[derive(Debug, Clone)]
pub struct HostInfo {
    /// Raw kernel release string as reported by uname
    pub kernel_release: String,
    /// Operating system type, e.g. "Linux"
    pub system: String,
    /// Distribution name from os-release, e.g. "Ubuntu"
    pub distro_name: String,
    /// Distribution version from os-release, e.g. "24.04"
    pub distro_version: String,
    pub hostname: String,
}

impl HostInfo {
    pub fn detect() -> Result<Self> {
        let uts = uname::uname()?;
        let os_release = std::fs::read_to_string(OS_RELEASE).unwrap_or_default();
        let (distro_name, distro_version) = parse_os_release(&os_release);

        Ok(Self {
            kernel_release: uts.release,
            system: uts.sysname,
            hostname: uts.nodename,
            distro_name: distro_name.unwrap_or_else(|| "unknown".to_string()),
            distro_version: distro_version.unwrap_or_default(),
        })
    }
}

/// NAME and VERSION_ID fields of an os-release file.
fn parse_os_release(content: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("NAME=") {
            name = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
            version = Some(unquote(value));
        }
    }
    (name, version)
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches('"').to_string()
}

/// Only Debian-family systems carry the dpkg machinery this tool drives.
pub fn is_debian_family() -> bool {
    Path::new(DEBIAN_MARKER).exists()
}
