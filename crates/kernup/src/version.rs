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

//! Kernel version key extraction

use std::fmt;

/// Normalized `(major.minor, rc)` key of a kernel version string.
///
/// Equality requires major, minor, and rc to all match; a missing rc is a
/// distinct identity from `rc0`. No ordering is defined: the archive's own
/// listing order decides what counts as "latest".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
    pub rc: Option<u32>,
}

impl KernelVersion {
    /// Extract the version key from a kernel release string.
    ///
    /// Recognized shapes: `X.Y.Z-NNNNNNrcN-suffix` (uname on a mainline rc
    /// build), `X.Y.Z-NN-suffix` (distro kernels), `X.Y-rcN` (archive
    /// directory names), and bare `X.Y`. The patch level and build number
    /// are ignored; trailing text such as `-generic` is not required to
    /// match. Returns `None` when the string does not start with
    /// `major.minor`; never panics.
    pub fn extract(raw: &str) -> Option<Self> {
        let (major, rest) = take_number(raw);
        let major = major?;
        let (minor, mut rest) = take_number(rest.strip_prefix('.')?);
        let minor = minor?;

        // Optional patch level, ignored
        if let Some(after) = rest.strip_prefix('.') {
            let (patch, after) = take_number(after);
            if patch.is_some() {
                rest = after;
            }
        }

        // Optional build number, ignored; an rc tag may sit directly after
        // the dash ("6.8-rc1") or after the build digits ("-061400rc3")
        if let Some(after) = rest.strip_prefix('-') {
            rest = after;
            let (build, after) = take_number(rest);
            if build.is_some() {
                rest = after;
            }
        }

        let rc = rest
            .strip_prefix("rc")
            .and_then(|after| take_number(after).0);

        Some(Self { major, minor, rc })
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rc {
            Some(rc) => write!(f, "{}.{}-rc{}", self.major, self.minor, rc),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Split a leading run of ASCII digits off `s`.
fn take_number(s: &str) -> (Option<u32>, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return (None, s);
    }
    match s[..end].parse() {
        Ok(number) => (Some(number), &s[end..]),
        Err(_) => (None, &s[end..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(major: u32, minor: u32, rc: Option<u32>) -> KernelVersion {
        KernelVersion { major, minor, rc }
    }

    #[test]
    fn extracts_mainline_uname_release() {
        assert_eq!(
            KernelVersion::extract("6.14.0-061400rc3-generic"),
            Some(key(6, 14, Some(3)))
        );
    }

    #[test]
    fn extracts_distro_uname_release_without_rc() {
        assert_eq!(
            KernelVersion::extract("5.15.0-78-generic"),
            Some(key(5, 15, None))
        );
    }

    #[test]
    fn extracts_archive_directory_names() {
        assert_eq!(KernelVersion::extract("6.8-rc1"), Some(key(6, 8, Some(1))));
        assert_eq!(KernelVersion::extract("6.5"), Some(key(6, 5, None)));
        assert_eq!(KernelVersion::extract("6.16.7"), Some(key(6, 16, None)));
    }

    #[test]
    fn generic_build_suffixes_have_no_rc() {
        assert_eq!(
            KernelVersion::extract("6.5.0-0500generic"),
            Some(key(6, 5, None))
        );
        assert_eq!(
            KernelVersion::extract("4.19.0-01900generic"),
            Some(key(4, 19, None))
        );
    }

    #[test]
    fn rc_zero_is_not_no_rc() {
        assert_eq!(KernelVersion::extract("6.5-rc0"), Some(key(6, 5, Some(0))));
        assert_ne!(
            KernelVersion::extract("6.5-rc0"),
            KernelVersion::extract("6.5")
        );
    }

    #[test]
    fn rejects_out_of_pattern_strings() {
        assert_eq!(KernelVersion::extract("garbage"), None);
        assert_eq!(KernelVersion::extract(""), None);
        assert_eq!(KernelVersion::extract("6"), None);
        assert_eq!(KernelVersion::extract("6."), None);
        assert_eq!(KernelVersion::extract(".5"), None);
        assert_eq!(KernelVersion::extract("v6.5"), None);
    }

    #[test]
    fn trailing_text_after_minor_is_ignored() {
        assert_eq!(
            KernelVersion::extract("6.5-generic"),
            Some(key(6, 5, None))
        );
        assert_eq!(KernelVersion::extract("6.5.x"), Some(key(6, 5, None)));
    }

    #[test]
    fn display_matches_archive_labels() {
        assert_eq!(key(6, 14, Some(3)).to_string(), "6.14-rc3");
        assert_eq!(key(5, 15, None).to_string(), "5.15");
    }
}
