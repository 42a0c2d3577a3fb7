//! Strict release tag parsing.
use regex::Regex;
use std::{fmt, sync::LazyLock};

static RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+\.\d+\.\d+$").expect("release tag pattern is valid")
});

/// A release tag of the exact form `vMAJOR.MINOR.PATCH`.
///
/// Pre-release and build suffixes (`v1.0.0-beta`, `v1.0.0+1`) are not
/// releases and never parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Returns `None` when `tag` is not a strict release tag.
    pub fn parse(tag: &str) -> Option<Self> {
        if RELEASE_TAG.is_match(tag) {
            Some(Self(tag.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Revision `depth` commits before this tag, e.g. `v1.2.0~100`.
    pub fn ancestor(&self, depth: u64) -> String {
        format!("{}~{}", self.0, depth)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
