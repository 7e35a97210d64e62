//! Schema version ordering
//!
//! Versions compare numerically per segment, so "1.10.0" sorts after "1.9.0".

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Version of the running software
    pub fn current() -> Self {
        // CARGO_PKG_VERSION is always valid semver
        crate::constants::plugin::VERSION
            .parse()
            .unwrap_or_default()
    }
}

impl FromStr for SchemaVersion {
    type Err = anyhow::Error;

    /// Accepts "1", "1.2" and "1.2.3"; missing segments are zero.
    /// Pre-release/build suffixes ("1.2.3-beta") are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let core = s
            .trim()
            .split(['-', '+'])
            .next()
            .unwrap_or_default();
        if core.is_empty() {
            return Err(anyhow!("empty version string"));
        }

        let mut segments = [0u32; 3];
        for (index, part) in core.split('.').enumerate() {
            let slot = segments
                .get_mut(index)
                .ok_or_else(|| anyhow!("too many segments in version '{s}'"))?;
            *slot = part
                .trim()
                .parse()
                .with_context(|| format!("invalid segment '{part}' in version '{s}'"))?;
        }

        Ok(Self::new(segments[0], segments[1], segments[2]))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
