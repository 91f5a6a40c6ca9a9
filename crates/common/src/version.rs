use std::{fmt, str::FromStr};

use crate::{constants::MIN_TWO_STEP_MAJOR_VERSION, error::InterfaceError};

/// Semantic version reported by the manager program's `version` instruction.
///
/// Pre-release and build suffixes (`3.0.0-beta.1`, `3.0.0+abc`) are accepted
/// and dropped; only the numeric core is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProtocolVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ProtocolVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether `set_token_authority` / `claim_token_authority` exist in this version.
    pub fn supports_two_step_authority(&self) -> bool {
        self.major >= MIN_TWO_STEP_MAJOR_VERSION
    }
}

impl FromStr for ProtocolVersion {
    type Err = InterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InterfaceError::InvalidVersion(s.to_string());

        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core = trimmed
            .split(['-', '+'])
            .next()
            .filter(|core| !core.is_empty())
            .ok_or_else(invalid)?;

        let mut parts = core.split('.');
        let mut next = || -> Result<u64, InterfaceError> {
            parts
                .next()
                .ok_or_else(invalid)?
                .parse::<u64>()
                .map_err(|_| invalid())
        };
        let version = Self::new(next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
