//! UMA protocol version negotiation.
//!
//! Versions travel as `"major.minor"` strings. Two VASPs can talk when they
//! share a major version; the response then uses the lower of the two
//! versions so neither side sees fields it does not understand.

use std::fmt;
use std::str::FromStr;

use crate::{Result, UmaError};

/// Major protocol version implemented by this crate.
pub const MAJOR_VERSION: u32 = 1;

/// Highest minor version implemented for [`MAJOR_VERSION`].
pub const MINOR_VERSION: u32 = 0;

/// Rendered protocol version this crate speaks.
pub const UMA_PROTOCOL_VERSION: &str = "1.0";

/// Supported `(major, highest minor)` pairs.
///
/// Exactly one major is supported today; extending this table is all that
/// multi-major support needs.
const SUPPORTED_VERSIONS: &[(u32, u32)] = &[(MAJOR_VERSION, MINOR_VERSION)];

/// A parsed `major.minor` version. Ordering is lexicographic on `(major, minor)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParsedVersion {
    /// Major component; a change here breaks wire compatibility.
    pub major: u32,
    /// Minor component; backwards compatible within a major.
    pub minor: u32,
}

impl ParsedVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for ParsedVersion {
    type Err = UmaError;

    fn from_str(version: &str) -> Result<Self> {
        let malformed = || UmaError::MalformedVersion(version.to_string());

        let (major, minor) = version.split_once('.').ok_or_else(malformed)?;
        Ok(Self {
            major: parse_component(major).ok_or_else(malformed)?,
            minor: parse_component(minor).ok_or_else(malformed)?,
        })
    }
}

/// Digits only: rejects signs, whitespace, and a second dot.
fn parse_component(component: &str) -> Option<u32> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse a `major.minor` version string.
///
/// # Errors
///
/// Returns [`UmaError::MalformedVersion`] unless the input is exactly two
/// dot-separated non-negative integers.
pub fn parse_version(version: &str) -> Result<ParsedVersion> {
    version.parse()
}

/// Major versions this implementation supports, ascending.
pub fn supported_major_versions() -> Vec<u32> {
    SUPPORTED_VERSIONS.iter().map(|(major, _)| *major).collect()
}

/// Whether `version` has a major component we support.
///
/// Malformed strings are simply unsupported.
pub fn is_version_supported(version: &str) -> bool {
    parse_version(version)
        .map(|parsed| highest_supported_for_major(parsed.major).is_some())
        .unwrap_or(false)
}

/// The highest version we support within `major`, if any.
pub fn highest_supported_for_major(major: u32) -> Option<ParsedVersion> {
    SUPPORTED_VERSIONS
        .iter()
        .find(|(supported, _)| *supported == major)
        .map(|(major, minor)| ParsedVersion::new(*major, *minor))
}

/// Pick the highest version we support among the majors a counterparty offers.
///
/// ```
/// use uma_lib::version::{select_highest_supported_version, MAJOR_VERSION, UMA_PROTOCOL_VERSION};
///
/// let picked = select_highest_supported_version(&[MAJOR_VERSION, MAJOR_VERSION + 1]);
/// assert_eq!(picked.as_deref(), Some(UMA_PROTOCOL_VERSION));
/// assert_eq!(select_highest_supported_version(&[MAJOR_VERSION + 7]), None);
/// ```
pub fn select_highest_supported_version(candidate_majors: &[u32]) -> Option<String> {
    candidate_majors
        .iter()
        .filter_map(|major| highest_supported_for_major(*major))
        .max()
        .map(|version| version.to_string())
}

/// Return whichever of two versions is lower. Ties return `version1`.
///
/// # Errors
///
/// Returns [`UmaError::MalformedVersion`] if either side does not parse.
pub fn select_lower_version(version1: &str, version2: &str) -> Result<String> {
    let parsed1 = parse_version(version1)?;
    let parsed2 = parse_version(version2)?;
    if parsed2 < parsed1 {
        Ok(version2.to_string())
    } else {
        Ok(version1.to_string())
    }
}
