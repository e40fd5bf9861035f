//! Ordering-preserving integer encoding of semantic versions.
//!
//! Android's `versionCode` must grow with every release while `versionName`
//! carries the semantic version. Padding each of MAJOR, MINOR and PATCH to two
//! digits and concatenating them gives an integer that compares the same way
//! the version tuple does: `0.1.0` encodes to `100`, above `0.0.11` at `11`.
//! Components therefore have to stay within `0..=99`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Returned by [`encode`] and [`encode_value`] for input that cannot be encoded.
pub const UNENCODABLE: i64 = -1;

/// Leading `MAJOR.MINOR.PATCH` core, 1-2 ASCII digits per component, with an
/// optional `v`/`V` prefix. The core may not run into a further digit or `.`,
/// so `1.0.100` and `1.0.1.1` are both rejected.
static VERSION_CORE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[vV]?([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{1,2})(?:[^0-9.]|$)").ok()
});

/// A version encoded as `MMmmpp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionCode(u32);

impl VersionCode {
    /// Largest value any single component may take.
    pub const MAX_COMPONENT: u8 = 99;

    /// Encodes the version core at the start of `input`.
    ///
    /// Pre-release and build metadata after the core are ignored. Returns
    /// `None` when there is no three-component core, when a component needs
    /// more than two digits, or when a fourth numeric component follows.
    ///
    /// # Example
    /// ```
    /// use gradle_version_bump::version_code::VersionCode;
    ///
    /// assert_eq!(VersionCode::parse("v1.0.1").map(|c| c.value()), Some(10001));
    /// assert_eq!(VersionCode::parse("0.0.1-beta.1").map(|c| c.value()), Some(1));
    /// assert_eq!(VersionCode::parse("0.0.100"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let captures = VERSION_CORE.as_ref()?.captures(input)?;

        let mut code = 0u32;
        for index in 1..=3 {
            let component = captures.get(index)?.as_str().parse::<u32>().ok()?;
            // Equivalent to appending the zero-padded two-digit component.
            code = code * 100 + component;
        }

        Some(VersionCode(code))
    }

    /// Builds a code from numeric components, rejecting any above 99.
    pub fn from_parts(major: u64, minor: u64, patch: u64) -> Option<Self> {
        let limit = u64::from(Self::MAX_COMPONENT);
        if major > limit || minor > limit || patch > limit {
            return None;
        }

        let code = major * 10_000 + minor * 100 + patch;
        u32::try_from(code).ok().map(VersionCode)
    }

    /// The encoded integer.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Splits the code back into `(major, minor, patch)`.
    pub fn parts(self) -> (u32, u32, u32) {
        (self.0 / 10_000, self.0 / 100 % 100, self.0 % 100)
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VersionCode> for i64 {
    fn from(code: VersionCode) -> Self {
        i64::from(code.0)
    }
}

/// Encodes a version string, returning [`UNENCODABLE`] when it is not a
/// valid `[v]X.Y.Z` version with every component at most 99.
pub fn encode(version: &str) -> i64 {
    VersionCode::parse(version).map_or(UNENCODABLE, i64::from)
}

/// Encodes a loosely typed value such as a field read from JSON.
///
/// Only strings are encodable; numbers, arrays, objects, booleans, `null` and
/// a missing value all yield [`UNENCODABLE`].
pub fn encode_value(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(version)) => encode(version),
        _ => UNENCODABLE,
    }
}
