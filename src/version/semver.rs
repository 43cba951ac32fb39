use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::error::ParseError;

/// Minimum number of dot-separated numeric components in a version string
const REQUIRED_COMPONENTS: usize = 3;

/// Structured node version: `major.minor.patch[-ext]`
///
/// Equality, ordering and hashing all go through [`Version::composite`], so the
/// extension tag never takes part in comparisons: `3.2.0 == 3.2.0-rc1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Suffix after the first hyphen (e.g. "rc4"), empty when absent
    pub ext: String,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            ext: String::new(),
        }
    }

    pub fn with_ext(major: u32, minor: u32, patch: u32, ext: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            ext: ext.into(),
        }
    }

    /// Composite integer used for ordering: `major * 100 + minor * 10 + patch`.
    ///
    /// FIXME: this is lossy. It assumes minor and patch stay below 10, so
    /// `1.10.0` and `2.0.0` both map to 200 and compare equal. Nodes and stored
    /// values already depend on this ordering, so it must not be replaced with
    /// a field-by-field comparison without auditing every caller.
    pub fn composite(&self) -> u64 {
        u64::from(self.major) * 100 + u64::from(self.minor) * 10 + u64::from(self.patch)
    }

    /// Returns true if this version is the same as or newer than `minimum`
    pub fn is_at_least(&self, minimum: &Version) -> bool {
        self >= minimum
    }
}

/// Parse a node version string of the form "a.b.c" or "a.b.c-ext".
///
/// Only the first hyphen splits off the extension. Components past the third
/// are ignored, so "3.2.0.1" parses as 3.2.0.
///
/// Examples:
/// - "3.2.0" -> Version(3, 2, 0, "")
/// - "3.0.0-rc4" -> Version(3, 0, 0, "rc4")
/// - "1.2" -> Err(InvalidFormat)
pub fn parse_version(input: &str) -> Result<Version, ParseError> {
    let invalid = || ParseError::InvalidFormat {
        input: input.to_string(),
    };

    let (numeric, ext) = input.trim().split_once('-').unwrap_or((input.trim(), ""));

    let parts: Vec<&str> = numeric.split('.').collect();
    if parts.len() < REQUIRED_COMPONENTS {
        return Err(invalid());
    }

    let component = |part: &str| part.trim().parse::<u32>().map_err(|_| invalid());

    Ok(Version {
        major: component(parts[0])?,
        minor: component(parts[1])?,
        patch: component(parts[2])?,
        ext: ext.to_string(),
    })
}

/// Compare two versions by their composite integer, ignoring the extension tag
pub fn compare(a: &Version, b: &Version) -> Ordering {
    a.composite().cmp(&b.composite())
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.composite().hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.ext.is_empty() {
            write!(f, "-{}", self.ext)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

impl TryFrom<String> for Version {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_version(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fields(v: &Version) -> (u32, u32, u32, &str) {
        (v.major, v.minor, v.patch, v.ext.as_str())
    }

    #[rstest]
    #[case("3.2.0", (3, 2, 0, ""))]
    #[case("3.0.0-rc4", (3, 0, 0, "rc4"))]
    #[case("  3.1.0  ", (3, 1, 0, ""))]
    #[case("3. 1 .0", (3, 1, 0, ""))] // components are trimmed individually
    #[case("3.2.0.7", (3, 2, 0, ""))] // extra components are ignored
    #[case("3.0.0-rc4-hotfix", (3, 0, 0, "rc4-hotfix"))] // only the first hyphen splits
    #[case("3.0.0-", (3, 0, 0, ""))]
    #[case("0.0.0", (0, 0, 0, ""))]
    fn parse_version_accepts_well_formed_input(
        #[case] input: &str,
        #[case] expected: (u32, u32, u32, &str),
    ) {
        let version = parse_version(input).unwrap();
        assert_eq!(fields(&version), expected);
    }

    #[rstest]
    #[case("1.2")]
    #[case("a.b.c")]
    #[case("")]
    #[case("3")]
    #[case("3.2.x")]
    #[case("-1.2.3")]
    #[case("3..0")]
    #[case("1.2-3.4")] // hyphen cuts the numeric part down to two components
    #[case("99999999999.0.0")] // does not fit in u32
    fn parse_version_rejects_malformed_input(#[case] input: &str) {
        assert_eq!(
            parse_version(input),
            Err(ParseError::InvalidFormat {
                input: input.to_string()
            })
        );
    }

    #[rstest]
    #[case("3.2.0")]
    #[case("3.0.0-rc4")]
    #[case("10.20.30-beta.1")]
    #[case("4294967295.0.1")]
    fn display_round_trips_well_formed_strings(#[case] input: &str) {
        assert_eq!(parse_version(input).unwrap().to_string(), input);
    }

    #[rstest]
    #[case("3.1.0", "3.2.0", Ordering::Less)]
    #[case("3.2.0", "3.2.0", Ordering::Equal)]
    #[case("3.2.0", "3.0.0", Ordering::Greater)]
    #[case("3.2.0", "3.2.0-rc1", Ordering::Equal)] // ext is ignored
    #[case("3.0.0-rc4", "3.0.0", Ordering::Equal)]
    #[case("1.10.0", "2.0.0", Ordering::Equal)] // composite collision
    #[case("1.0.10", "1.1.0", Ordering::Equal)] // composite collision
    #[case("1.9.9", "2.0.0", Ordering::Less)]
    fn compare_uses_composite_integer(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        let left = parse_version(left).unwrap();
        let right = parse_version(right).unwrap();
        assert_eq!(compare(&left, &right), expected);
        assert_eq!(left.cmp(&right), expected);
    }

    #[test]
    fn equality_ignores_ext() {
        assert_eq!(
            parse_version("3.2.0").unwrap(),
            parse_version("3.2.0-rc1").unwrap()
        );
    }

    #[test]
    fn composite_does_not_overflow_for_max_components() {
        let version = Version::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(version.composite(), u64::from(u32::MAX) * 111);
    }

    #[test]
    fn is_at_least_compares_against_minimum() {
        let minimum = Version::new(3, 1, 0);
        assert!(Version::new(3, 2, 0).is_at_least(&minimum));
        assert!(Version::new(3, 1, 0).is_at_least(&minimum));
        assert!(!Version::with_ext(3, 0, 0, "rc4").is_at_least(&minimum));
    }

    #[test]
    fn from_str_delegates_to_parse_version() {
        let version: Version = "3.0.0-rc4".parse().unwrap();
        assert_eq!(fields(&version), (3, 0, 0, "rc4"));
        assert!("1.2".parse::<Version>().is_err());
    }

    #[test]
    fn serializes_as_version_string() {
        let version = Version::with_ext(3, 0, 0, "rc4");
        assert_eq!(
            serde_json::to_value(&version).unwrap(),
            serde_json::json!("3.0.0-rc4")
        );

        let parsed: Version = serde_json::from_value(serde_json::json!("3.1.0")).unwrap();
        assert_eq!(fields(&parsed), (3, 1, 0, ""));

        assert!(serde_json::from_value::<Version>(serde_json::json!("3.1")).is_err());
    }
}
