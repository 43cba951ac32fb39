//! Known node releases and the numeric version codes that identify them
//!
//! Nodes report a numeric protocol version during the handshake. Only a closed
//! set of codes is recognized; everything else resolves to [`Release::Unknown`].

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::version::error::ParseError;
use crate::version::semver::{Version, parse_version};

/// A named node release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Release {
    /// Fallback for any code not in the lookup table
    #[serde(rename = "UNKNOWN")]
    Unknown,
    /// 3.0.0-rc4, which predates the packed version scheme
    #[serde(rename = "BCOS_3_0_0_RC4")]
    Bcos3_0_0Rc4,
    #[serde(rename = "BCOS_3_0_0")]
    Bcos3_0_0,
    #[serde(rename = "BCOS_3_1_0")]
    Bcos3_1_0,
    #[serde(rename = "BCOS_3_2_0")]
    Bcos3_2_0,
}

/// Code -> release table, built once on first lookup and read-only afterwards
static LOOKUP: LazyLock<HashMap<i64, Release>> = LazyLock::new(|| {
    Release::KNOWN
        .iter()
        .map(|release| (release.code(), *release))
        .collect()
});

impl Release {
    /// Code carried by [`Release::Unknown`]
    pub const UNKNOWN_CODE: i64 = -1;

    /// Every release that has an entry in the lookup table
    pub const KNOWN: [Release; 4] = [
        Release::Bcos3_0_0Rc4,
        Release::Bcos3_0_0,
        Release::Bcos3_1_0,
        Release::Bcos3_2_0,
    ];

    /// Every release, including the unknown sentinel
    pub const ALL: [Release; 5] = [
        Release::Unknown,
        Release::Bcos3_0_0Rc4,
        Release::Bcos3_0_0,
        Release::Bcos3_1_0,
        Release::Bcos3_2_0,
    ];

    /// Resolve a node version code to its release, falling back to `Unknown`
    pub fn resolve(code: i64) -> Release {
        match LOOKUP.get(&code) {
            Some(release) => *release,
            None => {
                debug!(code, "Unrecognized node version code, resolving to UNKNOWN");
                Release::Unknown
            }
        }
    }

    /// Numeric code reported by nodes running this release
    pub fn code(&self) -> i64 {
        match self {
            Release::Unknown => Self::UNKNOWN_CODE,
            Release::Bcos3_0_0Rc4 => 4,
            Release::Bcos3_0_0 => 0x0300_0000,
            Release::Bcos3_1_0 => 0x0301_0000,
            Release::Bcos3_2_0 => 0x0302_0000,
        }
    }

    /// Canonical version string of this release
    pub fn canonical_string(&self) -> &'static str {
        match self {
            Release::Unknown => "0.0.0",
            Release::Bcos3_0_0Rc4 => "3.0.0-rc4",
            Release::Bcos3_0_0 => "3.0.0",
            Release::Bcos3_1_0 => "3.1.0",
            Release::Bcos3_2_0 => "3.2.0",
        }
    }

    /// Symbolic name of the release
    pub fn as_str(&self) -> &'static str {
        match self {
            Release::Unknown => "UNKNOWN",
            Release::Bcos3_0_0Rc4 => "BCOS_3_0_0_RC4",
            Release::Bcos3_0_0 => "BCOS_3_0_0",
            Release::Bcos3_1_0 => "BCOS_3_1_0",
            Release::Bcos3_2_0 => "BCOS_3_2_0",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Release::Unknown)
    }

    /// Structured version of this release.
    ///
    /// Canonical strings are all well-formed, so this only fails if one of them
    /// is edited into something unparseable.
    pub fn to_version(&self) -> Result<Version, ParseError> {
        parse_version(self.canonical_string())
    }
}

/// Resolve a node version code straight to its structured version
pub fn resolve_to_version(code: i64) -> Result<Version, ParseError> {
    Release::resolve(code).to_version()
}

impl From<i64> for Release {
    fn from(code: i64) -> Self {
        Release::resolve(code)
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4, Release::Bcos3_0_0Rc4)]
    #[case(0x0300_0000, Release::Bcos3_0_0)]
    #[case(0x0301_0000, Release::Bcos3_1_0)]
    #[case(0x0302_0000, Release::Bcos3_2_0)]
    #[case(999_999, Release::Unknown)]
    #[case(0, Release::Unknown)]
    #[case(-2, Release::Unknown)]
    #[case(-1, Release::Unknown)] // sentinel code is not in the table
    #[case(0x0303_0000, Release::Unknown)]
    fn resolve_maps_codes_to_releases(#[case] code: i64, #[case] expected: Release) {
        assert_eq!(Release::resolve(code), expected);
        assert_eq!(Release::from(code), expected);
    }

    #[rstest]
    #[case(Release::Unknown, "0.0.0")]
    #[case(Release::Bcos3_0_0Rc4, "3.0.0-rc4")]
    #[case(Release::Bcos3_0_0, "3.0.0")]
    #[case(Release::Bcos3_1_0, "3.1.0")]
    #[case(Release::Bcos3_2_0, "3.2.0")]
    fn canonical_string_returns_documented_literal(
        #[case] release: Release,
        #[case] expected: &str,
    ) {
        assert_eq!(release.canonical_string(), expected);
        assert_eq!(release.to_string(), expected);
    }

    #[test]
    fn every_known_release_round_trips_through_its_code() {
        for release in Release::KNOWN {
            assert_eq!(Release::resolve(release.code()), release);
        }
    }

    #[test]
    fn known_codes_are_unique() {
        let codes: std::collections::HashSet<i64> =
            Release::ALL.iter().map(Release::code).collect();
        assert_eq!(codes.len(), Release::ALL.len());
    }

    #[test]
    fn every_canonical_string_parses() {
        for release in Release::ALL {
            let version = release.to_version().unwrap();
            assert_eq!(version.to_string(), release.canonical_string());
        }
    }

    #[rstest]
    #[case(0x0302_0000, Version::new(3, 2, 0))]
    #[case(4, Version::with_ext(3, 0, 0, "rc4"))]
    #[case(12345, Version::new(0, 0, 0))]
    fn resolve_to_version_composes_lookup_and_parse(
        #[case] code: i64,
        #[case] expected: Version,
    ) {
        let version = resolve_to_version(code).unwrap();
        assert_eq!(version, expected);
        assert_eq!(version.ext, expected.ext);
    }

    #[test]
    fn serializes_as_symbolic_name() {
        assert_eq!(
            serde_json::to_value(Release::Bcos3_0_0Rc4).unwrap(),
            serde_json::json!("BCOS_3_0_0_RC4")
        );
        for release in Release::ALL {
            assert_eq!(
                serde_json::to_value(release).unwrap(),
                serde_json::json!(release.as_str())
            );
        }
    }
}
