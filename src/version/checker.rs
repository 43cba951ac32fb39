//! Node version compatibility check

#[cfg(test)]
use mockall::automock;

use serde::Serialize;
use tracing::{info, warn};

use crate::version::error::SourceError;
use crate::version::release::Release;
use crate::version::semver::Version;

/// Supplies the numeric version code reported by a node
///
/// Implemented by whatever talks to the node (handshake, RPC client).
#[cfg_attr(test, automock)]
pub trait NodeVersionSource: Send + Sync {
    fn node_version_code(&self) -> Result<i64, SourceError>;
}

/// Compatibility of a node against a minimum version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// Node runs the minimum version or newer
    Supported,
    /// Node runs a release older than the minimum
    Unsupported,
    /// Node reported a code that is not in the release table
    Unknown,
}

/// Result of checking a node version code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeVersionCheck {
    /// Code reported by the node
    pub code: i64,
    pub release: Release,
    pub version: Version,
    pub status: VersionStatus,
}

/// Check a node version code against `minimum`
pub fn check_code(code: i64, minimum: &Version) -> NodeVersionCheck {
    let release = Release::resolve(code);
    let version = match release.to_version() {
        Ok(version) => version,
        Err(e) => {
            // Canonical strings always parse; treat a broken one as unknown.
            warn!(release = release.as_str(), "{}", e);
            return NodeVersionCheck {
                code,
                release: Release::Unknown,
                version: Version::default(),
                status: VersionStatus::Unknown,
            };
        }
    };

    let status = if release.is_unknown() {
        VersionStatus::Unknown
    } else if version.is_at_least(minimum) {
        VersionStatus::Supported
    } else {
        VersionStatus::Unsupported
    };

    NodeVersionCheck {
        code,
        release,
        version,
        status,
    }
}

/// Fetch the version code from `source` and check it against `minimum`
pub fn check_node<S: NodeVersionSource + ?Sized>(
    source: &S,
    minimum: &Version,
) -> Result<NodeVersionCheck, SourceError> {
    let code = source.node_version_code()?;
    let result = check_code(code, minimum);

    info!(
        code,
        release = result.release.as_str(),
        status = ?result.status,
        minimum = %minimum,
        "Checked node version"
    );

    Ok(result)
}
