/// One entry of a format version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatVersion {
    /// The version string written to `layer_ratio_version`.
    pub version: &'static str,
    /// If `true`, assets older than this version need manual migration.
    pub breaking: bool,
}

/// All known asset format versions. The last is always the current version.
pub const FORMAT_VERSIONS: &[FormatVersion] = &[
    FormatVersion {
        version: "0.1",
        breaking: false,
    }, // initial
    FormatVersion {
        version: "0.2",
        breaking: false,
    }, // optional `name`, `randomize_color`
];

/// The result of validating an asset's `layer_ratio_version` against the current format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// The asset version matches the current format version.
    Current,
    /// The asset version is older but can be auto-upgraded.
    Outdated {
        /// The version found in the asset.
        found: String,
        /// The current format version.
        current: &'static str,
    },
    /// The asset version is older and has breaking changes that prevent auto-upgrade.
    Incompatible {
        /// The version found in the asset.
        found: String,
        /// The current format version.
        current: &'static str,
    },
    /// The asset version is not recognized, it might come from a newer release.
    Unknown,
}

/// Returns the current asset format version string.
pub fn current_format_version() -> &'static str {
    current_version_in(FORMAT_VERSIONS)
}

/// Returns the last version of `versions`, or `""` if it is empty.
pub fn current_version_in(versions: &[FormatVersion]) -> &'static str {
    versions.last().map_or("", |v| v.version)
}

fn find_version_index(versions: &[FormatVersion], version: &str) -> Option<usize> {
    versions.iter().position(|v| v.version == version)
}

/// Returns `true` if an asset can be upgraded from `from` to `to` without
/// crossing a breaking version.
pub fn can_auto_upgrade(from: &str, to: &str) -> bool {
    can_auto_upgrade_in(FORMAT_VERSIONS, from, to)
}

/// [`can_auto_upgrade`] against an explicit version history.
pub fn can_auto_upgrade_in(versions: &[FormatVersion], from: &str, to: &str) -> bool {
    let (Some(from_idx), Some(to_idx)) = (
        find_version_index(versions, from),
        find_version_index(versions, to),
    ) else {
        return false;
    };
    if from_idx >= to_idx {
        return false;
    }
    !versions[from_idx + 1..=to_idx].iter().any(|v| v.breaking)
}

/// Validates a version string against the current format version.
pub fn validate_version(version: &str) -> VersionStatus {
    validate_version_in(FORMAT_VERSIONS, version)
}

/// [`validate_version`] against an explicit version history, whose last
/// entry is taken as current.
pub fn validate_version_in(versions: &[FormatVersion], version: &str) -> VersionStatus {
    let current = current_version_in(versions);
    if version == current {
        VersionStatus::Current
    } else if find_version_index(versions, version).is_none() {
        VersionStatus::Unknown
    } else if can_auto_upgrade_in(versions, version, current) {
        VersionStatus::Outdated {
            found: version.to_string(),
            current,
        }
    } else {
        VersionStatus::Incompatible {
            found: version.to_string(),
            current,
        }
    }
}
