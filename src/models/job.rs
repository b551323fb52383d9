//! Build-job output records.

use serde::{Deserialize, Serialize};

/// Kernel and package metadata extracted from a package listing page.
///
/// Either field may be empty when no extraction tier produced a value;
/// missing metadata is a data-quality issue, not a scan failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Kernel ABI hash from the kernel package filename
    pub vermagic: String,

    /// Package architecture identifier
    pub pkgarch: String,
}

/// One row of the build matrix handed to the host automation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Release version the scan was run for
    pub tag: String,

    /// Hardware platform identifier
    pub target: String,

    /// Board-family variant of the target
    pub subtarget: String,

    /// Kernel ABI hash, empty if not found
    pub vermagic: String,

    /// Package architecture, empty if not found
    pub pkgarch: String,
}

impl JobDescriptor {
    pub fn new(tag: &str, target: &str, subtarget: &str, metadata: PackageMetadata) -> Self {
        Self {
            tag: tag.to_string(),
            target: target.to_string(),
            subtarget: subtarget.to_string(),
            vermagic: metadata.vermagic,
            pkgarch: metadata.pkgarch,
        }
    }
}
