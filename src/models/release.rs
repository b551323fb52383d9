//! Release tree URL composition.

/// Locates the three listing levels of one release on the download site.
#[derive(Debug, Clone)]
pub struct ReleaseTree {
    base_url: String,
    version: String,
}

impl ReleaseTree {
    pub fn new(base_url: &str, version: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.to_string(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Top-level target listing for this release.
    pub fn targets_url(&self) -> String {
        format!("{}/releases/{}/targets/", self.base_url, self.version)
    }

    /// Subtarget listing for one target.
    pub fn target_url(&self, target: &str) -> String {
        format!("{}{}/", self.targets_url(), target)
    }

    /// Package listing for one (target, subtarget) pair.
    pub fn packages_url(&self, target: &str, subtarget: &str) -> String {
        format!("{}{target}/{subtarget}/packages/", self.targets_url())
    }
}
