//! Target and subtarget filter sets.

use std::collections::HashSet;

/// A set of names parsed from a comma-separated filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(HashSet<String>);

impl FilterSet {
    /// Parse a comma-separated list, trimming whitespace and dropping
    /// empty tokens. `"a, b,,c "` becomes `{a, b, c}`.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// Parse an optional CLI value; `None` yields an empty set.
    pub fn from_arg(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Selection rules combining the target and subtarget filter dimensions.
///
/// Two modes produce jobs: automatic (no filters at all, everything is
/// included) and manual (both filters given, a pair must match both).
/// Supplying only one of the two filters selects nothing.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub targets: FilterSet,
    pub subtargets: FilterSet,
}

impl Selection {
    pub fn new(targets: FilterSet, subtargets: FilterSet) -> Self {
        Self {
            targets,
            subtargets,
        }
    }

    /// Whether a target's subtargets should be enumerated at all.
    pub fn includes_target(&self, target: &str) -> bool {
        self.targets.is_empty() || self.targets.contains(target)
    }

    /// Whether a (target, subtarget) pair becomes a job.
    pub fn includes_pair(&self, target: &str, subtarget: &str) -> bool {
        let automatic = self.targets.is_empty() && self.subtargets.is_empty();
        let manual_match = !self.targets.is_empty()
            && !self.subtargets.is_empty()
            && self.targets.contains(target)
            && self.subtargets.contains(subtarget);

        automatic || manual_match
    }

    /// True when exactly one of the two filters was supplied.
    pub fn is_partial(&self) -> bool {
        self.targets.is_empty() != self.subtargets.is_empty()
    }
}
