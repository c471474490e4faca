//! CondaTarget value type
//!
//! A conda target is a normalized dependency descriptor: package name plus
//! optional version and build-string qualifiers. Targets compare and hash
//! by content so duplicates collapse naturally in sets, and they order
//! lexically so per-tool groups can be frozen as `BTreeSet<CondaTarget>`.

use crate::tool::{Requirement, RequirementKind};
use std::fmt;

/// One resolved conda dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CondaTarget {
    pub package: String,
    pub version: Option<String>,
    pub build: Option<String>,
}

impl CondaTarget {
    /// Target for the latest available version of a package.
    pub fn new(package: impl Into<String>) -> Self {
        CondaTarget {
            package: package.into(),
            version: None,
            build: None,
        }
    }

    /// Pin the target to a specific version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Pin the target to a specific build string. Only meaningful together
    /// with a version pin; conda rejects `name==build` specifiers.
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Render the conda command-line specifier for this target.
    ///
    /// `samtools`, `samtools=1.9`, or `samtools=1.9=h46bd0b3_0`.
    pub fn package_specifier(&self) -> String {
        match (&self.version, &self.build) {
            (Some(version), Some(build)) => format!("{}={}={}", self.package, version, build),
            (Some(version), None) => format!("{}={}", self.package, version),
            (None, _) => self.package.clone(),
        }
    }
}

impl fmt::Display for CondaTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.package_specifier())
    }
}

/// Convert tool requirements into conda targets.
///
/// Only `package`-type requirements map to targets; other requirement
/// kinds (e.g. `set_environment`) are skipped. Tool requirements never
/// carry a build string, so `build` is always unset here.
pub fn requirements_to_conda_targets(requirements: &[Requirement]) -> Vec<CondaTarget> {
    requirements
        .iter()
        .filter(|req| req.kind == RequirementKind::Package)
        .map(|req| CondaTarget {
            package: req.name.clone(),
            version: req.version.clone(),
            build: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_package_specifier_name_only() {
        assert_eq!(CondaTarget::new("samtools").package_specifier(), "samtools");
    }

    #[test]
    fn test_package_specifier_with_version() {
        let target = CondaTarget::new("samtools").with_version("1.9");
        assert_eq!(target.package_specifier(), "samtools=1.9");
    }

    #[test]
    fn test_package_specifier_with_build() {
        let target = CondaTarget::new("samtools")
            .with_version("1.9")
            .with_build("h46bd0b3_0");
        assert_eq!(target.package_specifier(), "samtools=1.9=h46bd0b3_0");
    }

    #[test]
    fn test_build_without_version_ignored_in_specifier() {
        let target = CondaTarget::new("samtools").with_build("h46bd0b3_0");
        assert_eq!(target.package_specifier(), "samtools");
    }

    #[test]
    fn test_equal_targets_collapse_in_set() {
        let mut set = HashSet::new();
        set.insert(CondaTarget::new("samtools").with_version("1.9"));
        set.insert(CondaTarget::new("samtools").with_version("1.9"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_version_distinguishes_targets() {
        let mut set = HashSet::new();
        set.insert(CondaTarget::new("samtools").with_version("1.9"));
        set.insert(CondaTarget::new("samtools").with_version("1.10"));
        set.insert(CondaTarget::new("samtools"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_requirements_to_conda_targets_skips_non_packages() {
        let requirements = vec![
            Requirement {
                name: "samtools".to_string(),
                kind: RequirementKind::Package,
                version: Some("1.9".to_string()),
            },
            Requirement {
                name: "LD_LIBRARY_PATH".to_string(),
                kind: RequirementKind::Other("set_environment".to_string()),
                version: None,
            },
        ];
        let targets = requirements_to_conda_targets(&requirements);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].package, "samtools");
        assert_eq!(targets[0].version.as_deref(), Some("1.9"));
        assert!(targets[0].build.is_none());
    }
}
