//! Conda target collection across tool sources
//!
//! Two granularities over the same discovery traversal: a flat
//! deduplicated set of every target any tool declares, and a set of
//! per-tool frozen groups for callers that build one environment per
//! tool. Tools declaring identical requirement sets collapse to a single
//! group in the latter.

use crate::target::{CondaTarget, requirements_to_conda_targets};
use crate::tool::{ToolSource, tool_sources_on_paths};
use anyhow::Result;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Extract conda targets from one tool source.
///
/// Containers are parsed alongside the requirements but discarded here;
/// container resolution is not a conda concern.
pub fn tool_source_conda_targets(tool_source: &dyn ToolSource) -> Result<Vec<CondaTarget>> {
    let (requirements, _containers) = tool_source.parse_requirements_and_containers()?;
    Ok(requirements_to_conda_targets(&requirements))
}

/// Collect every conda target declared by tools on the supplied paths.
///
/// Requirements shared between tools appear once in the output. The
/// callback, when supplied, fires once per discovered tool path before
/// that tool's targets are added; it is for progress reporting only and
/// does not affect the result.
pub fn collect_conda_targets(
    paths: &[PathBuf],
    mut found_tool_callback: Option<&mut dyn FnMut(&Path)>,
) -> Result<HashSet<CondaTarget>> {
    let mut conda_targets = HashSet::new();
    for (tool_path, tool_source) in tool_sources_on_paths(paths) {
        if let Some(callback) = found_tool_callback.as_mut() {
            callback(&tool_path);
        }
        let tool_source = tool_source?;
        for target in tool_source_conda_targets(&tool_source)? {
            conda_targets.insert(target);
        }
    }
    Ok(conda_targets)
}

/// Collect per-tool conda target groups from tools on the supplied paths.
///
/// Each tool's requirements freeze into one group; groups deduplicate by
/// equality, so two tools with identical requirement sets share a group.
/// Useful for building one environment per distinct requirement set.
pub fn collect_conda_target_lists(
    paths: &[PathBuf],
    mut found_tool_callback: Option<&mut dyn FnMut(&Path)>,
) -> Result<HashSet<BTreeSet<CondaTarget>>> {
    let mut conda_target_lists = HashSet::new();
    for (tool_path, tool_source) in tool_sources_on_paths(paths) {
        if let Some(callback) = found_tool_callback.as_mut() {
            callback(&tool_path);
        }
        let tool_source = tool_source?;
        let group: BTreeSet<CondaTarget> =
            tool_source_conda_targets(&tool_source)?.into_iter().collect();
        conda_target_lists.insert(group);
    }
    Ok(conda_target_lists)
}
