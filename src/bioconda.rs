//! Bioconda recipe management
//!
//! Clones the community bioconda-recipes repository when needed, checks
//! whether a recipe for a package is already present, and drives the
//! external skeleton generator in create or update mode. All filesystem
//! writes beyond the clone belong to the skeleton tool; this module only
//! decides whether and how to invoke it.

use crate::{git, output};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Canonical bioconda recipes repository.
pub const BIOCONDA_REPO: &str = "git@github.com:bioconda/bioconda-recipes.git";

/// Clone the bioconda-recipes repository to the given path.
///
/// Blocks until the clone finishes. A failure surfaces unchanged; no
/// partial-clone cleanup happens here.
pub fn clone_bioconda_repo(path: &Path) -> Result<()> {
    git::clone(BIOCONDA_REPO, path)
}

/// External recipe-skeleton generator.
///
/// The `recursive` flag is forwarded to the generator as-is; whether an
/// invocation creates or updates a recipe is decided by the state of the
/// recipe directory, not by this flag.
pub trait SkeletonWriter {
    fn write_recipe(&self, package_name: &str, recipe_dir: &Path, recursive: bool) -> Result<()>;
}

/// Skeleton generator backed by the `bioconda-utils` command-line tool.
pub struct BioconductorSkeleton;

impl SkeletonWriter for BioconductorSkeleton {
    fn write_recipe(&self, package_name: &str, recipe_dir: &Path, recursive: bool) -> Result<()> {
        let recipe_dir_str = recipe_dir
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("recipe directory path contains invalid UTF-8"))?;

        let mut cmd = Command::new("bioconda-utils");
        cmd.args(["bioconductor-skeleton", recipe_dir_str, package_name]);
        if recursive {
            cmd.arg("--recursive");
        }

        output::detail(&format!("bioconda-utils bioconductor-skeleton {}", package_name));
        let cmd_output = cmd
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::piped())
            .output()
            .map_err(|e| anyhow::anyhow!("failed to run bioconda-utils: {}", e))?;

        if !cmd_output.status.success() {
            let stderr = String::from_utf8_lossy(&cmd_output.stderr);
            bail!(
                "bioconda-utils skeleton failed for {}\nDetails: {}",
                package_name,
                stderr.trim()
            );
        }
        Ok(())
    }
}

/// Write (or update) a bioconda recipe for the given package.
///
/// The recipe repository lives at `<bioconda_dir>/bioconda-recipes`, or
/// under the home directory when no base is given. With `clone` set and
/// no repository present, the repository is cloned first; a pre-existing
/// repository is never re-cloned. A recipe counts as present when any
/// directory name under the clone contains the package name as a
/// substring (a deliberately loose check). Present recipes are touched
/// only when `update` is set; absent recipes are created regardless of
/// `update`.
pub fn write_bioconda_recipe(
    package_name: &str,
    clone: bool,
    update: bool,
    bioconda_dir: Option<&Path>,
    skeleton: &dyn SkeletonWriter,
) -> Result<()> {
    let bioconda_recipe_path = match bioconda_dir {
        Some(dir) => dir.join("bioconda-recipes"),
        None => default_bioconda_recipe_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?,
    };

    if clone && !bioconda_recipe_path.exists() {
        clone_bioconda_repo(&bioconda_recipe_path)?;
        output::info(&format!(
            "bioconda-recipes cloned to {}",
            bioconda_recipe_path.display()
        ));
    } else {
        output::info("bioconda-recipes repository already present or cloning not requested");
    }

    let recipe_dir = bioconda_recipe_path.join("recipes");
    if package_in_recipes(&bioconda_recipe_path, package_name) {
        output::info(&format!("recipe matching {} already exists in bioconda", package_name));
        if update {
            output::info(&format!("updating recipe for {}", package_name));
            skeleton.write_recipe(package_name, &recipe_dir, true)?;
        }
    } else {
        output::info(&format!(
            "no recipe matching {} found in bioconda, creating skeleton",
            package_name
        ));
        skeleton.write_recipe(package_name, &recipe_dir, true)?;
    }
    Ok(())
}

/// Loose presence check: does any directory name under the clone contain
/// the package name as a substring?
fn package_in_recipes(bioconda_recipe_path: &Path, package_name: &str) -> bool {
    WalkDir::new(bioconda_recipe_path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .any(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.contains(package_name))
                .unwrap_or(false)
        })
}

/// Default location of the bioconda-recipes clone for this user.
pub fn default_bioconda_recipe_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("bioconda-recipes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_package_in_recipes_substring_match() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("recipes/samtools-legacy")).unwrap();
        assert!(package_in_recipes(dir.path(), "samtools"));
        // Loose containment: a partial name also matches
        assert!(package_in_recipes(dir.path(), "sam"));
        assert!(!package_in_recipes(dir.path(), "bcftools"));
    }

    #[test]
    fn test_default_bioconda_recipe_path_under_home() {
        let path = default_bioconda_recipe_path().unwrap();
        assert!(path.ends_with("bioconda-recipes"));
        assert_eq!(path.parent(), dirs::home_dir().as_deref());
    }

    #[test]
    fn test_package_in_recipes_missing_tree() {
        let dir = TempDir::new().unwrap();
        assert!(!package_in_recipes(&dir.path().join("bioconda-recipes"), "samtools"));
    }
}
