//! Conda and Bioconda helpers for Galaxy tool development
//!
//! This crate backs the conda-facing commands of a Galaxy tool
//! development CLI. It builds configured conda execution contexts,
//! extracts conda targets from tool definitions, and manages bioconda
//! recipe skeletons.
//!
//! # Collecting targets
//!
//! Tool definitions declare their requirements in XML:
//!
//! ```xml
//! <tool id="seqtk_seq" name="Convert FASTQ to FASTA">
//!     <requirements>
//!         <requirement type="package" version="1.2">seqtk</requirement>
//!     </requirements>
//! </tool>
//! ```
//!
//! [`collect_conda_targets`] walks a set of paths and returns the
//! deduplicated union of every requirement found;
//! [`collect_conda_target_lists`] instead preserves the per-tool
//! grouping, deduplicating identical groups, for callers that build one
//! conda environment per distinct requirement set.
//!
//! # Conda contexts
//!
//! [`build_conda_context`] assembles a [`CondaContext`] from a workspace
//! directory and the caller's command-line options: an optional explicit
//! conda prefix, channels to ensure, a condarc override location, and
//! whether to route external commands through this crate's own shell
//! runner.
//!
//! # Bioconda recipes
//!
//! [`write_bioconda_recipe`] clones the community bioconda-recipes
//! repository on demand, checks whether a recipe for a package already
//! exists, and invokes the external skeleton generator in create or
//! update mode accordingly.

mod bioconda;
mod collect;
mod condarc;
mod context;
mod git;
mod output;
mod shell;
mod target;
mod tool;

pub use bioconda::{
    BIOCONDA_REPO, BioconductorSkeleton, SkeletonWriter, clone_bioconda_repo,
    default_bioconda_recipe_path, write_bioconda_recipe,
};
pub use collect::{collect_conda_target_lists, collect_conda_targets, tool_source_conda_targets};
pub use condarc::Condarc;
pub use context::{CondaContext, CondaContextOptions, build_conda_context};
pub use shell::{ShellExec, shell, shell_output};
pub use target::{CondaTarget, requirements_to_conda_targets};
pub use tool::{
    Container, Requirement, RequirementKind, ToolSource, XmlToolSource, tool_sources_on_paths,
};
