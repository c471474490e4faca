//! Tool sources and tool discovery
//!
//! A tool source is a handle to a parsed Galaxy tool definition. This
//! crate only ever asks a tool source one thing: its declared requirements
//! and containers. [`XmlToolSource`] backs that question with a Galaxy
//! tool XML file; [`tool_sources_on_paths`] discovers tool files across a
//! set of filesystem paths as a lazy, restartable sequence.

use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a declared tool requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementKind {
    /// A software package, resolvable to a conda target.
    Package,
    /// Any other requirement type (e.g. `set_environment`).
    Other(String),
}

impl RequirementKind {
    fn from_type_attr(value: &str) -> Self {
        if value == "package" {
            RequirementKind::Package
        } else {
            RequirementKind::Other(value.to_string())
        }
    }
}

/// One requirement declared by a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub kind: RequirementKind,
    pub version: Option<String>,
}

/// One container declared by a tool (e.g. a docker image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub kind: String,
    pub identifier: String,
}

/// A parsed tool definition, queried only for its requirements.
pub trait ToolSource {
    /// Parse the tool's `<requirements>` declaration.
    ///
    /// Returns the declared requirements and containers. Errors from the
    /// underlying parser propagate unchanged.
    fn parse_requirements_and_containers(&self) -> Result<(Vec<Requirement>, Vec<Container>)>;
}

/// Tool source backed by a Galaxy tool XML file.
pub struct XmlToolSource {
    path: PathBuf,
    content: String,
}

impl XmlToolSource {
    /// Load a tool source from a Galaxy tool XML file.
    ///
    /// Errors if the file cannot be read or does not hold a tool
    /// definition. XML well-formedness is not checked until the
    /// requirements are parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        if !looks_like_tool_xml(&content) {
            bail!("{} does not look like a Galaxy tool definition", path.display());
        }
        Ok(XmlToolSource {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolSource for XmlToolSource {
    fn parse_requirements_and_containers(&self) -> Result<(Vec<Requirement>, Vec<Container>)> {
        let doc = roxmltree::Document::parse(&self.content)?;
        let root = doc.root_element();
        if root.tag_name().name() != "tool" {
            bail!("{}: root element is not <tool>", self.path.display());
        }

        let mut requirements = Vec::new();
        let mut containers = Vec::new();
        let Some(block) = root.children().find(|n| n.has_tag_name("requirements")) else {
            return Ok((requirements, containers));
        };

        for node in block.children().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "requirement" => {
                    let name = node.text().unwrap_or("").trim().to_string();
                    if name.is_empty() {
                        bail!("{}: <requirement> without a package name", self.path.display());
                    }
                    requirements.push(Requirement {
                        name,
                        kind: RequirementKind::from_type_attr(
                            node.attribute("type").unwrap_or("package"),
                        ),
                        version: node.attribute("version").map(str::to_string),
                    });
                }
                "container" => {
                    containers.push(Container {
                        kind: node.attribute("type").unwrap_or("docker").to_string(),
                        identifier: node.text().unwrap_or("").trim().to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok((requirements, containers))
    }
}

/// Cheap pre-parse check for tool files.
///
/// Matches a `<tool` tag open, not the bare substring, so files like
/// `tool_dependencies.xml` (root `<tool_dependency>`) never count.
fn looks_like_tool_xml(content: &str) -> bool {
    content.match_indices("<tool").any(|(i, matched)| {
        matches!(
            content.as_bytes().get(i + matched.len()),
            None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        )
    })
}

fn is_tool_file(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some("xml") {
        return false;
    }
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    match roxmltree::Document::parse(&content) {
        Ok(doc) => doc.root_element().tag_name().name() == "tool",
        // Unparseable files that still look like tools are yielded so
        // their parse error reaches the consumer instead of the file
        // silently vanishing from the walk
        Err(_) => looks_like_tool_xml(&content),
    }
}

/// Discover tool sources on the supplied paths.
///
/// Files are yielded directly; directories are walked recursively and
/// every file that looks like a Galaxy tool XML is yielded. The sequence
/// is lazy and sequential. Each item pairs the tool path with the result
/// of loading it, so a malformed tool surfaces to the consumer instead of
/// silently vanishing.
pub fn tool_sources_on_paths(
    paths: &[PathBuf],
) -> impl Iterator<Item = (PathBuf, Result<XmlToolSource>)> + '_ {
    paths.iter().flat_map(|path| {
        let files: Box<dyn Iterator<Item = PathBuf>> = if path.is_dir() {
            Box::new(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path())
                    .filter(|p| is_tool_file(p)),
            )
        } else {
            Box::new(std::iter::once(path.clone()))
        };
        files.map(|p| {
            let source = XmlToolSource::from_file(&p);
            (p, source)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tool(xml: &str) -> (Vec<Requirement>, Vec<Container>) {
        let source = XmlToolSource {
            path: PathBuf::from("test.xml"),
            content: xml.to_string(),
        };
        source.parse_requirements_and_containers().unwrap()
    }

    #[test]
    fn test_parse_requirements_and_containers() {
        let (requirements, containers) = parse_tool(
            r#"<tool id="seqtk_seq" name="seqtk">
                <requirements>
                    <requirement type="package" version="1.2">seqtk</requirement>
                    <container type="docker">quay.io/biocontainers/seqtk</container>
                </requirements>
            </tool>"#,
        );
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].name, "seqtk");
        assert_eq!(requirements[0].kind, RequirementKind::Package);
        assert_eq!(requirements[0].version.as_deref(), Some("1.2"));
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].kind, "docker");
        assert_eq!(containers[0].identifier, "quay.io/biocontainers/seqtk");
    }

    #[test]
    fn test_parse_tool_without_requirements_block() {
        let (requirements, containers) = parse_tool(r#"<tool id="no_reqs" name="bare"/>"#);
        assert!(requirements.is_empty());
        assert!(containers.is_empty());
    }

    #[test]
    fn test_requirement_type_defaults_to_package() {
        let (requirements, _) = parse_tool(
            r#"<tool id="t"><requirements>
                <requirement version="1.9">samtools</requirement>
            </requirements></tool>"#,
        );
        assert_eq!(requirements[0].kind, RequirementKind::Package);
    }

    #[test]
    fn test_set_environment_requirement_kept_as_other() {
        let (requirements, _) = parse_tool(
            r#"<tool id="t"><requirements>
                <requirement type="set_environment">R_SCRIPT_PATH</requirement>
            </requirements></tool>"#,
        );
        assert_eq!(
            requirements[0].kind,
            RequirementKind::Other("set_environment".to_string())
        );
    }

    #[test]
    fn test_non_tool_root_is_an_error() {
        let source = XmlToolSource {
            path: PathBuf::from("macros.xml"),
            content: "<macros><xml name=\"requirements\"/></macros>".to_string(),
        };
        assert!(source.parse_requirements_and_containers().is_err());
    }

    #[test]
    fn test_malformed_xml_propagates() {
        let source = XmlToolSource {
            path: PathBuf::from("broken.xml"),
            content: "<tool><requirements>".to_string(),
        };
        assert!(source.parse_requirements_and_containers().is_err());
    }

    #[test]
    fn test_looks_like_tool_xml_requires_tag_open() {
        assert!(looks_like_tool_xml("<tool id=\"t\">"));
        assert!(looks_like_tool_xml("<tool>\n</tool>"));
        assert!(looks_like_tool_xml("<tool/>"));
        assert!(!looks_like_tool_xml("<tool_dependency>"));
        assert!(!looks_like_tool_xml("<toolbox monitor=\"true\">"));
    }

    #[test]
    fn test_is_tool_file_checks_root_element() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("seqtk_seq.xml");
        fs::write(&tool, "<tool id=\"seqtk_seq\" name=\"seqtk\"/>").unwrap();
        assert!(is_tool_file(&tool));

        let deps = dir.path().join("tool_dependencies.xml");
        fs::write(&deps, "<tool_dependency><package>seqtk</package></tool_dependency>").unwrap();
        assert!(!is_tool_file(&deps));

        // Malformed files that look like tools stay discoverable so the
        // parse error propagates downstream
        let broken = dir.path().join("broken.xml");
        fs::write(&broken, "<tool id=\"broken\"><requirements>").unwrap();
        assert!(is_tool_file(&broken));
    }

    #[test]
    fn test_empty_requirement_name_is_an_error() {
        let source = XmlToolSource {
            path: PathBuf::from("empty.xml"),
            content: r#"<tool id="t"><requirements>
                <requirement type="package" version="1.0"></requirement>
            </requirements></tool>"#
                .to_string(),
        };
        assert!(source.parse_requirements_and_containers().is_err());
    }
}
