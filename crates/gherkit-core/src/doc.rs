//! Documentation extractor
//!
//! Mines a compiler-emitted XML documentation file for `@Feature:`-tagged
//! classes and `@Scenario:`-tagged methods, and builds the feature/scenario
//! hierarchy on the [`Project`]. Marker detection is case-insensitive;
//! extracted content keeps its original case and is HTML-encoded on the way
//! into the model.
//!
//! Member identifiers follow the documentation format: `T:<Class>` for a
//! type, `M:<Class>.<Method>` for a method. The stripped class name is the
//! join key used later by the test-result correlator.

use std::path::Path;

use tracing::debug;

use crate::message::Error;
use crate::model::{Feature, Project, Scenario};
use crate::text::{contains_ci, html_escape, starts_with_ci, story_to_html, text_after_marker};
use crate::xml::{child_element, descendant_element, element_text, parse_document, read_file};

/// Marker identifying a feature class inside a doc-comment summary.
pub const FEATURE_MARKER: &str = "@Feature:";
/// Marker identifying a scenario method inside a doc-comment summary.
pub const SCENARIO_MARKER: &str = "@Scenario:";

const CLASS_PREFIX: &str = "T:";
const METHOD_PREFIX: &str = "M:";

/// One `member` element, reduced to the fields the extractor reads.
struct DocMember {
    name: String,
    summary: String,
    remarks: Option<String>,
}

/// The documentation file reduced to typed records.
struct DocFile {
    assembly_name: String,
    members: Vec<DocMember>,
}

impl DocFile {
    fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let doc = parse_document(content, path)?;

        let assembly_name = descendant_element(doc.root(), "assembly")
            .and_then(|a| child_element(a, "name"))
            .map(element_text)
            .ok_or_else(|| Error::MissingElement {
                path: path.to_path_buf(),
                element: "assembly/name",
            })?;

        let members = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "member")
            .filter_map(|m| {
                let name = m.attribute("name")?.to_string();
                let summary = child_element(m, "summary")
                    .map(element_text)
                    .unwrap_or_default();
                let remarks = child_element(m, "remarks").map(element_text);
                Some(DocMember {
                    name,
                    summary,
                    remarks,
                })
            })
            .collect();

        Ok(DocFile {
            assembly_name,
            members,
        })
    }
}

/// Parse the XML documentation file into features and scenarios.
///
/// Returns the project enriched with every tagged feature in document order,
/// or the first fatal diagnostic encountered.
pub fn parse_documentation(project: Project, path: &Path) -> Result<Project, Error> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = read_file(path)?;
    parse_documentation_str(project, &content, path)
}

fn parse_documentation_str(
    mut project: Project,
    content: &str,
    path: &Path,
) -> Result<Project, Error> {
    let doc = DocFile::parse(content, path)?;
    project.name = doc.assembly_name.clone();

    let candidates: Vec<&DocMember> = doc
        .members
        .iter()
        .filter(|m| {
            starts_with_ci(&m.name, CLASS_PREFIX) && contains_ci(&m.summary, FEATURE_MARKER)
        })
        .collect();
    if candidates.is_empty() {
        return Err(Error::NoFeaturesFound {
            path: path.to_path_buf(),
        });
    }

    // Scenarios attached to a feature so far, for the orphan check below.
    let mut attached = 0usize;

    for member in candidates {
        let class = member.name[CLASS_PREFIX.len()..].to_string();

        let title = text_after_marker(&member.summary, FEATURE_MARKER).unwrap_or_default();
        if title.is_empty() {
            return Err(Error::NoTitleOnFeature { class });
        }

        let user_story = member
            .remarks
            .as_deref()
            .map(story_to_html)
            .unwrap_or_default();
        if user_story.is_empty() {
            return Err(Error::NoUserStoryOnFeature { class });
        }

        let method_prefix = format!("{METHOD_PREFIX}{class}");
        let methods: Vec<&DocMember> = doc
            .members
            .iter()
            .filter(|m| {
                starts_with_ci(&m.name, &method_prefix) && contains_ci(&m.summary, SCENARIO_MARKER)
            })
            .collect();
        if methods.is_empty() {
            return Err(Error::NoScenariosOnFeature { title, class });
        }

        let mut feature = Feature {
            title: html_escape(&title),
            user_story,
            member_name: class,
            scenarios: Vec::new(),
            report: None,
        };

        for method in methods {
            let member_name = method.name[METHOD_PREFIX.len()..].to_string();

            let title = text_after_marker(&method.summary, SCENARIO_MARKER).unwrap_or_default();
            if title.is_empty() {
                return Err(Error::NoTitleOnScenario {
                    member: member_name,
                });
            }

            let description = method
                .remarks
                .as_deref()
                .map(story_to_html)
                .unwrap_or_default();
            if description.is_empty() {
                return Err(Error::NoScenarioDescriptionOnMethod {
                    title,
                    member: member_name,
                });
            }

            feature.scenarios.push(Scenario {
                title: html_escape(&title),
                description,
                member_name,
                ..Scenario::default()
            });
            attached += 1;
        }

        project.features.push(feature);
    }

    // Scenarios whose enclosing class was never tagged with a feature marker
    // leave the raw count above the attached count.
    let raw_scenarios: Vec<&DocMember> = doc
        .members
        .iter()
        .filter(|m| contains_ci(&m.summary, SCENARIO_MARKER))
        .collect();
    if raw_scenarios.len() > attached {
        for raw in &raw_scenarios {
            let member_name = raw.name.get(METHOD_PREFIX.len()..).unwrap_or_default();
            if !project
                .features
                .iter()
                .any(|f| f.contains_scenario(member_name))
            {
                let title = text_after_marker(&raw.summary, SCENARIO_MARKER).unwrap_or_default();
                return Err(Error::NoFeatureForScenario { title });
            }
        }
    }

    debug!(
        features = project.features.len(),
        scenarios = attached,
        "documentation file parsed"
    );
    Ok(project)
}
