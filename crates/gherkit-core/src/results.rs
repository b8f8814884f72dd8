//! Test-result correlator
//!
//! Joins the entries of a test-run result file against the scenarios already
//! extracted from the documentation, by qualified member name. Entries whose
//! class or method matches no scenario are ignored without complaint: result
//! files routinely carry tests unrelated to any BDD scenario. The run fails
//! only when not a single scenario receives a match.

use std::path::Path;

use chrono::DateTime;
use tracing::debug;

use crate::message::Error;
use crate::model::Project;
use crate::text::html_escape;
use crate::xml::{child_element, descendant_element, element_text, parse_document, read_file};

/// Outcome literal marking a passed test. Exact, case-sensitive.
const PASSED_OUTCOME: &str = "Passed";

/// One `UnitTest` element, reduced to the fields the correlator reads.
struct UnitTestRecord {
    id: String,
    /// Test method name.
    name: String,
    /// Class part of the `className` attribute (text before the first comma).
    class_name: String,
    /// Values of the nested `TestCategoryItem` elements.
    categories: Vec<String>,
}

/// A `UnitTestResult` or fallback `TestResult` element.
struct OutcomeRecord {
    test_id: String,
    outcome: String,
    /// Failure text from the nested `Message` element, if any.
    message: Option<String>,
}

/// The result file reduced to typed records.
struct ResultsFile {
    start: Option<String>,
    finish: Option<String>,
    unit_tests: Vec<UnitTestRecord>,
    unit_test_results: Vec<OutcomeRecord>,
    test_results: Vec<OutcomeRecord>,
}

impl ResultsFile {
    fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let doc = parse_document(content, path)?;

        let times = descendant_element(doc.root(), "Times").ok_or(Error::MissingElement {
            path: path.to_path_buf(),
            element: "Times",
        })?;
        let start = times.attribute("start").map(str::to_string);
        let finish = times.attribute("finish").map(str::to_string);

        let mut unit_tests = Vec::new();
        let mut unit_test_results = Vec::new();
        let mut test_results = Vec::new();

        for node in doc.descendants().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "UnitTest" => {
                    let (Some(id), Some(name)) = (node.attribute("id"), node.attribute("name"))
                    else {
                        continue;
                    };
                    let class_name = descendant_element(node, "TestMethod")
                        .and_then(|m| m.attribute("className"))
                        .map(|v| v.split(',').next().unwrap_or("").to_string())
                        .unwrap_or_default();
                    let categories = child_element(node, "TestCategory")
                        .map(|cat| {
                            cat.children()
                                .filter(|c| c.is_element() && c.tag_name().name() == "TestCategoryItem")
                                .filter_map(|c| c.attribute("TestCategory"))
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    unit_tests.push(UnitTestRecord {
                        id: id.to_string(),
                        name: name.to_string(),
                        class_name,
                        categories,
                    });
                }
                "UnitTestResult" => {
                    if let Some(record) = outcome_record(node, true) {
                        unit_test_results.push(record);
                    }
                }
                "TestResult" => {
                    if let Some(record) = outcome_record(node, false) {
                        test_results.push(record);
                    }
                }
                _ => {}
            }
        }

        Ok(ResultsFile {
            start,
            finish,
            unit_tests,
            unit_test_results,
            test_results,
        })
    }
}

fn outcome_record(node: roxmltree::Node<'_, '_>, with_message: bool) -> Option<OutcomeRecord> {
    let test_id = node.attribute("testId")?.to_string();
    let outcome = node.attribute("outcome").unwrap_or_default().to_string();
    let message = if with_message {
        descendant_element(node, "Message").map(element_text)
    } else {
        None
    };
    Some(OutcomeRecord {
        test_id,
        outcome,
        message,
    })
}

/// Correlate a test-run result file against the project's scenarios.
///
/// With a non-blank `category` filter, only entries listing that category
/// participate; everything else behaves as if absent from the file.
pub fn correlate_results(
    mut project: Project,
    path: &Path,
    category: Option<&str>,
) -> Result<Project, Error> {
    // The category label replaces any prior description.
    project.description = match category {
        Some(cat) => format!("Filtered Category: {cat}"),
        None => String::new(),
    };
    let filter = category.map(str::trim).filter(|c| !c.is_empty());

    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = read_file(path)?;
    let results = ResultsFile::parse(&content, path)?;

    project.start_time = parse_timestamp(results.start.as_deref(), path)?;
    project.finish_time = parse_timestamp(results.finish.as_deref(), path)?;

    let mut any_matched = false;

    for unit_test in &results.unit_tests {
        if let Some(wanted) = filter {
            if !unit_test.categories.iter().any(|c| c.as_str() == wanted) {
                continue;
            }
        }

        let Some(feature) = project.find_feature_mut(&unit_test.class_name) else {
            continue;
        };
        let member_name = format!("{}.{}", unit_test.class_name, unit_test.name);
        let Some(scenario) = feature.find_scenario_mut(&member_name) else {
            continue;
        };

        match results
            .unit_test_results
            .iter()
            .find(|r| r.test_id == unit_test.id)
        {
            Some(result) => {
                scenario.passed = result.outcome == PASSED_OUTCOME;
                if !scenario.passed {
                    scenario.error_description =
                        Some(html_escape(result.message.as_deref().unwrap_or_default()));
                }
            }
            None => {
                // No detailed result: the plain result's outcome doubles as
                // the error description.
                scenario.error_description = results
                    .test_results
                    .iter()
                    .find(|r| r.test_id == unit_test.id)
                    .map(|r| html_escape(&r.outcome));
            }
        }

        scenario.has_test = true;
        any_matched = true;
    }

    if !any_matched {
        return Err(Error::NoTestResultsFound {
            results: path.to_path_buf(),
            documentation: project.documentation_file.clone().unwrap_or_default(),
        });
    }

    debug!(
        tested = project.tested_scenario_count(),
        passed = project.passed_scenario_count(),
        "test results correlated"
    );
    Ok(project)
}

fn parse_timestamp(
    value: Option<&str>,
    path: &Path,
) -> Result<Option<chrono::DateTime<chrono::FixedOffset>>, Error> {
    match value {
        None => Ok(None),
        Some(v) => DateTime::parse_from_rfc3339(v)
            .map(Some)
            .map_err(|_| Error::BadTimestamp {
                path: path.to_path_buf(),
                value: v.to_string(),
            }),
    }
}
