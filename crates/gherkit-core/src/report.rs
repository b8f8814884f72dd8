//! Report renderer
//!
//! Substitutes bracketed tokens into three nested templates: every tested
//! scenario gets a fragment from the scenario template, every feature with a
//! tested scenario gets a fragment from the feature template (with its
//! scenario fragments concatenated into `[ScenarioSection]`), and the project
//! template receives the aggregate counts plus the feature fragments.
//!
//! Token matching is case-insensitive and replaces every occurrence in a
//! single pass, so a token may appear any number of times in a template and
//! a substituted value containing the token text is left alone.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::message::Error;
use crate::model::Project;
use crate::text::{contains_ci, replace_token};
use crate::xml::read_file;

const TOKEN_SCENARIO_TITLE: &str = "[ScenarioTitle]";
const TOKEN_SCENARIO_DESCRIPTION: &str = "[ScenarioDescription]";
const TOKEN_SCENARIO_PASSED: &str = "[ScenarioPassed]";
const TOKEN_SCENARIO_ERROR: &str = "[ScenarioErrorDescription]";
const TOKEN_FEATURE_TITLE: &str = "[FeatureTitle]";
const TOKEN_FEATURE_USER_STORY: &str = "[FeatureUserStory]";
const TOKEN_FEATURE_TOTAL_SCENARIOS: &str = "[FeatureTotalScenarios]";
const TOKEN_FEATURE_SCENARIOS_PASSED: &str = "[FeatureScenariosPassed]";
const TOKEN_FEATURE_SUCCESS_RATE: &str = "[FeatureSuccessRate]";
const TOKEN_SCENARIO_SECTION: &str = "[ScenarioSection]";
const TOKEN_PROJECT_NAME: &str = "[ProjectName]";
const TOKEN_PROJECT_DESCRIPTION: &str = "[ProjectDescription]";
const TOKEN_SUMMARY_TOTAL_FEATURES: &str = "[SummaryTotalFeatures]";
const TOKEN_SUMMARY_TOTAL_SCENARIOS: &str = "[SummaryTotalScenarios]";
const TOKEN_SUMMARY_SCENARIOS_PASSED: &str = "[SummaryScenariosPassed]";
const TOKEN_SUMMARY_SUCCESS_RATE: &str = "[SummarySuccessRate]";
const TOKEN_FEATURE_SECTION: &str = "[FeatureSection]";
const TOKEN_CREATION_DATE: &str = "[CreationDate]";
const TOKEN_CREATION_TIME: &str = "[CreationTime]";

/// Pass/fail indicator texts, injected so the renderer carries no
/// process-wide resource state.
#[derive(Debug, Clone)]
pub struct Labels {
    pub passed: String,
    pub not_passed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            passed: "Yes".into(),
            not_passed: "No".into(),
        }
    }
}

/// The three template texts, inner to outer.
#[derive(Debug, Clone)]
pub struct Templates {
    pub scenario: String,
    pub feature: String,
    pub report: String,
}

impl Templates {
    /// Load the three templates, failing when any file is missing.
    pub fn load(scenario: &Path, feature: &Path, report: &Path) -> Result<Self, Error> {
        if !scenario.is_file() || !feature.is_file() || !report.is_file() {
            return Err(Error::ReportTemplateNotFound);
        }
        Ok(Self {
            scenario: read_file(scenario)?,
            feature: read_file(feature)?,
            report: read_file(report)?,
        })
    }
}

/// Render the full project report, stamping the current local time.
///
/// Fragment strings are stored back onto the scenarios, features and the
/// project; rendering again overwrites them.
pub fn render(project: &mut Project, templates: &Templates, labels: &Labels) -> String {
    render_at(project, templates, labels, Local::now())
}

/// Load templates from disk and render.
pub fn render_from_files(
    project: &mut Project,
    scenario: &Path,
    feature: &Path,
    report: &Path,
    labels: &Labels,
) -> Result<String, Error> {
    let templates = Templates::load(scenario, feature, report)?;
    Ok(render(project, &templates, labels))
}

fn render_at(
    project: &mut Project,
    templates: &Templates,
    labels: &Labels,
    now: DateTime<Local>,
) -> String {
    render_scenarios(project, &templates.scenario, labels);
    render_features(project, &templates.feature);
    render_project(project, &templates.report, now)
}

/// Scenario pass: only scenarios with a test receive a fragment.
fn render_scenarios(project: &mut Project, template: &str, labels: &Labels) {
    for feature in &mut project.features {
        for scenario in &mut feature.scenarios {
            if !scenario.has_test {
                scenario.report = None;
                continue;
            }
            let label = if scenario.passed {
                &labels.passed
            } else {
                &labels.not_passed
            };
            let mut fragment = replace_token(template, TOKEN_SCENARIO_TITLE, &scenario.title);
            fragment = replace_token(&fragment, TOKEN_SCENARIO_DESCRIPTION, &scenario.description);
            fragment = replace_token(&fragment, TOKEN_SCENARIO_PASSED, label);
            fragment = replace_token(
                &fragment,
                TOKEN_SCENARIO_ERROR,
                scenario.error_description.as_deref().unwrap_or_default(),
            );
            scenario.report = Some(fragment);
        }
    }
}

/// Feature pass: features with zero tested scenarios are skipped entirely.
fn render_features(project: &mut Project, template: &str) {
    for feature in &mut project.features {
        let total = feature.tested_count();
        if total == 0 {
            feature.report = None;
            continue;
        }
        let passed = feature.passed_count();

        let mut fragment = replace_token(template, TOKEN_FEATURE_TITLE, &feature.title);
        fragment = replace_token(&fragment, TOKEN_FEATURE_USER_STORY, &feature.user_story);
        fragment = replace_token(&fragment, TOKEN_FEATURE_TOTAL_SCENARIOS, &total.to_string());
        fragment = replace_token(
            &fragment,
            TOKEN_FEATURE_SCENARIOS_PASSED,
            &passed.to_string(),
        );
        fragment = replace_token(
            &fragment,
            TOKEN_FEATURE_SUCCESS_RATE,
            &success_rate(total, passed),
        );

        if contains_ci(&fragment, TOKEN_SCENARIO_SECTION) {
            let scenarios: String = feature
                .scenarios
                .iter()
                .filter_map(|s| s.report.as_deref())
                .collect();
            fragment = replace_token(&fragment, TOKEN_SCENARIO_SECTION, &scenarios);
        }

        feature.report = Some(fragment);
    }
}

/// Project pass: aggregates across all features, counting only tested ones.
fn render_project(project: &mut Project, template: &str, now: DateTime<Local>) -> String {
    let mut content = replace_token(template, TOKEN_PROJECT_NAME, &project.name);
    content = replace_token(&content, TOKEN_PROJECT_DESCRIPTION, &project.description);
    content = replace_token(
        &content,
        TOKEN_SUMMARY_TOTAL_FEATURES,
        &project.tested_feature_count().to_string(),
    );

    let has_feature_section = contains_ci(&content, TOKEN_FEATURE_SECTION);
    let has_scenario_section = contains_ci(&content, TOKEN_SCENARIO_SECTION);

    let mut total = 0usize;
    let mut passed = 0usize;
    let mut feature_content = String::new();
    let mut scenario_content = String::new();

    for feature in &project.features {
        total += feature.tested_count();
        passed += feature.passed_count();

        if has_feature_section {
            if let Some(report) = &feature.report {
                feature_content.push_str(report);
            }
            if has_scenario_section {
                for scenario in &feature.scenarios {
                    if let Some(report) = &scenario.report {
                        scenario_content.push_str(report);
                    }
                }
            }
        }
    }

    content = replace_token(&content, TOKEN_SUMMARY_TOTAL_SCENARIOS, &total.to_string());
    content = replace_token(&content, TOKEN_SUMMARY_SCENARIOS_PASSED, &passed.to_string());
    content = replace_token(
        &content,
        TOKEN_SUMMARY_SUCCESS_RATE,
        &success_rate(total, passed),
    );
    content = replace_token(&content, TOKEN_FEATURE_SECTION, &feature_content);
    content = replace_token(&content, TOKEN_SCENARIO_SECTION, &scenario_content);
    content = replace_token(
        &content,
        TOKEN_CREATION_DATE,
        &now.format("%A, %-d %B %Y").to_string(),
    );
    content = replace_token(&content, TOKEN_CREATION_TIME, &now.format("%H:%M:%S").to_string());

    project.report = Some(content.clone());
    content
}

/// Integer percentage with a zero-denominator guard.
fn success_rate(total: usize, passed: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", passed * 100 / total)
}
