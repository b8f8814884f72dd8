//! In-memory representation of a tested project
//!
//! A [`Project`] owns its [`Feature`]s, a feature owns its [`Scenario`]s, and
//! the vectors preserve document order throughout. The pipeline stages take
//! the project by value and hand it back enriched; nothing here performs I/O.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

/// One test scenario, extracted from a `@Scenario:`-tagged method.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// Title from the doc-comment summary, HTML-encoded.
    pub title: String,
    /// Gherkin body from the doc-comment remarks, HTML-encoded with
    /// line-break markup.
    pub description: String,
    /// Qualified `Class.Method` name, the join key to test results.
    pub member_name: String,
    /// Whether a test-result entry matched this scenario.
    pub has_test: bool,
    /// Whether the matched test passed.
    pub passed: bool,
    /// Failure message or fallback outcome, HTML-encoded.
    pub error_description: Option<String>,
    /// Rendered report fragment, populated by the report pass.
    pub report: Option<String>,
}

/// One BDD feature, extracted from a `@Feature:`-tagged class.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    /// Title from the doc-comment summary, HTML-encoded.
    pub title: String,
    /// User story from the doc-comment remarks, HTML-encoded with
    /// line-break markup.
    pub user_story: String,
    /// Qualified class name, the join key to test-class names.
    pub member_name: String,
    /// Scenarios in document order.
    pub scenarios: Vec<Scenario>,
    /// Rendered report fragment, populated by the report pass.
    pub report: Option<String>,
}

impl Feature {
    /// Number of scenarios a test-result entry matched.
    pub fn tested_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.has_test).count()
    }

    /// Number of matched scenarios whose test passed.
    pub fn passed_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|s| s.has_test && s.passed)
            .count()
    }

    /// Look up a scenario by its qualified member name.
    pub fn find_scenario_mut(&mut self, member_name: &str) -> Option<&mut Scenario> {
        self.scenarios
            .iter_mut()
            .find(|s| s.member_name == member_name)
    }

    /// Whether any scenario of this feature carries the given member name.
    pub fn contains_scenario(&self, member_name: &str) -> bool {
        self.scenarios.iter().any(|s| s.member_name == member_name)
    }
}

/// The root aggregate threaded through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Assembly name from the documentation file.
    pub name: String,
    /// Free text; the correlator overwrites it with a category-filter label.
    pub description: String,
    /// Documentation-file path resolved from the build-project file.
    pub documentation_file: Option<PathBuf>,
    /// Start of the test-run window.
    pub start_time: Option<DateTime<FixedOffset>>,
    /// End of the test-run window.
    pub finish_time: Option<DateTime<FixedOffset>>,
    /// Features in document order.
    pub features: Vec<Feature>,
    /// Fully rendered report, populated by the report pass.
    pub report: Option<String>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Features with at least one tested scenario.
    pub fn tested_feature_count(&self) -> usize {
        self.features.iter().filter(|f| f.tested_count() > 0).count()
    }

    /// Tested scenarios across all features.
    pub fn tested_scenario_count(&self) -> usize {
        self.features.iter().map(Feature::tested_count).sum()
    }

    /// Passed scenarios across all features.
    pub fn passed_scenario_count(&self) -> usize {
        self.features.iter().map(Feature::passed_count).sum()
    }

    /// Look up a feature by its qualified class name.
    pub fn find_feature_mut(&mut self, member_name: &str) -> Option<&mut Feature> {
        self.features
            .iter_mut()
            .find(|f| f.member_name == member_name)
    }
}
