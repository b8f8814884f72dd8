//! Pipeline diagnostics
//!
//! Every expected failure mode of the pipeline is a variant here, with the
//! user-facing description attached as the `Display` format string. Stages
//! return `Result<Project, Error>`, so a run carries at most one fatal
//! diagnostic and the caller decides how to present it.

use std::path::PathBuf;

use thiserror::Error;

/// How a diagnostic should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// A fatal pipeline diagnostic.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file does not exist.
    #[error("file {} was not found", .path.display())]
    FileNotFound { path: PathBuf },

    /// The documentation file contains no `@Feature:`-tagged class.
    #[error("no features were found in documentation file {}", .path.display())]
    NoFeaturesFound { path: PathBuf },

    /// A tagged class has nothing after the feature marker in its summary.
    #[error("no title was found on the feature class {class}")]
    NoTitleOnFeature { class: String },

    /// A tagged class has no remarks to serve as its user story.
    #[error("no user story was found on the feature class {class}")]
    NoUserStoryOnFeature { class: String },

    /// A feature class has no `@Scenario:`-tagged methods.
    #[error("the feature '{title}' ({class}) has no scenarios associated")]
    NoScenariosOnFeature { title: String, class: String },

    /// A tagged method has nothing after the scenario marker in its summary.
    #[error("no title was found on the scenario method {member}")]
    NoTitleOnScenario { member: String },

    /// A tagged method has no remarks to serve as its Gherkin description.
    #[error("no description was found on the scenario '{title}' ({member})")]
    NoScenarioDescriptionOnMethod { title: String, member: String },

    /// A `@Scenario:`-tagged method belongs to no `@Feature:`-tagged class.
    #[error("no feature was found for the scenario '{title}'")]
    NoFeatureForScenario { title: String },

    /// The build-project file names no documentation file.
    #[error("no documentation file is configured in the project file {}", .path.display())]
    NoDocumentationFileInProject { path: PathBuf },

    /// Not a single scenario matched an entry in the result file.
    #[error(
        "no test results in {} matched a scenario from {}",
        .results.display(),
        .documentation.display()
    )]
    NoTestResultsFound {
        results: PathBuf,
        documentation: PathBuf,
    },

    /// One of the three report template files is missing.
    #[error("one or more report template files are missing")]
    ReportTemplateNotFound,

    /// The project directory holds no build-project file.
    #[error("no project file (*.csproj) was found in {}", .dir.display())]
    NoProjectFileFound { dir: PathBuf },

    /// The results directory holds no test-run result file.
    #[error("no test result file (*.trx) was found in {}", .dir.display())]
    NoResultFileFound { dir: PathBuf },

    /// The file exists but is not well-formed XML.
    #[error("malformed XML in {}: {source}", .path.display())]
    MalformedXml {
        path: PathBuf,
        source: roxmltree::Error,
    },

    /// A structurally required element is absent.
    #[error("{} is missing the required element <{element}>", .path.display())]
    MissingElement {
        path: PathBuf,
        element: &'static str,
    },

    /// A timestamp attribute did not parse as RFC 3339.
    #[error("could not parse the timestamp {value:?} in {}", .path.display())]
    BadTimestamp { path: PathBuf, value: String },

    /// An I/O failure outside the existence checks.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Severity of this diagnostic. All current variants abort the run.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}
