//! gherkit-core - BDD report generation from XML documentation comments
//!
//! This crate provides the building blocks for:
//! - Extracting `@Feature:`/`@Scenario:`-tagged members from a compiler-emitted
//!   XML documentation file
//! - Correlating the extracted scenarios against a test-run result file by
//!   qualified member name
//! - Rendering the correlated hierarchy into an HTML report through
//!   token-substitution templates
//!
//! # Markers
//!
//! A feature is a class whose doc-comment summary carries `@Feature:`; its
//! remarks hold the user story. A scenario is a method of that class whose
//! summary carries `@Scenario:`; its remarks hold the Gherkin body:
//!
//! ```xml
//! <member name="T:Calculator.AdditionTests">
//!     <summary>@Feature: Adding numbers</summary>
//!     <remarks>
//!     As a math student
//!     I want to add two numbers
//!     So that I avoid silly mistakes
//!     </remarks>
//! </member>
//! ```
//!
//! # Pipeline
//!
//! Each stage takes the [`Project`] by value and returns it enriched, or the
//! first fatal [`Error`]. The caller chains stages with `?`:
//!
//! ```no_run
//! use std::path::Path;
//! use gherkit_core::{
//!     Error, Labels, Project, correlate_results, parse_documentation,
//!     parse_project_file, render_from_files,
//! };
//!
//! fn run() -> Result<String, Error> {
//!     let project = parse_project_file(Project::new(), Path::new("Calculator.csproj"))?;
//!     let doc_file = project.documentation_file.clone().unwrap();
//!     let project = parse_documentation(project, &doc_file)?;
//!     let mut project = correlate_results(project, Path::new("latest.trx"), None)?;
//!
//!     render_from_files(
//!         &mut project,
//!         Path::new("templates/scenario.html"),
//!         Path::new("templates/feature.html"),
//!         Path::new("templates/report.html"),
//!         &Labels::default(),
//!     )
//! }
//! ```

mod doc;
mod locate;
mod message;
mod model;
mod project_file;
mod report;
mod results;
mod text;
mod xml;

pub use doc::{FEATURE_MARKER, SCENARIO_MARKER, parse_documentation};
pub use locate::{newest_project_file, newest_result_file};
pub use message::{Error, Severity};
pub use model::{Feature, Project, Scenario};
pub use project_file::parse_project_file;
pub use report::{Labels, Templates, render, render_from_files};
pub use results::correlate_results;
pub use text::{html_escape, replace_token};
