//! gherkit - Generate BDD reports from XML documentation comments
//!
//! gherkit reads the newest build-project file to find the XML documentation
//! export, mines it for `@Feature:`/`@Scenario:`-tagged members, correlates
//! the scenarios with the newest test-run result file, and renders the
//! hierarchy into an HTML report.

mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{Result, WrapErr};
use gherkit_core::{
    Labels, Project, Templates, correlate_results, newest_project_file, newest_result_file,
    parse_documentation, parse_project_file, render, render_from_files,
};
use owo_colors::OwoColorize;

const DEFAULT_SCENARIO_TEMPLATE: &str = include_str!("../templates/scenario.html");
const DEFAULT_FEATURE_TEMPLATE: &str = include_str!("../templates/feature.html");
const DEFAULT_REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

/// CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "gherkit",
    version,
    about = "Generate BDD test reports from XML documentation comments and test-run results"
)]
struct Args {
    /// Directory containing the build-project file (*.csproj)
    #[arg(long, value_name = "DIR")]
    project_dir: PathBuf,

    /// Directory containing the test-run result files (*.trx)
    #[arg(long, value_name = "DIR")]
    results_dir: PathBuf,

    /// Only correlate unit tests carrying this test category
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,

    /// Directory with scenario.html, feature.html and report.html
    /// (the built-in templates are used when omitted)
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Directory the report file is written to
    #[arg(long, value_name = "DIR", default_value = "reports")]
    out_dir: PathBuf,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    json: bool,
}

/// What stopped a run: an expected pipeline diagnostic, or anything else.
enum RunFailure {
    Pipeline(gherkit_core::Error),
    Fault(eyre::Report),
}

impl From<gherkit_core::Error> for RunFailure {
    fn from(err: gherkit_core::Error) -> Self {
        RunFailure::Pipeline(err)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let started = chrono::Local::now();
    output::write_starting_message(started);

    let outcome = run(&args);
    output::write_ending_message(started);

    match outcome {
        Ok(()) => Ok(()),
        Err(RunFailure::Pipeline(err)) => {
            output::write_diagnostic(&err);
            std::process::exit(1);
        }
        Err(RunFailure::Fault(report)) => Err(report),
    }
}

fn run(args: &Args) -> std::result::Result<(), RunFailure> {
    let project_file = newest_project_file(&args.project_dir)?;
    eprintln!(
        "{} Using project file {}",
        "->".blue().bold(),
        project_file.display()
    );
    let result_file = newest_result_file(&args.results_dir)?;
    eprintln!(
        "{} Using test results {}",
        "->".blue().bold(),
        result_file.display()
    );

    let project = parse_project_file(Project::new(), &project_file)?;
    let documentation_file = project.documentation_file.clone().unwrap_or_default();

    let project = parse_documentation(project, &documentation_file)?;
    eprintln!(
        "   Found {} features in {}",
        project.features.len().to_string().green(),
        documentation_file.display()
    );

    let mut project = correlate_results(project, &result_file, args.category.as_deref())?;
    eprintln!(
        "   {} of {} scenarios passed",
        project.passed_scenario_count().to_string().green(),
        project.tested_scenario_count()
    );

    let report = match &args.templates {
        Some(dir) => render_from_files(
            &mut project,
            &dir.join("scenario.html"),
            &dir.join("feature.html"),
            &dir.join("report.html"),
            &Labels::default(),
        )?,
        None => {
            let templates = Templates {
                scenario: DEFAULT_SCENARIO_TEMPLATE.to_string(),
                feature: DEFAULT_FEATURE_TEMPLATE.to_string(),
                report: DEFAULT_REPORT_TEMPLATE.to_string(),
            };
            render(&mut project, &templates, &Labels::default())
        }
    };

    let report_path = save_report(&args.out_dir, &project.name, &report)
        .map_err(RunFailure::Fault)?;
    eprintln!(
        "{} Report generated at {}",
        "OK".green().bold(),
        report_path.display()
    );

    if args.json {
        output::write_json_summary(&project, &report_path).map_err(RunFailure::Fault)?;
    }

    Ok(())
}

/// Write the report under `out_dir`, stamping the project name and time into
/// the file name.
fn save_report(out_dir: &Path, project_name: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("Failed to create {}", out_dir.display()))?;

    let name: String = project_name.chars().filter(|c| !c.is_whitespace()).collect();
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = out_dir.join(format!("gherkit-report-{name}-{stamp}.html"));

    std::fs::write(&path, content)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
