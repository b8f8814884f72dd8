//! Console output for the pipeline run

use std::path::Path;

use chrono::{DateTime, Local};
use eyre::Result;
use gherkit_core::{Project, Severity};
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn write_starting_message(started: DateTime<Local>) {
    eprintln!(
        "{} gherkit starting at {}",
        "->".blue().bold(),
        started.format("%H:%M:%S")
    );
}

pub fn write_ending_message(started: DateTime<Local>) {
    let ms = Local::now()
        .signed_duration_since(started)
        .num_milliseconds()
        .max(0);
    eprintln!(
        "{} finished in {}.{:03}s",
        "->".blue().bold(),
        ms / 1000,
        ms % 1000
    );
}

/// Print a pipeline diagnostic with its severity tag.
pub fn write_diagnostic(err: &gherkit_core::Error) {
    match err.severity() {
        Severity::Error => eprintln!("{} {}", "!".red().bold(), err),
        Severity::Warning => eprintln!("{} {}", "!".yellow().bold(), err),
        Severity::Information => eprintln!("{} {}", "->".blue().bold(), err),
    }
}

/// Machine-readable run summary for `--json`.
#[derive(Serialize)]
struct RunSummary<'a> {
    project: &'a str,
    description: &'a str,
    features: usize,
    scenarios: usize,
    passed: usize,
    success_rate: String,
    report: String,
}

pub fn write_json_summary(project: &Project, report_path: &Path) -> Result<()> {
    let scenarios = project.tested_scenario_count();
    let passed = project.passed_scenario_count();
    let success_rate = if scenarios == 0 {
        "0%".to_string()
    } else {
        format!("{}%", passed * 100 / scenarios)
    };

    let summary = RunSummary {
        project: &project.name,
        description: &project.description,
        features: project.tested_feature_count(),
        scenarios,
        passed,
        success_rate,
        report: report_path.display().to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
