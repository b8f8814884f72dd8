//! Project-file resolver
//!
//! Reads the single piece of data the pipeline needs from a build-project
//! file: the documentation-file path, resolved against the project file's
//! parent directory.

use std::path::{Path, PathBuf};

use crate::message::Error;
use crate::model::Project;
use crate::xml::{element_text, parse_document, read_file};

const DOCUMENTATION_FILE_TAG: &str = "DocumentationFile";

/// Populate the project's documentation-file path from a build-project file.
pub fn parse_project_file(mut project: Project, path: &Path) -> Result<Project, Error> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = read_file(path)?;
    let value = documentation_file_value(&content, path)?;
    if value.is_empty() {
        return Err(Error::NoDocumentationFileInProject {
            path: path.to_path_buf(),
        });
    }

    project.documentation_file = Some(resolve_against_parent(path, &value));
    Ok(project)
}

fn documentation_file_value(content: &str, path: &Path) -> Result<String, Error> {
    let doc = parse_document(content, path)?;
    let element = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == DOCUMENTATION_FILE_TAG)
        .ok_or_else(|| Error::NoDocumentationFileInProject {
            path: path.to_path_buf(),
        })?;
    Ok(element_text(element).trim().to_string())
}

/// Build-project files carry Windows-style relative paths.
fn resolve_against_parent(project_file: &Path, value: &str) -> PathBuf {
    let relative = value.replace('\\', "/");
    match project_file.parent() {
        Some(parent) => parent.join(relative),
        None => PathBuf::from(relative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    const PROJECT_XML: &str = indoc! {r#"
        <Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
            <PropertyGroup>
                <OutputType>Library</OutputType>
                <DocumentationFile>bin\Debug\CalculatorTests.xml</DocumentationFile>
            </PropertyGroup>
        </Project>
    "#};

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn documentation_path_is_resolved_against_the_project_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "Calculator.csproj", PROJECT_XML);

        let project = parse_project_file(Project::new(), &path).unwrap();
        assert_eq!(
            project.documentation_file.unwrap(),
            dir.path().join("bin/Debug/CalculatorTests.xml")
        );
    }

    #[test]
    fn namespaced_elements_are_found_by_local_name() {
        // The xmlns on the fixture is the point of this test: lookup must
        // ignore the namespace.
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "Calculator.csproj", PROJECT_XML);
        assert!(parse_project_file(Project::new(), &path).is_ok());
    }

    #[test]
    fn missing_file_is_a_file_not_found_error() {
        let err = parse_project_file(Project::new(), Path::new("/nonexistent/x.csproj"))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn absent_documentation_element_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "Calculator.csproj",
            "<Project><PropertyGroup/></Project>",
        );
        let err = parse_project_file(Project::new(), &path).unwrap_err();
        assert!(matches!(err, Error::NoDocumentationFileInProject { .. }));
    }

    #[test]
    fn blank_documentation_element_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "Calculator.csproj",
            "<Project><DocumentationFile>   </DocumentationFile></Project>",
        );
        let err = parse_project_file(Project::new(), &path).unwrap_err();
        assert!(matches!(err, Error::NoDocumentationFileInProject { .. }));
    }
}
