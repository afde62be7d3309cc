//! pyproject.toml document building and editing
//!
//! The initial manifest is built from typed tables and serialized in one shot.
//! Later plugins (tests, static checkers, formatters) reload it as a generic
//! [`toml::Table`], insert their `tool.*` tables, and write it back.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::{
    BaseConfig, BuildBackend, DocsGenerator, Formatter, Layout, PyVersion, StaticChecker,
};
use crate::error::Result;

pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";
pub const README_FILE_NAME: &str = "README.md";

/// Inputs the manifest plugin needs, sliced from the project configuration
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    pub layout: Layout,
    pub min_py_version: PyVersion,
    pub build_backend: Option<BuildBackend>,
    pub pkg_license: String,
    pub static_code_checkers: Vec<StaticChecker>,
    pub formatters: Vec<Formatter>,
    pub docs: Option<DocsGenerator>,
    pub dynamic_version: bool,
}

#[derive(Debug, Serialize)]
pub struct PyProject {
    #[serde(rename = "build-system")]
    build_system: BuildSystem,
    project: ProjectTable,
    #[serde(rename = "dependency-groups")]
    dependency_groups: DependencyGroups,
    tool: toml::Table,
}

#[derive(Debug, Serialize)]
struct BuildSystem {
    requires: Vec<String>,
    #[serde(rename = "build-backend")]
    build_backend: String,
}

#[derive(Debug, Serialize)]
struct NameContact {
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct ProjectTable {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    description: String,
    readme: String,
    #[serde(rename = "requires-python")]
    requires_python: String,
    license: String,
    #[serde(rename = "license-files")]
    license_files: Vec<String>,
    authors: Vec<NameContact>,
    maintainers: Vec<NameContact>,
    keywords: Vec<String>,
    classifiers: Vec<String>,
    urls: ProjectUrls,
    dependencies: Vec<String>,
    #[serde(rename = "optional-dependencies")]
    optional_dependencies: toml::Table,
    dynamic: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ProjectUrls {
    homepage: String,
    source: String,
    download: String,
    changelog: String,
    releasenotes: String,
    documentation: String,
    issues: String,
    funding: String,
}

impl Default for ProjectUrls {
    fn default() -> Self {
        let todo = || "https://todo.com".to_string();
        Self {
            homepage: todo(),
            source: todo(),
            download: todo(),
            changelog: todo(),
            releasenotes: todo(),
            documentation: todo(),
            issues: todo(),
            funding: todo(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DependencyGroups {
    tests: Vec<String>,
    static_checkers: Vec<String>,
    formatters: Vec<String>,
    docs: Vec<String>,
}

/// Build the manifest document for a new project
pub fn build_document(base: &BaseConfig, config: &ManifestConfig) -> PyProject {
    let build_system = match config.build_backend {
        Some(backend) => BuildSystem {
            requires: backend.requires().iter().map(|s| s.to_string()).collect(),
            build_backend: backend.entry_point().to_string(),
        },
        None => BuildSystem {
            requires: Vec::new(),
            build_backend: String::new(),
        },
    };

    let contact = NameContact {
        name: base.user.author.clone(),
        email: base.user.author_email.clone(),
    };
    let maintainer = NameContact {
        name: base.user.author.clone(),
        email: base.user.author_email.clone(),
    };

    let (version, dynamic) = if config.dynamic_version {
        (None, vec!["version".to_string()])
    } else {
        (Some("0.0.0".to_string()), Vec::new())
    };

    let project = ProjectTable {
        name: base.project_name.clone(),
        version,
        description: String::new(),
        readme: README_FILE_NAME.to_string(),
        requires_python: format!(">={}", config.min_py_version.as_str()),
        license: config.pkg_license.clone(),
        license_files: Vec::new(),
        authors: vec![contact],
        maintainers: vec![maintainer],
        keywords: Vec::new(),
        classifiers: Vec::new(),
        urls: ProjectUrls::default(),
        dependencies: Vec::new(),
        optional_dependencies: toml::Table::new(),
        dynamic,
    };

    let dependency_groups = DependencyGroups {
        tests: vec!["pytest".to_string()],
        static_checkers: config
            .static_code_checkers
            .iter()
            .map(|c| c.package_name().to_string())
            .collect(),
        formatters: config
            .formatters
            .iter()
            .map(|f| f.package_name().to_string())
            .collect(),
        docs: config
            .docs
            .iter()
            .map(|d| d.package_name().to_string())
            .collect(),
    };

    let mut tool = toml::Table::new();
    if config.build_backend == Some(BuildBackend::Hatchling) {
        tool.insert("hatch".to_string(), hatch_table(base, config.layout));
    }

    PyProject {
        build_system,
        project,
        dependency_groups,
        tool,
    }
}

/// `tool.hatch` build targets: sdist includes the docs, wheel ships the package
fn hatch_table(base: &BaseConfig, layout: Layout) -> toml::Value {
    let package_path = match layout {
        Layout::Src => format!("src/{}", base.package_folder_name()),
        Layout::Flat => base.package_folder_name(),
    };

    let mut sdist = toml::Table::new();
    sdist.insert(
        "include".to_string(),
        toml::Value::Array(vec![
            toml::Value::String("README.md".to_string()),
            toml::Value::String("LICENSE".to_string()),
            toml::Value::String("CHANGELOG.md".to_string()),
        ]),
    );
    sdist.insert("exclude".to_string(), toml::Value::Array(Vec::new()));

    let mut wheel = toml::Table::new();
    wheel.insert(
        "packages".to_string(),
        toml::Value::Array(vec![toml::Value::String(package_path)]),
    );

    let mut targets = toml::Table::new();
    targets.insert("sdist".to_string(), toml::Value::Table(sdist));
    targets.insert("wheel".to_string(), toml::Value::Table(wheel));

    let mut build = toml::Table::new();
    build.insert("targets".to_string(), toml::Value::Table(targets));

    let mut hatch = toml::Table::new();
    hatch.insert("build".to_string(), toml::Value::Table(build));
    toml::Value::Table(hatch)
}

/// Serialize the initial manifest
pub fn render(doc: &PyProject) -> Result<String> {
    Ok(toml::to_string_pretty(doc)?)
}

/// Reload the generated manifest for a read-modify-write edit
pub fn load(project_root: &Path) -> Result<toml::Table> {
    let contents = fs::read_to_string(project_root.join(PYPROJECT_FILE_NAME))?;
    Ok(toml::from_str(&contents)?)
}

/// Write the manifest back after an edit
pub fn store(project_root: &Path, manifest: &toml::Table) -> Result<()> {
    let contents = toml::to_string_pretty(manifest)?;
    fs::write(project_root.join(PYPROJECT_FILE_NAME), contents)?;
    Ok(())
}

/// Fetch (creating if needed) the `[tool]` table of a loaded manifest
pub fn tool_table(manifest: &mut toml::Table) -> &mut toml::Table {
    let entry = manifest
        .entry("tool".to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    if !entry.is_table() {
        *entry = toml::Value::Table(toml::Table::new());
    }
    match entry {
        toml::Value::Table(table) => table,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use std::path::PathBuf;

    fn base() -> BaseConfig {
        BaseConfig {
            project_root: PathBuf::from("/tmp/demo"),
            project_name: "demo".to_string(),
            user: UserConfig {
                author: "Jane Doe".to_string(),
                author_email: "jane@example.com".to_string(),
            },
        }
    }

    fn manifest_config() -> ManifestConfig {
        ManifestConfig {
            layout: Layout::Src,
            min_py_version: PyVersion::Py310,
            build_backend: Some(BuildBackend::Hatchling),
            pkg_license: "MIT".to_string(),
            static_code_checkers: vec![StaticChecker::Flake8, StaticChecker::Mypy],
            formatters: vec![Formatter::Ruff],
            docs: Some(DocsGenerator::Mkdocs),
            dynamic_version: false,
        }
    }

    fn rendered_table(config: &ManifestConfig) -> toml::Table {
        let rendered = render(&build_document(&base(), config)).unwrap();
        toml::from_str(&rendered).unwrap()
    }

    #[test]
    fn hatchling_manifest_has_build_system_and_hatch_tables() {
        let manifest = rendered_table(&manifest_config());

        assert_eq!(
            manifest["build-system"]["requires"][0].as_str(),
            Some("hatchling")
        );
        assert_eq!(
            manifest["build-system"]["build-backend"].as_str(),
            Some("hatchling.build")
        );
        assert_eq!(
            manifest["project"]["requires-python"].as_str(),
            Some(">=3.10")
        );
        assert_eq!(
            manifest["project"]["authors"][0]["name"].as_str(),
            Some("Jane Doe")
        );
        assert_eq!(manifest["project"]["version"].as_str(), Some("0.0.0"));
        assert_eq!(
            manifest["tool"]["hatch"]["build"]["targets"]["wheel"]["packages"][0].as_str(),
            Some("src/demo")
        );
    }

    #[test]
    fn no_backend_leaves_build_system_empty() {
        let mut config = manifest_config();
        config.build_backend = None;
        let manifest = rendered_table(&config);

        assert!(manifest["build-system"]["requires"]
            .as_array()
            .unwrap()
            .is_empty());
        assert_eq!(manifest["build-system"]["build-backend"].as_str(), Some(""));
        let tool = manifest.get("tool").and_then(|t| t.as_table());
        assert!(tool.map_or(true, |t| !t.contains_key("hatch")));
    }

    #[test]
    fn dynamic_version_omits_the_static_one() {
        let mut config = manifest_config();
        config.dynamic_version = true;
        let manifest = rendered_table(&config);

        assert_eq!(
            manifest["project"]["dynamic"][0].as_str(),
            Some("version")
        );
        assert!(!manifest["project"]
            .as_table()
            .unwrap()
            .contains_key("version"));
    }

    #[test]
    fn dependency_groups_follow_the_selection() {
        let manifest = rendered_table(&manifest_config());
        let groups = manifest["dependency-groups"].as_table().unwrap();

        assert_eq!(groups["tests"][0].as_str(), Some("pytest"));
        assert_eq!(groups["static_checkers"][0].as_str(), Some("flake8"));
        assert_eq!(groups["static_checkers"][1].as_str(), Some("mypy"));
        assert_eq!(groups["formatters"][0].as_str(), Some("ruff"));
        assert_eq!(groups["docs"][0].as_str(), Some("mkdocs"));
    }

    #[test]
    fn flat_layout_ships_the_top_level_package() {
        let mut config = manifest_config();
        config.layout = Layout::Flat;
        let manifest = rendered_table(&config);
        assert_eq!(
            manifest["tool"]["hatch"]["build"]["targets"]["wheel"]["packages"][0].as_str(),
            Some("demo")
        );
    }

    #[test]
    fn tool_table_is_created_on_demand() {
        let mut manifest = toml::Table::new();
        tool_table(&mut manifest).insert(
            "mypy".to_string(),
            toml::Value::Table(toml::Table::new()),
        );
        assert!(manifest["tool"].as_table().unwrap().contains_key("mypy"));
    }
}
