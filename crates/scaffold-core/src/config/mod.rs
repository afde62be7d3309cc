//! Configuration types shared across plugins and the prompt layer

pub mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity of the person scaffolding projects, used for manifest authorship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserConfig {
    pub author: String,
    pub author_email: String,
}

/// Shared, read-only context passed to every plugin.
///
/// Owned by the orchestrator and built fresh per invocation; plugins never
/// mutate it.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// Absolute path of the directory the project is scaffolded into
    pub project_root: PathBuf,
    pub project_name: String,
    pub user: UserConfig,
}

impl BaseConfig {
    /// Importable package folder name (dashes are not valid in Python modules)
    pub fn package_folder_name(&self) -> String {
        self.project_name.replace('-', "_")
    }
}

/// Source tree layout of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Src,
    Flat,
}

/// Minimum Python version supported by the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PyVersion {
    #[serde(rename = "3.9")]
    Py39,
    #[serde(rename = "3.10")]
    Py310,
    #[serde(rename = "3.11")]
    Py311,
    #[serde(rename = "3.12")]
    Py312,
    #[serde(rename = "3.13")]
    Py313,
}

impl PyVersion {
    pub const ALL: [PyVersion; 5] = [
        PyVersion::Py39,
        PyVersion::Py310,
        PyVersion::Py311,
        PyVersion::Py312,
        PyVersion::Py313,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PyVersion::Py39 => "3.9",
            PyVersion::Py310 => "3.10",
            PyVersion::Py311 => "3.11",
            PyVersion::Py312 => "3.12",
            PyVersion::Py313 => "3.13",
        }
    }

    /// Versions the CI matrix should cover: this one and everything newer
    pub fn supported_versions(&self) -> Vec<&'static str> {
        PyVersion::ALL
            .iter()
            .filter(|v| **v >= *self)
            .map(PyVersion::as_str)
            .collect()
    }
}

impl PartialOrd for PyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PyVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

/// PEP 517 build backend for packaging the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildBackend {
    Hatchling,
    Setuptools,
    #[serde(rename = "Poetry-core")]
    PoetryCore,
    #[serde(rename = "PDM-backend")]
    PdmBackend,
    #[serde(rename = "Flit-core")]
    FlitCore,
}

impl BuildBackend {
    /// `[build-system] requires` entries for this backend
    pub fn requires(&self) -> &'static [&'static str] {
        match self {
            BuildBackend::Hatchling => &["hatchling"],
            BuildBackend::Setuptools => &["setuptools"],
            BuildBackend::PoetryCore => &["poetry-core"],
            BuildBackend::PdmBackend => &["pdm.backend"],
            BuildBackend::FlitCore => &["flit-core"],
        }
    }

    /// `[build-system] build-backend` entry point for this backend
    pub fn entry_point(&self) -> &'static str {
        match self {
            BuildBackend::Hatchling => "hatchling.build",
            BuildBackend::Setuptools => "setuptools.build_meta",
            BuildBackend::PoetryCore => "poetry.core.masonry.api",
            BuildBackend::PdmBackend => "pdm.backend",
            BuildBackend::FlitCore => "flit_core.buildapi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticChecker {
    Flake8,
    Mypy,
    Pyright,
    Pylint,
}

impl StaticChecker {
    pub fn package_name(&self) -> &'static str {
        match self {
            StaticChecker::Flake8 => "flake8",
            StaticChecker::Mypy => "mypy",
            StaticChecker::Pyright => "pyright",
            StaticChecker::Pylint => "pylint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    Ruff,
    Isort,
    Black,
}

impl Formatter {
    pub fn package_name(&self) -> &'static str {
        match self {
            Formatter::Ruff => "ruff",
            Formatter::Isort => "isort",
            Formatter::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellChecker {
    Cspell,
    Codespell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocsGenerator {
    Mkdocs,
    Sphinx,
}

impl DocsGenerator {
    pub fn package_name(&self) -> &'static str {
        match self {
            DocsGenerator::Mkdocs => "mkdocs",
            DocsGenerator::Sphinx => "sphinx",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeEditor {
    Vscode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudCodeBase {
    Github,
}

/// Whether tool configuration lives in `pyproject.toml` tables or in
/// stand-alone files next to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStyle {
    Pyproject,
    StandAlone,
}

/// Everything the user chose about the project being scaffolded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project_name: String,
    pub min_py_version: PyVersion,
    pub layout: Layout,
    pub build_backend: Option<BuildBackend>,
    pub pkg_license: String,
    pub static_code_checkers: Vec<StaticChecker>,
    pub formatters: Vec<Formatter>,
    pub spell_checker: Option<SpellChecker>,
    pub docs: Option<DocsGenerator>,
    pub code_editor: Option<CodeEditor>,
    pub pre_commit: bool,
    pub cloud_code_base: Option<CloudCodeBase>,
    pub configuration_preference: ConfigStyle,
    #[serde(default)]
    pub dynamic_version: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            min_py_version: PyVersion::Py310,
            layout: Layout::Src,
            build_backend: Some(BuildBackend::Hatchling),
            pkg_license: "MIT".to_string(),
            static_code_checkers: vec![
                StaticChecker::Flake8,
                StaticChecker::Mypy,
                StaticChecker::Pyright,
                StaticChecker::Pylint,
            ],
            formatters: vec![Formatter::Ruff, Formatter::Isort],
            spell_checker: Some(SpellChecker::Cspell),
            docs: Some(DocsGenerator::Mkdocs),
            code_editor: Some(CodeEditor::Vscode),
            pre_commit: true,
            cloud_code_base: Some(CloudCodeBase::Github),
            configuration_preference: ConfigStyle::Pyproject,
            dynamic_version: false,
        }
    }
}

/// Persisted tool configuration: the user identity plus the last project
/// configuration, reused as defaults on later runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub user_config: UserConfig,
    pub project_config: ProjectConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_versions_cover_newer_releases() {
        assert_eq!(
            PyVersion::Py311.supported_versions(),
            vec!["3.11", "3.12", "3.13"]
        );
        assert_eq!(PyVersion::Py313.supported_versions(), vec!["3.13"]);
    }

    #[test]
    fn backend_mapping_matches_packaging_conventions() {
        assert_eq!(BuildBackend::Hatchling.entry_point(), "hatchling.build");
        assert_eq!(
            BuildBackend::Setuptools.entry_point(),
            "setuptools.build_meta"
        );
        assert_eq!(BuildBackend::PoetryCore.requires(), &["poetry-core"]);
        assert_eq!(BuildBackend::PdmBackend.entry_point(), "pdm.backend");
    }

    #[test]
    fn package_folder_name_replaces_dashes() {
        let base = BaseConfig {
            project_root: PathBuf::from("/tmp/my-tool"),
            project_name: "my-tool".to_string(),
            user: UserConfig::default(),
        };
        assert_eq!(base.package_folder_name(), "my_tool");
    }

    #[test]
    fn project_config_round_trips_through_json() {
        let config = ProjectConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"3.10\""));
        assert!(json.contains("\"Hatchling\""));
        let back: ProjectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
