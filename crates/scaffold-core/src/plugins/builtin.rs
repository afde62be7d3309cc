//! Builtin configuration generators
//!
//! One plugin per generated artifact. Every plugin is registered on every run;
//! a plugin whose configuration deselects it (no docs generator, no cloud code
//! base, ...) simply returns without touching the file system. This keeps the
//! dependency graph identical across runs, so the resolved order never depends
//! on which options the user picked.

use std::fs;

use colored::Colorize;

use crate::config::{
    BaseConfig, CloudCodeBase, CodeEditor, ConfigStyle, DocsGenerator, Formatter, Layout,
    ProjectConfig, PyVersion, StaticChecker,
};
use crate::error::{Error, Result};
use crate::plugins::{Plugin, PluginId};
use crate::pyproject::{self, ManifestConfig, PYPROJECT_FILE_NAME, README_FILE_NAME};
use crate::templates;
use crate::{git, DEFAULT_LINE_LENGTH};

fn table(entries: Vec<(&str, toml::Value)>) -> toml::Value {
    let mut out = toml::Table::new();
    for (key, value) in entries {
        out.insert(key.to_string(), value);
    }
    toml::Value::Table(out)
}

fn strings(items: &[&str]) -> toml::Value {
    toml::Value::Array(
        items
            .iter()
            .map(|s| toml::Value::String(s.to_string()))
            .collect(),
    )
}

/// Creates the project root and the package source folder.
///
/// Runs first in every valid build order and owns the only hard precondition:
/// a non-empty target directory aborts the run before anything is written.
pub struct CorePlugin;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub layout: Layout,
}

impl From<&ProjectConfig> for CoreConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            layout: project.layout,
        }
    }
}

impl Plugin for CorePlugin {
    type Config = CoreConfig;
    const ID: PluginId = PluginId::Core;
    const DEPENDENCIES: &'static [PluginId] = &[];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        let root = &base.project_root;
        if root.is_dir() && fs::read_dir(root)?.next().is_some() {
            return Err(Error::PreconditionFailed(root.clone()));
        }

        let package_folder = base.package_folder_name();
        let src_folder = match config.layout {
            Layout::Flat => root.join(&package_folder),
            Layout::Src => root.join("src").join(&package_folder),
        };
        fs::create_dir_all(&src_folder)?;
        fs::write(src_folder.join("__init__.py"), "")?;
        Ok(())
    }
}

/// Writes the initial `pyproject.toml`
pub struct PyProjectPlugin;

impl From<&ProjectConfig> for ManifestConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            layout: project.layout,
            min_py_version: project.min_py_version,
            build_backend: project.build_backend,
            pkg_license: project.pkg_license.clone(),
            static_code_checkers: project.static_code_checkers.clone(),
            formatters: project.formatters.clone(),
            docs: project.docs,
            dynamic_version: project.dynamic_version,
        }
    }
}

impl Plugin for PyProjectPlugin {
    type Config = ManifestConfig;
    const ID: PluginId = PluginId::PyProject;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        let doc = pyproject::build_document(base, config);
        let contents = pyproject::render(&doc)?;
        fs::write(base.project_root.join(PYPROJECT_FILE_NAME), contents)?;
        Ok(())
    }
}

/// Writes the README with the post-scaffold checklist
pub struct ReadMePlugin;

impl Plugin for ReadMePlugin {
    type Config = ();
    const ID: PluginId = PluginId::ReadMe;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, _config: &Self::Config) -> Result<()> {
        fs::write(
            base.project_root.join(README_FILE_NAME),
            templates::readme(&base.project_name),
        )?;
        Ok(())
    }
}

/// Creates the tests package and the pytest configuration
pub struct TestsPlugin;

#[derive(Debug, Clone)]
pub struct TestsConfig {
    pub style: ConfigStyle,
}

impl From<&ProjectConfig> for TestsConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            style: project.configuration_preference,
        }
    }
}

impl Plugin for TestsPlugin {
    type Config = TestsConfig;
    const ID: PluginId = PluginId::Tests;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::PyProject];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        let tests_folder = base.project_root.join("tests");
        fs::create_dir_all(&tests_folder)?;
        fs::write(tests_folder.join("__init__.py"), "")?;

        match config.style {
            ConfigStyle::StandAlone => {
                fs::write(
                    base.project_root.join("pytest.ini"),
                    templates::pytest_config(),
                )?;
            }
            ConfigStyle::Pyproject => {
                let mut manifest = pyproject::load(&base.project_root)?;
                pyproject::tool_table(&mut manifest).insert(
                    "pytest".to_string(),
                    table(vec![(
                        "addopts",
                        toml::Value::String(templates::PYTEST_ADDOPTS.to_string()),
                    )]),
                );
                pyproject::store(&base.project_root, &manifest)?;
            }
        }
        Ok(())
    }
}

/// Writes the pre-commit hook configuration when enabled
pub struct PreCommitPlugin;

#[derive(Debug, Clone)]
pub struct PreCommitConfig {
    pub enabled: bool,
}

impl From<&ProjectConfig> for PreCommitConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            enabled: project.pre_commit,
        }
    }
}

impl Plugin for PreCommitPlugin {
    type Config = PreCommitConfig;
    const ID: PluginId = PluginId::PreCommit;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        if !config.enabled {
            return Ok(());
        }
        fs::write(
            base.project_root.join(".pre-commit-config.yaml"),
            templates::PRE_COMMIT_CONTENT,
        )?;
        Ok(())
    }
}

/// Static analysis configuration, either as stand-alone files or `tool.*`
/// tables in the manifest. flake8 has no pyproject support and always gets its
/// own file.
pub struct StaticCheckersPlugin;

#[derive(Debug, Clone)]
pub struct StaticCheckersConfig {
    pub checkers: Vec<StaticChecker>,
    pub style: ConfigStyle,
}

impl From<&ProjectConfig> for StaticCheckersConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            checkers: project.static_code_checkers.clone(),
            style: project.configuration_preference,
        }
    }
}

impl Plugin for StaticCheckersPlugin {
    type Config = StaticCheckersConfig;
    const ID: PluginId = PluginId::StaticCheckers;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::PyProject];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        if config.checkers.is_empty() {
            return Ok(());
        }

        let root = &base.project_root;
        let file_config = config.style == ConfigStyle::StandAlone;
        let mut manifest = pyproject::load(root)?;

        if config.checkers.contains(&StaticChecker::Flake8) {
            fs::write(root.join(".flake8"), templates::flake8_config())?;
        }

        if config.checkers.contains(&StaticChecker::Mypy) {
            if file_config {
                fs::write(root.join(".mypy.ini"), "[mypy]\n\n")?;
            } else {
                pyproject::tool_table(&mut manifest).insert(
                    "mypy".to_string(),
                    table(vec![
                        ("python_version", toml::Value::String("3.12".to_string())),
                        ("exclude", strings(&[])),
                    ]),
                );
            }
        }

        if config.checkers.contains(&StaticChecker::Pyright) {
            if file_config {
                fs::write(root.join("pyrightconfig.json"), "{}\n\n")?;
            } else {
                pyproject::tool_table(&mut manifest)
                    .insert("pyright".to_string(), table(Vec::new()));
            }
        }

        if config.checkers.contains(&StaticChecker::Pylint) {
            if file_config {
                fs::write(root.join(".pylintrc"), "[MASTER]\n\n")?;
            } else {
                pyproject::tool_table(&mut manifest)
                    .insert("pylint".to_string(), table(vec![("disable", strings(&[]))]));
            }
        }

        pyproject::store(root, &manifest)?;
        Ok(())
    }
}

/// Formatter configuration for ruff and isort. black needs no configuration
/// file, so selecting it only affects the manifest's dependency groups.
pub struct FormattersPlugin;

#[derive(Debug, Clone)]
pub struct FormattersConfig {
    pub formatters: Vec<Formatter>,
    pub style: ConfigStyle,
}

impl From<&ProjectConfig> for FormattersConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            formatters: project.formatters.clone(),
            style: project.configuration_preference,
        }
    }
}

impl Plugin for FormattersPlugin {
    type Config = FormattersConfig;
    const ID: PluginId = PluginId::Formatters;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::PyProject];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        if config.formatters.is_empty() {
            return Ok(());
        }

        let root = &base.project_root;
        let file_config = config.style == ConfigStyle::StandAlone;
        let mut manifest = pyproject::load(root)?;

        if config.formatters.contains(&Formatter::Ruff) {
            if file_config {
                fs::write(root.join("ruff.toml"), templates::ruff_config())?;
            } else {
                pyproject::tool_table(&mut manifest).insert(
                    "ruff".to_string(),
                    table(vec![
                        ("exclude", strings(&[])),
                        (
                            "line-length",
                            toml::Value::Integer(DEFAULT_LINE_LENGTH as i64),
                        ),
                        ("indent-width", toml::Value::Integer(4)),
                        ("lint", table(vec![("ignore", strings(&[]))])),
                        (
                            "format",
                            table(vec![
                                ("quote-style", toml::Value::String("double".to_string())),
                                ("indent-style", toml::Value::String("space".to_string())),
                            ]),
                        ),
                    ]),
                );
            }
        }

        if config.formatters.contains(&Formatter::Isort) {
            if file_config {
                fs::write(root.join(".isort.cfg"), templates::isort_config())?;
            } else {
                pyproject::tool_table(&mut manifest).insert(
                    "isort".to_string(),
                    table(vec![
                        ("profile", toml::Value::String("black".to_string())),
                        (
                            "line_length",
                            toml::Value::Integer(DEFAULT_LINE_LENGTH as i64),
                        ),
                        ("indent", toml::Value::Integer(4)),
                    ]),
                );
            }
        }

        pyproject::store(root, &manifest)?;
        Ok(())
    }
}

/// Writes the editor workspace file
pub struct EditorPlugin;

#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub editor: Option<CodeEditor>,
}

impl From<&ProjectConfig> for EditorConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            editor: project.code_editor,
        }
    }
}

impl Plugin for EditorPlugin {
    type Config = EditorConfig;
    const ID: PluginId = PluginId::Editor;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        match config.editor {
            Some(CodeEditor::Vscode) => {
                let workspace = serde_json::to_string_pretty(&templates::code_workspace())?;
                let file_name = format!("{}.code-workspace", base.project_name);
                fs::write(base.project_root.join(file_name), workspace)?;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Documentation generator configuration
pub struct DocsPlugin;

#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub docs: Option<DocsGenerator>,
}

impl From<&ProjectConfig> for DocsConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            docs: project.docs,
        }
    }
}

impl Plugin for DocsPlugin {
    type Config = DocsConfig;
    const ID: PluginId = PluginId::Docs;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        match config.docs {
            None => Ok(()),
            Some(DocsGenerator::Mkdocs) => {
                fs::write(
                    base.project_root.join("mkdocs.yml"),
                    templates::mkdocs_config(&base.project_name),
                )?;
                let docs_folder = base.project_root.join("docs");
                fs::create_dir_all(&docs_folder)?;
                fs::write(docs_folder.join("index.md"), templates::docs_index())?;
                Ok(())
            }
            Some(DocsGenerator::Sphinx) => Err(Error::Unsupported("sphinx docs".to_string())),
        }
    }
}

/// CI workflow files for the selected cloud code base
pub struct CiPlugin;

#[derive(Debug, Clone)]
pub struct CiConfig {
    pub cloud_code_base: Option<CloudCodeBase>,
    pub min_py_version: PyVersion,
}

impl From<&ProjectConfig> for CiConfig {
    fn from(project: &ProjectConfig) -> Self {
        Self {
            cloud_code_base: project.cloud_code_base,
            min_py_version: project.min_py_version,
        }
    }
}

impl Plugin for CiPlugin {
    type Config = CiConfig;
    const ID: PluginId = PluginId::Ci;
    const DEPENDENCIES: &'static [PluginId] = &[PluginId::Core];

    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()> {
        match config.cloud_code_base {
            None => Ok(()),
            Some(CloudCodeBase::Github) => {
                let workflows = base.project_root.join(".github").join("workflows");
                fs::create_dir_all(&workflows)?;
                fs::write(
                    workflows.join("ci.yml"),
                    templates::gh_action_ci(config.min_py_version),
                )?;
                fs::write(
                    workflows.join("release.yml"),
                    templates::gh_action_release(&base.project_name),
                )?;
                Ok(())
            }
        }
    }
}

/// `.gitignore` plus repository initialization.
///
/// Depends on every other plugin so the initial commit captures the complete
/// scaffold. A failing `git` invocation is reported as a warning; repository
/// initialization is not essential to scaffold correctness.
pub struct VcsPlugin;

impl Plugin for VcsPlugin {
    type Config = ();
    const ID: PluginId = PluginId::Vcs;
    const DEPENDENCIES: &'static [PluginId] = &[
        PluginId::Core,
        PluginId::PyProject,
        PluginId::ReadMe,
        PluginId::Tests,
        PluginId::PreCommit,
        PluginId::StaticCheckers,
        PluginId::Formatters,
        PluginId::Editor,
        PluginId::Docs,
        PluginId::Ci,
    ];

    fn build(base: &BaseConfig, _config: &Self::Config) -> Result<()> {
        fs::write(
            base.project_root.join(".gitignore"),
            templates::GITIGNORE_CONTENT,
        )?;

        match git::init_repository(&base.project_root) {
            Ok(()) => {
                println!(
                    "{} Git repository initialized at {}",
                    "ok".green(),
                    base.project_root.display()
                );
            }
            Err(err) => {
                eprintln!(
                    "{} failed to initialize git repository: {err}",
                    "Warning:".yellow()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use std::path::Path;

    fn base_at(root: &Path, name: &str) -> BaseConfig {
        BaseConfig {
            project_root: root.join(name),
            project_name: name.to_string(),
            user: UserConfig {
                author: "Jane Doe".to_string(),
                author_email: "jane@example.com".to_string(),
            },
        }
    }

    #[test]
    fn core_creates_src_layout_with_init_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "my-demo");

        CorePlugin::build(&base, &CoreConfig { layout: Layout::Src }).unwrap();

        assert!(base
            .project_root
            .join("src")
            .join("my_demo")
            .join("__init__.py")
            .is_file());
    }

    #[test]
    fn core_creates_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "my-demo");

        CorePlugin::build(&base, &CoreConfig { layout: Layout::Flat }).unwrap();

        assert!(base.project_root.join("my_demo").join("__init__.py").is_file());
        assert!(!base.project_root.join("src").exists());
    }

    #[test]
    fn core_rejects_non_empty_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "taken");
        fs::create_dir_all(&base.project_root).unwrap();
        fs::write(base.project_root.join("leftover.txt"), "x").unwrap();

        let err = CorePlugin::build(&base, &CoreConfig { layout: Layout::Src }).unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed(_)));
    }

    #[test]
    fn tests_plugin_adds_pytest_table_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();
        fs::write(base.project_root.join(PYPROJECT_FILE_NAME), "").unwrap();

        TestsPlugin::build(
            &base,
            &TestsConfig {
                style: ConfigStyle::Pyproject,
            },
        )
        .unwrap();

        let manifest = pyproject::load(&base.project_root).unwrap();
        let addopts = manifest["tool"]["pytest"]["addopts"].as_str().unwrap();
        assert!(addopts.contains("--cov"));
        assert!(base.project_root.join("tests").join("__init__.py").is_file());
    }

    #[test]
    fn stand_alone_style_writes_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();
        fs::write(base.project_root.join(PYPROJECT_FILE_NAME), "").unwrap();

        StaticCheckersPlugin::build(
            &base,
            &StaticCheckersConfig {
                checkers: vec![
                    StaticChecker::Flake8,
                    StaticChecker::Mypy,
                    StaticChecker::Pyright,
                    StaticChecker::Pylint,
                ],
                style: ConfigStyle::StandAlone,
            },
        )
        .unwrap();

        assert!(base.project_root.join(".flake8").is_file());
        assert!(base.project_root.join(".mypy.ini").is_file());
        assert!(base.project_root.join("pyrightconfig.json").is_file());
        assert!(base.project_root.join(".pylintrc").is_file());
    }

    #[test]
    fn formatters_merge_into_manifest_tables() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();
        fs::write(base.project_root.join(PYPROJECT_FILE_NAME), "").unwrap();

        FormattersPlugin::build(
            &base,
            &FormattersConfig {
                formatters: vec![Formatter::Ruff, Formatter::Isort],
                style: ConfigStyle::Pyproject,
            },
        )
        .unwrap();

        let manifest = pyproject::load(&base.project_root).unwrap();
        assert_eq!(manifest["tool"]["ruff"]["line-length"].as_integer(), Some(95));
        assert_eq!(
            manifest["tool"]["isort"]["profile"].as_str(),
            Some("black")
        );
    }

    #[test]
    fn editor_plugin_is_a_no_op_without_an_editor() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();

        EditorPlugin::build(&base, &EditorConfig { editor: None }).unwrap();

        assert!(fs::read_dir(&base.project_root).unwrap().next().is_none());
    }

    #[test]
    fn sphinx_docs_are_reported_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();

        let err = DocsPlugin::build(
            &base,
            &DocsConfig {
                docs: Some(DocsGenerator::Sphinx),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn vcs_git_failure_is_downgraded_to_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();

        // With an empty PATH every git invocation fails to spawn
        let saved_path = std::env::var_os("PATH");
        std::env::set_var("PATH", "");
        let result = VcsPlugin::build(&base, &());
        match saved_path {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        result.unwrap();
        assert!(base.project_root.join(".gitignore").is_file());
        assert!(!base.project_root.join(".git").exists());
    }

    #[test]
    fn ci_plugin_writes_both_workflows() {
        let dir = tempfile::tempdir().unwrap();
        let base = base_at(dir.path(), "demo");
        fs::create_dir_all(&base.project_root).unwrap();

        CiPlugin::build(
            &base,
            &CiConfig {
                cloud_code_base: Some(CloudCodeBase::Github),
                min_py_version: PyVersion::Py311,
            },
        )
        .unwrap();

        let workflows = base.project_root.join(".github").join("workflows");
        assert!(workflows.join("ci.yml").is_file());
        assert!(workflows.join("release.yml").is_file());
    }
}
