//! Interactive configuration flow using cliclack

use anyhow::Result;

use crate::builder;
use crate::config::store::{self, StoredConfig};
use crate::config::{
    AppConfig, BuildBackend, CloudCodeBase, CodeEditor, DocsGenerator, Formatter, Layout,
    ProjectConfig, PyVersion, SpellChecker, StaticChecker, UserConfig,
};
use crate::git;

/// CLI arguments for a scaffolding run
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name of the project to be created
    pub project_name: Option<String>,

    /// Skip the configuration prompts and scaffold with the stored (or
    /// default) configuration
    pub skip_config: bool,
}

/// Run the interactive scaffolding flow
pub fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("scaffoldpy")?;

    let git_user = git::detect_user();

    let (mut app_config, mut save_needed) = match store::load() {
        StoredConfig::Loaded(config) => (config, false),
        StoredConfig::Missing => {
            cliclack::log::info("Looks like you're running this tool for the first time.")?;
            let config = AppConfig {
                user_config: prompt_user_config(git_user.as_ref())?,
                project_config: prompt_project_config(args.project_name.clone())?,
            };
            (config, true)
        }
        StoredConfig::Corrupt => {
            cliclack::log::warning(
                "Your configuration file is corrupt. Let's set it up again.",
            )?;
            let config = AppConfig {
                user_config: prompt_user_config(git_user.as_ref())?,
                project_config: prompt_project_config(args.project_name.clone())?,
            };
            (config, true)
        }
    };

    if !save_needed {
        cliclack::log::info(format!("Welcome back {}!", app_config.user_config.author))?;

        if let Some(git_user) = &git_user {
            if *git_user != app_config.user_config {
                cliclack::log::warning(
                    "Your git user configuration differs from your saved configuration.",
                )?;
                let update: bool = cliclack::confirm(format!(
                    "Update your user configuration to {} <{}>?",
                    git_user.author, git_user.author_email
                ))
                .initial_value(true)
                .interact()?;
                if update {
                    app_config.user_config = git_user.clone();
                    save_needed = true;
                }
            }
        }

        app_config.project_config.project_name = match args.project_name.clone() {
            Some(name) => name,
            None => prompt_project_name()?,
        };

        if !args.skip_config {
            let use_previous: bool = cliclack::confirm("Use your previous configuration?")
                .initial_value(true)
                .interact()?;
            if !use_previous {
                app_config.project_config = prompt_project_config(args.project_name)?;
                save_needed = cliclack::confirm("Save this configuration for future use?")
                    .initial_value(true)
                    .interact()?;
            }
        }
    }

    if save_needed {
        if let Some(path) = store::save(&app_config)? {
            cliclack::log::success(format!("Configuration saved at {}", path.display()))?;
        }
    }

    let project_root = builder::project_root_for(&app_config.project_config.project_name)?;
    builder::build_project(&app_config, project_root.clone())?;

    print_next_steps(&project_root)?;
    Ok(())
}

fn prompt_user_config(git_user: Option<&UserConfig>) -> Result<UserConfig> {
    if let Some(user) = git_user {
        cliclack::log::success(format!(
            "Good news {}! We found your git user configuration with email {}.",
            user.author, user.author_email
        ))?;
        return Ok(user.clone());
    }

    cliclack::log::info("We could not find your git user configuration.")?;

    let author: String = cliclack::input("What's your name:")
        .validate(|input: &String| {
            if input.is_empty() {
                Err("Author name cannot be empty.")
            } else {
                Ok(())
            }
        })
        .interact()?;

    let author_email: String = cliclack::input("What's your email address:")
        .validate(|input: &String| {
            if input.is_empty() {
                Err("Author email cannot be empty.")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(UserConfig {
        author,
        author_email,
    })
}

fn prompt_project_name() -> Result<String> {
    let name: String = cliclack::input("What's your python project name:")
        .validate(|input: &String| {
            if input.is_empty() {
                Err("Project name cannot be empty.")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(name)
}

fn prompt_project_config(project_name: Option<String>) -> Result<ProjectConfig> {
    let mut config = ProjectConfig::default();
    config.project_name = match project_name {
        Some(name) => name,
        None => prompt_project_name()?,
    };

    let use_default: bool = cliclack::confirm("Would you like to use the default configuration?")
        .initial_value(true)
        .interact()?;
    if use_default {
        return Ok(config);
    }

    let mut min_version = cliclack::select("Select the minimum python version for your project:");
    for version in PyVersion::ALL {
        min_version = min_version.item(version, version.as_str(), "");
    }
    config.min_py_version = min_version.initial_value(PyVersion::Py310).interact()?;

    config.layout = cliclack::select("Select a layout for your project:")
        .item(Layout::Src, "src", "src/<package> layout")
        .item(Layout::Flat, "flat", "<package> at the project root")
        .initial_value(Layout::Src)
        .interact()?;

    config.build_backend = cliclack::select("Select a build-backend for your package:")
        .item(
            Some(BuildBackend::Hatchling),
            "Hatchling",
            "https://pypi.org/project/hatchling/",
        )
        .item(
            Some(BuildBackend::Setuptools),
            "Setuptools",
            "https://packaging.python.org/en/latest/key_projects/#setuptools",
        )
        .item(
            Some(BuildBackend::PoetryCore),
            "Poetry-core",
            "https://pypi.org/project/poetry-core/",
        )
        .item(
            Some(BuildBackend::PdmBackend),
            "PDM-backend",
            "https://backend.pdm-project.org/",
        )
        .item(
            Some(BuildBackend::FlitCore),
            "Flit-core",
            "https://flit.pypa.io/en/stable/pyproject_toml.html",
        )
        .item(None, "No build-backend", "skip packaging configuration")
        .initial_value(Some(BuildBackend::Hatchling))
        .interact()?;

    config.static_code_checkers =
        cliclack::multiselect("Select static code checkers for your project:")
            .item(
                StaticChecker::Flake8,
                "flake8",
                "https://flake8.pycqa.org/en/latest/",
            )
            .item(StaticChecker::Mypy, "mypy", "https://mypy-lang.org/")
            .item(
                StaticChecker::Pyright,
                "pyright",
                "https://github.com/microsoft/pyright",
            )
            .item(StaticChecker::Pylint, "pylint", "https://www.pylint.org/")
            .initial_values(config.static_code_checkers.clone())
            .required(false)
            .interact()?;

    config.formatters = cliclack::multiselect("Select formatters for your project:")
        .item(
            Formatter::Ruff,
            "ruff",
            "https://docs.astral.sh/ruff/formatter/",
        )
        .item(Formatter::Isort, "isort", "https://pycqa.github.io/isort/")
        .item(
            Formatter::Black,
            "black",
            "https://black.readthedocs.io/en/stable/",
        )
        .initial_values(config.formatters.clone())
        .required(false)
        .interact()?;

    config.spell_checker = cliclack::select("Select a spell checker for your project:")
        .item(Some(SpellChecker::Cspell), "cspell", "https://cspell.org/")
        .item(
            Some(SpellChecker::Codespell),
            "codespell",
            "https://github.com/codespell-project/codespell",
        )
        .item(None, "No spell checker", "")
        .initial_value(Some(SpellChecker::Cspell))
        .interact()?;

    config.docs = cliclack::select("Select a documentation generator for your project:")
        .item(
            Some(DocsGenerator::Mkdocs),
            "mkdocs",
            "https://www.mkdocs.org/",
        )
        .item(
            Some(DocsGenerator::Sphinx),
            "sphinx",
            "https://www.sphinx-doc.org/",
        )
        .item(None, "No documentation generator", "")
        .initial_value(Some(DocsGenerator::Mkdocs))
        .interact()?;

    config.code_editor = cliclack::select("Select a code editor for your project:")
        .item(
            Some(CodeEditor::Vscode),
            "Visual Studio Code",
            "https://code.visualstudio.com/",
        )
        .item(None, "No code editor", "")
        .initial_value(Some(CodeEditor::Vscode))
        .interact()?;

    config.pre_commit = cliclack::confirm("Generate a pre-commit configuration file?")
        .initial_value(true)
        .interact()?;

    config.cloud_code_base = cliclack::select("Select a cloud code base for your project:")
        .item(Some(CloudCodeBase::Github), "GitHub", "https://github.com/")
        .item(None, "No cloud code base", "")
        .initial_value(Some(CloudCodeBase::Github))
        .interact()?;

    Ok(config)
}

fn print_next_steps(project_root: &std::path::Path) -> Result<()> {
    let steps = [
        format!("cd {}", project_root.display()),
        "Install the dependencies: uv sync".to_string(),
        "Install the pre-commit hooks: pre-commit install".to_string(),
        "Open README.md for the release checklist".to_string(),
    ];

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;
    Ok(())
}
