//! Template string builders for generated configuration files
//!
//! Everything in this module is a pure function from parameters to file
//! contents; the plugins decide where the output lands.

use crate::config::PyVersion;
use crate::DEFAULT_LINE_LENGTH;

/// README.md with the post-scaffold checklist
pub fn readme(project_name: &str) -> String {
    format!(
        "# {project_name}\n\
         \n\
         This is a Python project scaffolded with scaffoldpy. Here is what you need to do next:\n\
         1. Install the dependencies: `uv sync`\n\
         2. Install the pre-commit hooks: `pre-commit install`\n\
         3. Create repo on Github\n\
         4. Run `git remote add origin https://github.com/<user-name>/<repo-name>.git`\n\
         5. Push to remote: `git push -u origin main`\n\
         6. Register your project on PyPi\n\
         7. Release a new version on github.\n\
         8. Release pipeline will automatically publish the package to PyPi.\n\
         \n"
    )
}

/// CI workflow building the package across OSes and every supported Python
/// version from `min_py_version` up
pub fn gh_action_ci(min_py_version: PyVersion) -> String {
    let versions = min_py_version
        .supported_versions()
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"name: CI

on:
  push:
    branches: [main]
  pull_request:
    branches: [main]

permissions:
  contents: write

jobs:
  develop:
    strategy:
      fail-fast: false
      matrix:
        python-version: [{versions}]
        os: [ubuntu-latest, macos-latest, windows-latest]
    defaults:
      run:
        shell: bash

    runs-on: ${{{{ matrix.os }}}}
    steps:
      - name: Check out repository
        uses: actions/checkout@v4
        with:
          fetch-depth: 0 # Fetch all history for all tags and branches

      - name: Set up Python ${{{{ matrix.python-version }}}}
        uses: actions/setup-python@v5
        with:
          python-version: ${{{{ matrix.python-version }}}}

      - name: Build package
        run: |
          python -m pip install --upgrade pip
          python -m pip install build
          python -m build

      - name: Upload artifact
        uses: actions/upload-artifact@v4
        with:
          name: build-artifacts-${{{{ runner.os }}}}-py${{{{ matrix.python-version }}}}
          path: dist/*
"#
    )
}

/// Release workflow publishing to PyPI via trusted publishing
pub fn gh_action_release(project_name: &str) -> String {
    format!(
        r#"name: release

on:
  release:
    types: [published]

permissions:
  contents: write
  id-token: write

jobs:
  release-build:
    runs-on: ubuntu-latest

    steps:
      - uses: actions/checkout@v4
        with:
          fetch-depth: 0 # Fetch all history for all tags and branches

      - uses: actions/setup-python@v5
        with:
          python-version: 3.x

      - name: Build release distributions
        run: |
          python -m pip install build
          python -m build

      - name: Upload distributions
        uses: actions/upload-artifact@v4
        with:
          name: release-dists
          path: dist/

  pypi-publish:
    runs-on: ubuntu-latest
    needs:
      - release-build
    environment:
      name: pypi
      url: https://pypi.org/project/{project_name}/

    steps:
      - name: Retrieve release distributions
        uses: actions/download-artifact@v4
        with:
          name: release-dists
          path: dist/

      - name: Publish release distributions to PyPI
        uses: pypa/gh-action-pypi-publish@release/v1
        with:
          packages-dir: dist/
"#
    )
}

pub fn mkdocs_config(project_name: &str) -> String {
    format!(
        "site_name: {project_name}\n\
         nav:\n\
         \x20\x20- Home: index.md\n\
         \n"
    )
}

pub fn docs_index() -> String {
    "# Documentation\n\nThis is the documentation for your project.\n\n".to_string()
}

pub fn ruff_config() -> String {
    format!(
        "exclude = []\n\
         line-length = {DEFAULT_LINE_LENGTH}\n\
         indent-width = 4\n\
         \n\
         [lint]\n\
         ignore = []\n\
         \n\
         [format]\n\
         quote-style = \"double\"\n\
         indent-style = \"space\"\n\
         \n"
    )
}

pub fn isort_config() -> String {
    "[settings]\nprofile=black\n\n".to_string()
}

pub fn flake8_config() -> String {
    format!("[flake8]\nmax-line-length = {DEFAULT_LINE_LENGTH}\n")
}

pub const PRE_COMMIT_CONTENT: &str = "\
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: end-of-file-fixer
      - id: trailing-whitespace
      - id: check-yaml
      - id: check-toml
      - id: check-added-large-files
";

pub const PYTEST_ADDOPTS: &str =
    "--cov . --cov-report xml:tests/.coverage/cov.xml --cov-report html:tests/.coverage/html";

pub fn pytest_config() -> String {
    format!(
        "[pytest]\n\
         ; https://pytest-cov.readthedocs.io/en/latest/config.html\n\
         addopts = {PYTEST_ADDOPTS}\n\
         \n"
    )
}

/// VS Code workspace file contents
pub fn code_workspace() -> serde_json::Value {
    serde_json::json!({
        "folders": [{ "path": "." }],
        "settings": {
            "python.defaultInterpreterPath": "${workspaceFolder}/.venv/Scripts/python.exe",
            "pylint.interpreter": ["${workspaceFolder}/.venv/Scripts/python.exe"],
            "editor.rulers": [DEFAULT_LINE_LENGTH],
            "mypy-type-checker.importStrategy": "fromEnvironment",
            "mypy-type-checker.interpreter": ["${workspaceFolder}/.venv/Scripts/python.exe"],
        }
    })
}

pub const GITIGNORE_CONTENT: &str = "\
# Byte-compiled / optimized / DLL files
__pycache__/
*.py[cod]
*$py.class

# pytest
.cache/

# Coverage reports
htmlcov/
.tox/
.coverage
.coverage.*
.cache
nosetests.xml
coverage.xml
*.cover
.hypothesis/
.pytest_cache/

# Built wheels
*.whl
dist/*

site/*

.venv/*
.benchmarks/*

.venv/

_version.py
";
