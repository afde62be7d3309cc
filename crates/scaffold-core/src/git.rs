//! Git subprocess helpers
//!
//! Two concerns live here: discovering the user's identity from the global git
//! configuration (offered as the default author), and initializing a repository
//! in a freshly scaffolded project. Repository initialization is the one plugin
//! side effect that leaves the file system and shells out to an external tool;
//! its failure is downgraded to a warning by the caller.

use std::path::Path;
use std::process::Command;

use crate::config::UserConfig;
use crate::error::{Error, Result};

/// Read the author identity from `git config`, if both name and email are set
pub fn detect_user() -> Option<UserConfig> {
    let author = config_value("user.name")?;
    let author_email = config_value("user.email")?;
    Some(UserConfig {
        author,
        author_email,
    })
}

fn config_value(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Initialize a git repository with an initial commit on `main`
pub fn init_repository(project_root: &Path) -> Result<()> {
    run_git(project_root, &["init"])?;
    run_git(project_root, &["add", "."])?;
    run_git(project_root, &["commit", "-m", "init"])?;
    run_git(project_root, &["branch", "-M", "main"])?;
    Ok(())
}

fn run_git(cwd: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|err| Error::ExternalTool(format!("git {}: {err}", args.join(" "))))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ExternalTool(format!(
            "git {} exited with {}: {}",
            args.join(" "),
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
