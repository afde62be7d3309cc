//! Scaffold Core - Shared library for scaffolding Python projects
//!
//! This library provides the core functionality behind the `scaffoldpy` CLI:
//! a set of configuration-generating plugins, a dependency graph that resolves
//! the order they run in, and the template builders they write from.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure template builders, manifest document
//!   building, git helpers
//! - **Layer 2: Plugin Orchestration** - The `Plugin` contract, the
//!   `PluginDependencyGraph` build-order resolution, and the `builder`
//!   orchestrator
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::{builder, config::AppConfig};
//!
//! let mut config = AppConfig::default();
//! config.project_config.project_name = "demo".into();
//! let root = builder::project_root_for("demo")?;
//! builder::build_project(&config, root)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod git;
pub mod plugins;
pub mod pyproject;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use builder::build_project;
pub use config::{AppConfig, BaseConfig, ProjectConfig, UserConfig};
pub use error::{Error, Result};
pub use plugins::{Plugin, PluginDependencyGraph, PluginId};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};

/// Ruler length shared by the generated formatter, linter, and editor configs
pub const DEFAULT_LINE_LENGTH: usize = 95;
