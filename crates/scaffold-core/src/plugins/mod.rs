//! Plugin model and dependency resolution
//!
//! This module provides:
//! - The `Plugin` contract implemented by every configuration generator
//! - Plugin identities used as graph nodes
//! - The dependency graph that resolves a linear build order

pub mod builtin;
pub mod graph;

use std::fmt;

use crate::config::BaseConfig;
use crate::error::Result;

pub use graph::PluginDependencyGraph;

/// Identity of a builtin plugin, used as a node key in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginId {
    Core,
    PyProject,
    ReadMe,
    Tests,
    PreCommit,
    StaticCheckers,
    Formatters,
    Editor,
    Docs,
    Ci,
    Vcs,
}

impl PluginId {
    pub fn display_name(&self) -> &'static str {
        match self {
            PluginId::Core => "core layout",
            PluginId::PyProject => "pyproject.toml",
            PluginId::ReadMe => "README",
            PluginId::Tests => "tests",
            PluginId::PreCommit => "pre-commit",
            PluginId::StaticCheckers => "static checkers",
            PluginId::Formatters => "formatters",
            PluginId::Editor => "editor workspace",
            PluginId::Docs => "docs",
            PluginId::Ci => "CI workflows",
            PluginId::Vcs => "version control",
        }
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Contract for a configuration generator
///
/// Each plugin pairs with exactly one configuration schema (`Config`), sliced
/// out of the validated project configuration by the orchestrator. `build` is
/// called exactly once per scaffolding run, in the position assigned by the
/// resolved build order, and may assume every plugin in `DEPENDENCIES` has
/// already completed (including any file-system state it establishes).
///
/// A plugin that has nothing to do for the current configuration (e.g. no docs
/// generator selected) returns `Ok(())` without touching the file system.
pub trait Plugin {
    /// Inputs this plugin's build operation needs
    type Config;

    /// Graph node key for this plugin
    const ID: PluginId;

    /// Plugins that must be built before this one (order is not significant)
    const DEPENDENCIES: &'static [PluginId];

    /// Perform the file-system side effect under `base.project_root`
    fn build(base: &BaseConfig, config: &Self::Config) -> Result<()>;
}
