use std::io;
use std::path::PathBuf;

use crate::plugins::PluginId;

/// Errors that can occur while resolving or executing a scaffold build
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The plugin dependency graph contains a cycle and no build order exists.
    /// Carries the plugins that never reached in-degree zero.
    #[error("dependency cycle detected among plugins: {}", format_ids(.0))]
    CycleDetected(Vec<PluginId>),

    /// A plugin precondition failed; the run is aborted without rollback
    #[error("project directory {0} already exists and is not empty")]
    PreconditionFailed(PathBuf),

    /// A requested generator exists in the configuration but is not implemented
    #[error("{0} generation is not yet implemented")]
    Unsupported(String),

    /// An external process (git) could not be run or exited non-zero.
    /// Reported as a warning by the orchestrator, never fatal.
    #[error("external tool failed: {0}")]
    ExternalTool(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("manifest parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("manifest serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_ids(ids: &[PluginId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for scaffold-core operations
pub type Result<T> = std::result::Result<T, Error>;
