//! Build orchestration
//!
//! Registers the builtin plugins into a fresh dependency graph, resolves the
//! build order, and invokes each plugin in sequence. The graph is resolved
//! before anything touches the file system, so a cycle aborts the run with the
//! target directory untouched. There is no rollback: a failing plugin leaves
//! the files written by earlier plugins in place and surfaces the error.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::config::{AppConfig, BaseConfig};
use crate::error::Result;
use crate::plugins::builtin::{
    CiConfig, CiPlugin, CoreConfig, CorePlugin, DocsConfig, DocsPlugin, EditorConfig, EditorPlugin,
    FormattersConfig, FormattersPlugin, PreCommitConfig, PreCommitPlugin, PyProjectPlugin,
    ReadMePlugin, StaticCheckersConfig, StaticCheckersPlugin, TestsConfig, TestsPlugin, VcsPlugin,
};
use crate::plugins::{Plugin, PluginDependencyGraph, PluginId};
use crate::pyproject::ManifestConfig;

/// Register every builtin plugin. Registration order is the tie-break for the
/// resolved build order, so it is part of the observable behavior.
pub fn register_builtins(graph: &mut PluginDependencyGraph) {
    graph.add_plugin::<CorePlugin>();
    graph.add_plugin::<PyProjectPlugin>();
    graph.add_plugin::<ReadMePlugin>();
    graph.add_plugin::<TestsPlugin>();
    graph.add_plugin::<PreCommitPlugin>();
    graph.add_plugin::<StaticCheckersPlugin>();
    graph.add_plugin::<FormattersPlugin>();
    graph.add_plugin::<EditorPlugin>();
    graph.add_plugin::<DocsPlugin>();
    graph.add_plugin::<CiPlugin>();
    graph.add_plugin::<VcsPlugin>();
}

/// Target directory for a project name: a subdirectory of the current
/// working directory
pub fn project_root_for(project_name: &str) -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(project_name))
}

/// Scaffold a project into `project_root` according to `config`
pub fn build_project(config: &AppConfig, project_root: PathBuf) -> Result<()> {
    let base = BaseConfig {
        project_root,
        project_name: config.project_config.project_name.clone(),
        user: config.user_config.clone(),
    };
    let project = &config.project_config;

    let mut graph = PluginDependencyGraph::new();
    register_builtins(&mut graph);
    let build_order = graph.get_build_order()?;

    println!(
        "{}",
        format!("Building project {}...", base.project_name)
            .cyan()
            .bold()
    );

    for id in build_order {
        // The line is completed with done/failed after the plugin runs
        print!("  {} {}...", "->".blue(), id);
        let _ = io::stdout().flush();
        let result = match id {
            PluginId::Core => CorePlugin::build(&base, &CoreConfig::from(project)),
            PluginId::PyProject => PyProjectPlugin::build(&base, &ManifestConfig::from(project)),
            PluginId::ReadMe => ReadMePlugin::build(&base, &()),
            PluginId::Tests => TestsPlugin::build(&base, &TestsConfig::from(project)),
            PluginId::PreCommit => PreCommitPlugin::build(&base, &PreCommitConfig::from(project)),
            PluginId::StaticCheckers => {
                StaticCheckersPlugin::build(&base, &StaticCheckersConfig::from(project))
            }
            PluginId::Formatters => {
                FormattersPlugin::build(&base, &FormattersConfig::from(project))
            }
            PluginId::Editor => EditorPlugin::build(&base, &EditorConfig::from(project)),
            PluginId::Docs => DocsPlugin::build(&base, &DocsConfig::from(project)),
            PluginId::Ci => CiPlugin::build(&base, &CiConfig::from(project)),
            PluginId::Vcs => VcsPlugin::build(&base, &()),
        };
        match result {
            Ok(()) => println!(" {}", "done".green()),
            Err(err) => {
                println!(" {}", "failed".red());
                return Err(err);
            }
        }
    }

    println!(
        "{} Project {} created successfully.",
        "Done.".green().bold(),
        base.project_name
    );
    Ok(())
}
