//! Plugin dependency graph and build-order resolution
//!
//! The graph stores "unlocks" edges: for every dependency `d` of a plugin `p`
//! it records `d -> p`, meaning `d` must be built before `p`. The build order
//! is resolved with Kahn's algorithm; a cycle is a hard error, never silently
//! resolved. The graph is built fresh per invocation and discarded once the
//! build order has been consumed.

use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::plugins::{Plugin, PluginId};

/// Registry of plugins and their declared dependency edges
#[derive(Debug, Default)]
pub struct PluginDependencyGraph {
    /// dep -> plugins that depend on it (deduplicated edge lists)
    graph: HashMap<PluginId, Vec<PluginId>>,
    /// All known plugins in first-registration order. Insertion order is the
    /// documented tie-break for equal-in-degree nodes, so a deterministic
    /// registration order yields a deterministic build order.
    plugins: Vec<PluginId>,
}

impl PluginDependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin type and its declared dependencies
    pub fn add_plugin<P: Plugin>(&mut self) {
        self.add_node(P::ID, P::DEPENDENCIES);
    }

    /// Register a plugin identity with an explicit dependency list
    ///
    /// Records an edge `dep -> plugin` for every dependency and adds both ends
    /// to the known-plugins set. Idempotent: re-adding the same plugin or edge
    /// does not duplicate edges, so in-degree accounting stays correct under
    /// repeated registration.
    pub fn add_node(&mut self, plugin: PluginId, dependencies: &[PluginId]) {
        for &dep in dependencies {
            let dependents = self.graph.entry(dep).or_default();
            if !dependents.contains(&plugin) {
                dependents.push(plugin);
            }
            self.register(dep);
        }
        self.register(plugin);
    }

    /// Number of plugins known to the graph (registered or discovered via a
    /// dependency list)
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Resolve a total order in which every plugin appears after all of its
    /// dependencies (Kahn's algorithm).
    ///
    /// Fails with [`Error::CycleDetected`] if any plugin can never reach
    /// in-degree zero; the error carries the unresolved plugins.
    pub fn get_build_order(&self) -> Result<Vec<PluginId>> {
        let mut in_degree: HashMap<PluginId, usize> =
            self.plugins.iter().map(|&id| (id, 0)).collect();
        for dependents in self.graph.values() {
            for dependent in dependents {
                *in_degree.entry(*dependent).or_default() += 1;
            }
        }

        // Seed with plugins that have no unmet dependencies, in insertion order
        let mut queue: VecDeque<PluginId> = self
            .plugins
            .iter()
            .copied()
            .filter(|id| in_degree[id] == 0)
            .collect();
        let mut build_order = Vec::with_capacity(self.plugins.len());

        while let Some(current) = queue.pop_front() {
            build_order.push(current);

            if let Some(dependents) = self.graph.get(&current) {
                for &dependent in dependents {
                    // Both edge ends are registered by add_node
                    if let Some(degree) = in_degree.get_mut(&dependent) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(dependent);
                        }
                    }
                }
            }
        }

        if build_order.len() != self.plugins.len() {
            let unresolved: Vec<PluginId> = self
                .plugins
                .iter()
                .copied()
                .filter(|id| !build_order.contains(id))
                .collect();
            return Err(Error::CycleDetected(unresolved));
        }

        Ok(build_order)
    }

    fn register(&mut self, plugin: PluginId) {
        if !self.plugins.contains(&plugin) {
            self.plugins.push(plugin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PluginId::{Ci, Core, Docs, PyProject, ReadMe, Tests, Vcs};

    fn position(order: &[PluginId], id: PluginId) -> usize {
        order
            .iter()
            .position(|&p| p == id)
            .unwrap_or_else(|| panic!("{id:?} missing from build order"))
    }

    #[test]
    fn fan_out_from_core_keeps_core_first() {
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(Core, &[]);
        graph.add_node(ReadMe, &[Core]);
        graph.add_node(PyProject, &[Core]);

        let order = graph.get_build_order().unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], Core);
        assert!(order.contains(&ReadMe));
        assert!(order.contains(&PyProject));
    }

    #[test]
    fn chain_resolves_in_the_only_valid_order() {
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(Core, &[]);
        graph.add_node(PyProject, &[Core]);
        graph.add_node(Tests, &[PyProject]);

        let order = graph.get_build_order().unwrap();
        assert_eq!(order, vec![Core, PyProject, Tests]);
    }

    #[test]
    fn two_node_cycle_is_detected() {
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(Core, &[ReadMe]);
        graph.add_node(ReadMe, &[Core]);

        let err = graph.get_build_order().unwrap_err();
        match err {
            Error::CycleDetected(unresolved) => {
                assert!(unresolved.contains(&Core));
                assert!(unresolved.contains(&ReadMe));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn cycle_behind_a_valid_prefix_is_still_fatal() {
        // Core resolves fine, but Docs and Ci deadlock on each other
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(Core, &[]);
        graph.add_node(Docs, &[Core, Ci]);
        graph.add_node(Ci, &[Docs]);

        let err = graph.get_build_order().unwrap_err();
        match err {
            Error::CycleDetected(unresolved) => {
                assert_eq!(unresolved.len(), 2);
                assert!(unresolved.contains(&Docs));
                assert!(unresolved.contains(&Ci));
                assert!(!unresolved.contains(&Core));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn single_plugin_orders_alone() {
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(Core, &[]);

        assert_eq!(graph.get_build_order().unwrap(), vec![Core]);
    }

    #[test]
    fn repeated_registration_is_idempotent() {
        let mut graph = PluginDependencyGraph::new();
        for _ in 0..3 {
            graph.add_node(Core, &[]);
            graph.add_node(ReadMe, &[Core]);
            graph.add_node(PyProject, &[Core]);
        }

        assert_eq!(graph.len(), 3);
        let order = graph.get_build_order().unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], Core);
    }

    #[test]
    fn dependencies_are_discovered_transitively() {
        // Core is never registered explicitly, only named as a dependency
        let mut graph = PluginDependencyGraph::new();
        graph.add_node(ReadMe, &[Core]);

        let order = graph.get_build_order().unwrap();
        assert_eq!(order, vec![Core, ReadMe]);
    }

    #[test]
    fn every_edge_respects_the_resolved_order() {
        let edges: &[(PluginId, &[PluginId])] = &[
            (Core, &[]),
            (PyProject, &[Core]),
            (ReadMe, &[Core]),
            (Tests, &[PyProject]),
            (Docs, &[Core]),
            (Ci, &[Core]),
            (Vcs, &[Core, PyProject, ReadMe, Tests, Docs, Ci]),
        ];

        let mut graph = PluginDependencyGraph::new();
        for (id, deps) in edges {
            graph.add_node(*id, deps);
        }

        let order = graph.get_build_order().unwrap();
        assert_eq!(order.len(), edges.len());
        for (id, deps) in edges {
            for dep in *deps {
                assert!(
                    position(&order, *dep) < position(&order, *id),
                    "{dep:?} must come before {id:?} in {order:?}"
                );
            }
        }
    }

    #[test]
    fn registration_order_breaks_ties_deterministically() {
        let build = |swap: bool| {
            let mut graph = PluginDependencyGraph::new();
            graph.add_node(Core, &[]);
            if swap {
                graph.add_node(PyProject, &[Core]);
                graph.add_node(ReadMe, &[Core]);
            } else {
                graph.add_node(ReadMe, &[Core]);
                graph.add_node(PyProject, &[Core]);
            }
            graph.get_build_order().unwrap()
        };

        assert_eq!(build(false), vec![Core, ReadMe, PyProject]);
        assert_eq!(build(true), vec![Core, PyProject, ReadMe]);
    }
}
