//! Namespace dependency graph and cycle detection.
//!
//! Nodes are namespaces that own at least one scanned file; edges point at
//! every namespace a file imports, excluding self-references and configured
//! standard-library prefixes. All containers are ordered so traversal — and
//! therefore cycle reporting — is deterministic across runs.

use crate::auditor::FileMetrics;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};

/// Namespace dependency graph, read-only once built.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Builds the graph from per-file metrics. Files without a declared
    /// namespace cannot be graph nodes and are skipped; namespaces that only
    /// ever appear as imports do not become nodes either.
    #[must_use]
    pub fn build(files: &[FileMetrics], std_prefixes: &[String]) -> Self {
        let mut nodes: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for file in files {
            let Some(ref namespace) = file.namespace else {
                continue;
            };
            let edges = nodes.entry(namespace.clone()).or_default();
            for used in &file.usings {
                if used == namespace || is_std(used, std_prefixes) {
                    continue;
                }
                edges.insert(used.clone());
            }
        }

        Self { nodes }
    }

    /// Namespace → sorted referenced namespaces, for serialization.
    #[must_use]
    pub fn dependencies(&self) -> BTreeMap<String, Vec<String>> {
        self.nodes
            .iter()
            .map(|(node, edges)| (node.clone(), edges.iter().cloned().collect()))
            .collect()
    }

    /// Whether the namespace owns at least one file in this scan.
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.nodes.contains_key(namespace)
    }

    /// Count of distinct namespaces this node depends on.
    #[must_use]
    pub fn fan_out(&self, namespace: &str) -> usize {
        self.nodes.get(namespace).map_or(0, BTreeSet::len)
    }

    /// Count of distinct graph nodes depending on this node.
    #[must_use]
    pub fn fan_in(&self, namespace: &str) -> usize {
        self.nodes
            .iter()
            .filter(|(node, edges)| node.as_str() != namespace && edges.contains(namespace))
            .count()
    }

    /// Iterator over node names in lexicographic order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Detects dependency cycles with a depth-first traversal holding an
    /// explicit recursion stack. Each cycle is reported as a closed path
    /// (`[A, B, C, A]`); the same cycle encountered through a different
    /// rotation is suppressed. Edges into namespaces with no files in this
    /// codebase are never followed.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        let mut reported: FxHashSet<String> = FxHashSet::default();
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<&str> = Vec::new();
        let mut on_stack: FxHashMap<&str, usize> = FxHashMap::default();

        for node in self.nodes.keys() {
            if !visited.contains(node.as_str()) {
                self.dfs(
                    node,
                    &mut visited,
                    &mut stack,
                    &mut on_stack,
                    &mut reported,
                    &mut cycles,
                );
            }
        }
        cycles
    }

    fn dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut FxHashSet<&'a str>,
        stack: &mut Vec<&'a str>,
        on_stack: &mut FxHashMap<&'a str, usize>,
        reported: &mut FxHashSet<String>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        visited.insert(node);
        on_stack.insert(node, stack.len());
        stack.push(node);

        if let Some(edges) = self.nodes.get(node) {
            for target in edges {
                if !self.nodes.contains_key(target) {
                    continue;
                }
                if let Some(&pos) = on_stack.get(target.as_str()) {
                    let mut cycle: Vec<String> =
                        stack[pos..].iter().map(|&n| n.to_owned()).collect();
                    cycle.push(target.clone());
                    if reported.insert(rotation_signature(&cycle[..cycle.len() - 1])) {
                        cycles.push(cycle);
                    }
                } else if !visited.contains(target.as_str()) {
                    self.dfs(target, visited, stack, on_stack, reported, cycles);
                }
            }
        }

        stack.pop();
        on_stack.remove(node);
    }
}

fn is_std(namespace: &str, std_prefixes: &[String]) -> bool {
    std_prefixes.iter().any(|prefix| {
        namespace == prefix
            || (namespace.len() > prefix.len()
                && namespace.starts_with(prefix.as_str())
                && namespace.as_bytes()[prefix.len()] == b'.')
    })
}

/// Canonical signature of a cycle: the member list rotated so its smallest
/// element comes first. Two rotations of the same cycle share a signature.
fn rotation_signature(members: &[String]) -> String {
    let Some(min_pos) = members
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
    else {
        return String::new();
    };
    let mut rotated: Vec<&str> = Vec::with_capacity(members.len());
    for i in 0..members.len() {
        rotated.push(&members[(min_pos + i) % members.len()]);
    }
    rotated.join("\u{1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::FileMetrics;

    fn file(namespace: &str, usings: &[&str]) -> FileMetrics {
        FileMetrics {
            path: format!("{namespace}.cs"),
            namespace: Some(namespace.to_owned()),
            usings: usings.iter().map(|&u| u.to_owned()).collect(),
            ..FileMetrics::default()
        }
    }

    #[test]
    fn builds_nodes_for_all_owning_namespaces() {
        let files = [file("App.Core", &[]), file("App.Util", &["App.Core"])];
        let graph = DependencyGraph::build(&files, &["System".to_owned()]);
        assert!(graph.contains("App.Core"));
        assert_eq!(graph.fan_out("App.Core"), 0);
        assert_eq!(graph.fan_in("App.Core"), 1);
    }

    #[test]
    fn excludes_self_and_std_references() {
        let files = [file(
            "App.Core",
            &["App.Core", "System", "System.Linq", "SystemX", "App.Data"],
        )];
        let graph = DependencyGraph::build(&files, &["System".to_owned()]);
        let deps = graph.dependencies();
        assert_eq!(
            deps["App.Core"],
            vec!["App.Data".to_owned(), "SystemX".to_owned()]
        );
    }

    #[test]
    fn detects_three_node_cycle_once() {
        let files = [
            file("A", &["B"]),
            file("B", &["C"]),
            file("C", &["A"]),
        ];
        let graph = DependencyGraph::build(&files, &[]);
        let cycles = graph.find_cycles();
        assert_eq!(cycles.len(), 1);
        let cycle = &cycles[0];
        assert_eq!(cycle.len(), 4);
        assert_eq!(cycle.first(), cycle.last());
        let members: std::collections::BTreeSet<&str> =
            cycle[..3].iter().map(String::as_str).collect();
        assert_eq!(members.len(), 3);
        assert!(members.contains("A") && members.contains("B") && members.contains("C"));
    }

    #[test]
    fn acyclic_graph_reports_no_cycles() {
        let files = [file("A", &["B"]), file("B", &["C"]), file("C", &[])];
        let graph = DependencyGraph::build(&files, &[]);
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn external_namespaces_cannot_participate_in_cycles() {
        // B has no files here, so A -> B -> (nothing) is not followed even
        // though A imports it.
        let files = [file("A", &["B"])];
        let graph = DependencyGraph::build(&files, &[]);
        assert!(!graph.contains("B"));
        assert!(graph.find_cycles().is_empty());
    }

    #[test]
    fn two_node_cycle() {
        let files = [file("A", &["B"]), file("B", &["A"])];
        let graph = DependencyGraph::build(&files, &[]);
        let cycles = graph.find_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
    }

    #[test]
    fn cycle_reports_are_deterministic() {
        let files = [
            file("M.One", &["M.Two"]),
            file("M.Two", &["M.Three"]),
            file("M.Three", &["M.One"]),
            file("N.Left", &["N.Right"]),
            file("N.Right", &["N.Left"]),
        ];
        let graph = DependencyGraph::build(&files, &[]);
        let first = graph.find_cycles();
        let second = graph.find_cycles();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
