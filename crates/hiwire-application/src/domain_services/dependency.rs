//! Dependency Graph Resolver
//!
//! Orders a [`Graph`] so that every node appears after the nodes it depends
//! on (Kahn's algorithm, processed in rounds).
//!
//! Nodes that become ready in the same round are emitted in name order, so
//! the result only depends on the set of nodes, not on input order.
//! Dependency names that do not belong to the graph are treated as already
//! satisfied (built in an earlier phase or registered externally).

use hiwire_domain::error::{Error, Result};
use hiwire_domain::value_objects::{Graph, Node};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

/// Resolve the dependency graph into a topologically valid order.
///
/// # Errors
///
/// - `CircularDependency` carrying exactly the nodes that lie on a cycle
/// - `DuplicateArtifactName` when two nodes share a name
pub fn resolve_graph(graph: Graph) -> Result<Graph> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(graph.len());
    for (position, node) in graph.iter().enumerate() {
        if positions.insert(node.name.clone(), position).is_some() {
            return Err(Error::duplicate_artifact(node.name.clone()));
        }
    }

    // Deduplicated in-graph dependencies per node, and the reverse edges.
    let mut pending: Vec<usize> = vec![0; graph.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];
    let mut edges: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); graph.len()];
    for (position, node) in graph.iter().enumerate() {
        for dependency in &node.dependencies {
            if let Some(&target) = positions.get(dependency) {
                if edges[position].insert(target) {
                    pending[position] += 1;
                    dependents[target].push(position);
                }
            }
        }
    }

    let mut slots: Vec<Option<Node>> = graph.into_iter().map(Some).collect();
    let mut resolved: Graph = Vec::with_capacity(slots.len());
    let mut ready: Vec<usize> = (0..slots.len()).filter(|&p| pending[p] == 0).collect();

    while !ready.is_empty() {
        ready.sort_by(|a, b| node_name(&slots, *a).cmp(node_name(&slots, *b)));
        let mut next = Vec::new();
        for position in ready {
            for &dependent in &dependents[position] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    next.push(dependent);
                }
            }
            if let Some(node) = slots[position].take() {
                resolved.push(node);
            }
        }
        ready = next;
    }

    if resolved.len() == slots.len() {
        return Ok(resolved);
    }

    let remaining: Vec<usize> = (0..slots.len()).filter(|&p| slots[p].is_some()).collect();
    let cyclic = cyclic_subgraph(&remaining, &edges);
    Err(Error::circular_dependency(
        cyclic.into_iter().map(|p| node_name(&slots, p).to_string()),
    ))
}

/// Render a graph as `index: name -> dep` lines, for diagnostics
pub fn describe_graph(graph: &[Node]) -> String {
    let mut out = String::new();
    for node in graph {
        for dependency in &node.dependencies {
            let _ = writeln!(out, "{}: {} -> {}", node.index, node.name, dependency);
        }
    }
    out
}

fn node_name(slots: &[Option<Node>], position: usize) -> &str {
    slots[position].as_ref().map_or("", |node| node.name.as_str())
}

/// Nodes of `remaining` that sit on a cycle: members of a strongly connected
/// component with more than one node, or with a self edge. Nodes that are
/// merely blocked behind a cycle are left out.
fn cyclic_subgraph(remaining: &[usize], edges: &[BTreeSet<usize>]) -> Vec<usize> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let indices: HashMap<usize, NodeIndex> = remaining
        .iter()
        .map(|&position| (position, graph.add_node(position)))
        .collect();

    for &position in remaining {
        for target in &edges[position] {
            if let Some(&to) = indices.get(target) {
                graph.add_edge(indices[&position], to, ());
            }
        }
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&index| graph.contains_edge(index, index))
        })
        .flatten()
        .map(|index| graph[index])
        .collect()
}
