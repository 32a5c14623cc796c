//! Deterministic topological emission order.
//!
//! Kahn's algorithm over the full edge set, with an alphabetical ready
//! queue so the order is reproducible across runs. Nodes that never reach
//! zero remaining dependencies sit on at least one cycle (or downstream of
//! one); the weakly-connected components of that residue become the cycle
//! groups handed to the cycle breaker.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::DependencyGraph;

/// Output of the sorter: acyclic prefix plus cycle groups.
#[derive(Debug, PartialEq)]
pub struct TopoResult<'a> {
    /// Names whose dependencies are fully satisfied, in emission order.
    pub sorted: Vec<&'a str>,
    /// Residual components, members sorted alphabetically; groups ordered
    /// by their first member.
    pub groups: Vec<Vec<&'a str>>,
}

/// Compute emission order over all edges, both strengths included.
///
/// Pointer-strength edges participate so pointer cycles surface here as
/// residual groups rather than producing an order that dangles names; the
/// cycle breaker satisfies them with shells.
pub fn sort<'a>(graph: &DependencyGraph<'a>) -> TopoResult<'a> {
    let mut remaining: HashMap<&'a str, usize> =
        graph.names().map(|name| (name, 0)).collect();
    let mut dependents: HashMap<&'a str, Vec<&'a str>> = HashMap::new();

    for edge in graph.edges() {
        if let Some(count) = remaining.get_mut(edge.from) {
            *count += 1;
        }
        dependents.entry(edge.to).or_default().push(edge.from);
    }

    let mut ready: BinaryHeap<Reverse<&'a str>> = remaining
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&name, _)| Reverse(name))
        .collect();

    let mut sorted = Vec::with_capacity(graph.len());
    let mut emitted: HashSet<&'a str> = HashSet::new();

    while let Some(Reverse(name)) = ready.pop() {
        if !emitted.insert(name) {
            continue;
        }
        sorted.push(name);
        if let Some(deps) = dependents.get(name) {
            for &dependent in deps {
                if let Some(count) = remaining.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(Reverse(dependent));
                    }
                }
            }
        }
    }

    let groups = residual_components(graph, &emitted);
    TopoResult { sorted, groups }
}

/// Group the residual nodes into weakly-connected components.
fn residual_components<'a>(
    graph: &DependencyGraph<'a>,
    emitted: &HashSet<&'a str>,
) -> Vec<Vec<&'a str>> {
    let mut residual: Vec<&'a str> = graph
        .names()
        .filter(|name| !emitted.contains(name))
        .collect();
    residual.sort_unstable();

    // Undirected adjacency restricted to residual nodes.
    let residual_set: HashSet<&'a str> = residual.iter().copied().collect();
    let mut adjacent: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
    for edge in graph.edges() {
        if residual_set.contains(edge.from) && residual_set.contains(edge.to) {
            adjacent.entry(edge.from).or_default().push(edge.to);
            adjacent.entry(edge.to).or_default().push(edge.from);
        }
    }

    let mut groups = Vec::new();
    let mut visited: HashSet<&'a str> = HashSet::new();
    for &start in &residual {
        if visited.contains(start) {
            continue;
        }
        let mut members = Vec::new();
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(name) = stack.pop() {
            members.push(name);
            if let Some(neighbors) = adjacent.get(name) {
                for &neighbor in neighbors {
                    if visited.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
        members.sort_unstable();
        groups.push(members);
    }

    // Alphabetical starts make group order deterministic already; keep the
    // invariant explicit for callers.
    groups.sort_by(|a, b| a.first().cmp(&b.first()));
    groups
}
