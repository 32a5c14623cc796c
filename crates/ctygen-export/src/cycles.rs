//! Cycle breaking via two-pass declare-then-patch emission.
//!
//! ctypes supports exactly the shape this needs: an aggregate can be
//! declared as an empty class first and given its `_fields_` later, once
//! every name it mentions exists. Each residual group therefore becomes a
//! shell pass over its aggregates followed by a patch pass in constraint
//! order. A group whose cycles survive even with every pointer reference
//! deferred to a shell cannot be represented at all (a value cycle would
//! have infinite size) and fails as a unit, leaving other groups and the
//! acyclic order untouched.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ctygen_core::{RefStrength, TypeKind};

use crate::graph::DependencyGraph;
use crate::order::TopoResult;
use crate::report::{Skip, SkipReason};

/// One step of the final emission plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitStep {
    /// Opaque placeholder for a name with no usable definition.
    Stub(String),
    /// Full single-pass definition.
    Define(String),
    /// Empty forward declaration of an aggregate in a cycle group.
    Shell(String),
    /// Member-list patch completing a previously shelled aggregate.
    Patch(String),
}

impl EmitStep {
    pub fn name(&self) -> &str {
        match self {
            EmitStep::Stub(name)
            | EmitStep::Define(name)
            | EmitStep::Shell(name)
            | EmitStep::Patch(name) => name,
        }
    }
}

/// Ordered emission plan for one invocation.
#[derive(Debug, Default, PartialEq)]
pub struct EmitPlan {
    pub steps: Vec<EmitStep>,
}

/// Schedule stubs, the acyclic order, and every cycle group.
///
/// Stubs come first: nothing constrains them and every later reference to
/// a stubbed name is by pointer anyway. Unrepresentable groups are dropped
/// whole and reported as skips.
pub fn plan<'a>(
    graph: &DependencyGraph<'a>,
    topo: &TopoResult<'a>,
    stubs: &[String],
) -> (EmitPlan, Vec<Skip>) {
    let mut steps = Vec::new();
    let mut skips = Vec::new();

    for stub in stubs {
        steps.push(EmitStep::Stub(stub.clone()));
    }
    for &name in &topo.sorted {
        steps.push(EmitStep::Define(name.to_string()));
    }
    for group in &topo.groups {
        match plan_group(graph, group) {
            Some(group_steps) => steps.extend(group_steps),
            None => {
                for &member in group {
                    skips.push(Skip {
                        name: member.to_string(),
                        reason: SkipReason::NonPointerCycle,
                    });
                }
            }
        }
    }

    (EmitPlan { steps }, skips)
}

/// Plan one residual group, or `None` if it is unrepresentable.
fn plan_group<'a>(graph: &DependencyGraph<'a>, members: &[&'a str]) -> Option<Vec<EmitStep>> {
    let member_set: HashSet<&str> = members.iter().copied().collect();

    // Ordering constraints the shell pass cannot absorb: full definitions
    // needed for size, and names of members that have no shell form.
    let mut remaining: HashMap<&str, usize> = members.iter().map(|&m| (m, 0)).collect();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in graph.edges() {
        if !member_set.contains(edge.from) || !member_set.contains(edge.to) {
            continue;
        }
        let shell_satisfies = edge.strength == RefStrength::Name
            && graph.node(edge.to).is_some_and(|node| node.is_aggregate());
        if shell_satisfies {
            continue;
        }
        if let Some(count) = remaining.get_mut(edge.from) {
            *count += 1;
        }
        dependents.entry(edge.to).or_default().push(edge.from);
    }

    let mut ready: BinaryHeap<Reverse<&str>> = remaining
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&name, _)| Reverse(name))
        .collect();
    let mut order: Vec<&str> = Vec::with_capacity(members.len());
    let mut placed: HashSet<&str> = HashSet::new();

    while let Some(Reverse(name)) = ready.pop() {
        if !placed.insert(name) {
            continue;
        }
        order.push(name);
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

    if order.len() != members.len() {
        // Constraints are cyclic even with shells: no pointer to break at.
        return None;
    }

    let mut steps = Vec::new();
    for &name in &shell_order(graph, members) {
        steps.push(EmitStep::Shell(name.to_string()));
    }
    for &name in &order {
        let is_aggregate = graph.node(name).is_some_and(|node| node.is_aggregate());
        if is_aggregate {
            steps.push(EmitStep::Patch(name.to_string()));
        } else {
            steps.push(EmitStep::Define(name.to_string()));
        }
    }
    Some(steps)
}

/// Shell pass order: the deferred member first (fewest fields, tie-break
/// alphabetical), then the rest alphabetically.
fn shell_order<'a>(graph: &DependencyGraph<'a>, members: &[&'a str]) -> Vec<&'a str> {
    let mut aggregates: Vec<&str> = members
        .iter()
        .copied()
        .filter(|&name| graph.node(name).is_some_and(|node| node.is_aggregate()))
        .collect();
    let Some(&deferred) = aggregates
        .iter()
        .min_by_key(|&&name| (field_count(graph, name), name))
    else {
        return Vec::new();
    };
    aggregates.retain(|&name| name != deferred);
    aggregates.sort_unstable();
    aggregates.insert(0, deferred);
    aggregates
}

fn field_count(graph: &DependencyGraph<'_>, name: &str) -> usize {
    match graph.node(name).map(|node| &node.kind) {
        Some(TypeKind::Struct { fields, .. }) | Some(TypeKind::Union { fields }) => fields.len(),
        _ => 0,
    }
}
