//! Dependency graph construction by closure expansion.
//!
//! Starting from the selected roots, every reference is resolved through
//! the catalog and unseen targets are queued until a fixpoint. The result
//! is an insertion-ordered node set plus a typed edge list; names the
//! catalog cannot resolve and nodes the exporter cannot translate are
//! recorded, never silently dropped.

use std::collections::{HashSet, VecDeque};

use ctygen_core::{RefStrength, TypeCatalog, TypeKind, TypeNode};
use indexmap::IndexMap;

/// Directed dependency edge: `from` depends on `to`, so `to` must be
/// emitted before `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub strength: RefStrength,
}

/// A referenced name the catalog has no definition for.
#[derive(Debug, Clone, PartialEq)]
pub struct Unresolved {
    pub name: String,
    pub referrer: String,
}

/// A catalog node whose kind cannot be translated, with every type that
/// references it.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsupported {
    pub name: String,
    pub reason: String,
    pub referrers: Vec<String>,
}

/// Closure of the root set: nodes, edges, and unresolvable references.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    nodes: IndexMap<&'a str, &'a TypeNode>,
    edges: Vec<Edge<'a>>,
    unresolved: Vec<Unresolved>,
    unsupported: Vec<Unsupported>,
}

impl<'a> DependencyGraph<'a> {
    /// Expand `roots` to the full closure of referenced types.
    ///
    /// With `follow_deps` off, only the roots themselves become nodes;
    /// edges between them are still collected so their relative order is
    /// correct, and references leaving the set are treated as unresolved.
    pub fn build(
        catalog: &'a dyn TypeCatalog,
        roots: &[String],
        follow_deps: bool,
    ) -> DependencyGraph<'a> {
        let mut graph = DependencyGraph {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            unresolved: Vec::new(),
            unsupported: Vec::new(),
        };
        let in_set: Option<HashSet<&str>> = if follow_deps {
            None
        } else {
            Some(roots.iter().map(String::as_str).collect())
        };

        let mut queue: VecDeque<&'a TypeNode> = VecDeque::new();
        let mut seen: HashSet<&'a str> = HashSet::new();

        for root in roots {
            match catalog.lookup(root) {
                None => graph.record_unresolved(root, "(roots)"),
                Some(node) => {
                    if seen.insert(node.name.as_str()) {
                        graph.admit(node, &mut queue);
                    }
                }
            }
        }

        let mut edge_seen: HashSet<Edge<'a>> = HashSet::new();
        while let Some(node) = queue.pop_front() {
            for (type_ref, strength) in node.references() {
                let Some(target) = type_ref.named_target() else {
                    continue;
                };
                if let Some(allowed) = &in_set
                    && !allowed.contains(target)
                {
                    graph.record_unresolved(target, &node.name);
                    continue;
                }
                match catalog.lookup(target) {
                    None => graph.record_unresolved(target, &node.name),
                    Some(dep) => {
                        if let TypeKind::Unsupported { reason } = &dep.kind {
                            graph.record_unsupported(&dep.name, reason, &node.name);
                            continue;
                        }
                        let edge = Edge {
                            from: node.name.as_str(),
                            to: dep.name.as_str(),
                            strength,
                        };
                        if edge_seen.insert(edge) {
                            graph.edges.push(edge);
                        }
                        if seen.insert(dep.name.as_str()) {
                            graph.admit(dep, &mut queue);
                        }
                    }
                }
            }
        }

        graph
    }

    fn admit(&mut self, node: &'a TypeNode, queue: &mut VecDeque<&'a TypeNode>) {
        if let TypeKind::Unsupported { reason } = &node.kind {
            // A root that is itself untranslatable: skip it, no referrer.
            self.record_unsupported(&node.name, reason, "");
            return;
        }
        self.nodes.insert(node.name.as_str(), node);
        queue.push_back(node);
    }

    fn record_unresolved(&mut self, name: &str, referrer: &str) {
        let entry = Unresolved {
            name: name.to_string(),
            referrer: referrer.to_string(),
        };
        if !self.unresolved.contains(&entry) {
            self.unresolved.push(entry);
        }
    }

    fn record_unsupported(&mut self, name: &str, reason: &str, referrer: &str) {
        let idx = match self.unsupported.iter().position(|u| u.name == name) {
            Some(idx) => idx,
            None => {
                self.unsupported.push(Unsupported {
                    name: name.to_string(),
                    reason: reason.to_string(),
                    referrers: Vec::new(),
                });
                self.unsupported.len() - 1
            }
        };
        let entry = &mut self.unsupported[idx];
        if !referrer.is_empty() && !entry.referrers.iter().any(|r| r == referrer) {
            entry.referrers.push(referrer.to_string());
        }
    }

    pub fn node(&self, name: &str) -> Option<&'a TypeNode> {
        self.nodes.get(name).copied()
    }

    /// Node names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> &[Edge<'a>] {
        &self.edges
    }

    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    pub fn unsupported(&self) -> &[Unsupported] {
        &self.unsupported
    }
}
