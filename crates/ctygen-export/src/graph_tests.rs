//! Unit tests for closure expansion.

use ctygen_core::{Primitive, RefStrength, TypeRef};

use crate::graph::DependencyGraph;
use crate::test_utils::*;

#[test]
fn closure_pulls_in_transitive_dependencies() {
    let catalog = catalog(vec![
        strukt("Outer", vec![field("mid", TypeRef::named("Mid"))]),
        strukt("Mid", vec![field("inner", TypeRef::named("Inner"))]),
        strukt("Inner", vec![field("v", TypeRef::prim(Primitive::U32))]),
        strukt("Unrelated", vec![]),
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["Outer"]), true);

    let names: Vec<&str> = graph.names().collect();
    assert_eq!(names, vec!["Outer", "Mid", "Inner"]);
    assert!(graph.unresolved().is_empty());
    assert!(graph.unsupported().is_empty());
}

#[test]
fn diamond_dependencies_appear_once() {
    let shared = strukt("Shared", vec![]);
    let catalog = catalog(vec![
        strukt("A", vec![field("s", TypeRef::named("Shared"))]),
        strukt("B", vec![field("s", TypeRef::named("Shared"))]),
        shared,
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["A", "B"]), true);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.names().filter(|&n| n == "Shared").count(), 1);
}

#[test]
fn edge_strength_reflects_pointer_indirection() {
    let catalog = catalog(vec![
        strukt(
            "Node",
            vec![
                field("next", TypeRef::named("Node").pointer(1)),
                field("payload", TypeRef::named("Payload")),
            ],
        ),
        strukt("Payload", vec![]),
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["Node"]), true);

    let mut edges: Vec<(&str, &str, RefStrength)> = graph
        .edges()
        .iter()
        .map(|e| (e.from, e.to, e.strength))
        .collect();
    edges.sort();
    assert_eq!(
        edges,
        vec![
            ("Node", "Node", RefStrength::Name),
            ("Node", "Payload", RefStrength::Complete),
        ]
    );
}

#[test]
fn duplicate_references_produce_one_edge() {
    let catalog = catalog(vec![
        strukt(
            "Pair",
            vec![
                field("a", TypeRef::named("Item")),
                field("b", TypeRef::named("Item")),
            ],
        ),
        strukt("Item", vec![]),
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["Pair"]), true);

    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn unresolved_references_are_recorded_with_referrer() {
    let catalog = catalog(vec![strukt(
        "Holder",
        vec![field("ghost", TypeRef::named("Ghost").pointer(1))],
    )]);

    let graph = DependencyGraph::build(&catalog, &roots(&["Holder"]), true);

    assert_eq!(graph.unresolved().len(), 1);
    assert_eq!(graph.unresolved()[0].name, "Ghost");
    assert_eq!(graph.unresolved()[0].referrer, "Holder");
    // The unresolved name is not a node and contributes no edges.
    assert_eq!(graph.len(), 1);
    assert!(graph.edges().is_empty());
}

#[test]
fn unsupported_nodes_are_recorded_not_admitted() {
    let catalog = catalog(vec![
        strukt("User", vec![field("h", TypeRef::named("HostThing").pointer(1))]),
        unsupported("HostThing", "vtable thunk"),
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["User"]), true);

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.unsupported().len(), 1);
    let entry = &graph.unsupported()[0];
    assert_eq!(entry.name, "HostThing");
    assert_eq!(entry.reason, "vtable thunk");
    assert_eq!(entry.referrers, vec!["User".to_string()]);
}

#[test]
fn unsupported_root_has_no_referrers() {
    let catalog = catalog(vec![unsupported("HostThing", "vtable thunk")]);

    let graph = DependencyGraph::build(&catalog, &roots(&["HostThing"]), true);

    assert!(graph.is_empty());
    assert_eq!(graph.unsupported().len(), 1);
    assert!(graph.unsupported()[0].referrers.is_empty());
}

#[test]
fn no_deps_mode_keeps_in_set_edges_only() {
    let catalog = catalog(vec![
        strukt("A", vec![field("b", TypeRef::named("B"))]),
        strukt("B", vec![field("c", TypeRef::named("C"))]),
        strukt("C", vec![]),
    ]);

    let graph = DependencyGraph::build(&catalog, &roots(&["A", "B"]), false);

    let names: Vec<&str> = graph.names().collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(graph.edges().len(), 1);
    assert_eq!(graph.edges()[0].to, "B");
    // C exists in the catalog but is outside the set: unresolved by policy.
    assert_eq!(graph.unresolved().len(), 1);
    assert_eq!(graph.unresolved()[0].name, "C");
}

#[test]
fn primitive_references_make_no_edges() {
    let catalog = catalog(vec![strukt(
        "Plain",
        vec![
            field("a", TypeRef::prim(Primitive::U8)),
            field("b", TypeRef::prim(Primitive::F64).pointer(1)),
        ],
    )]);

    let graph = DependencyGraph::build(&catalog, &roots(&["Plain"]), true);

    assert_eq!(graph.len(), 1);
    assert!(graph.edges().is_empty());
}
