//! Unit tests for cycle breaking and emission planning.

use ctygen_core::TypeRef;

use crate::cycles::{EmitStep, plan};
use crate::graph::DependencyGraph;
use crate::order::sort;
use crate::report::SkipReason;
use crate::test_utils::*;

fn steps_for(catalog: &ctygen_core::SnapshotCatalog, root_names: &[&str]) -> Vec<EmitStep> {
    let graph = DependencyGraph::build(catalog, &roots(root_names), true);
    let topo = sort(&graph);
    let (plan, skips) = plan(&graph, &topo, &[]);
    assert!(skips.is_empty(), "unexpected skips: {skips:?}");
    plan.steps
}

#[test]
fn self_referential_struct_gets_one_shell_and_one_patch() {
    let catalog = catalog(vec![strukt(
        "Node",
        vec![field("next", TypeRef::named("Node").pointer(1))],
    )]);

    let steps = steps_for(&catalog, &["Node"]);

    assert_eq!(
        steps,
        vec![
            EmitStep::Shell("Node".to_string()),
            EmitStep::Patch("Node".to_string()),
        ]
    );
}

#[test]
fn mutual_pointer_cycle_shells_both_then_patches_both() {
    let catalog = catalog(vec![
        strukt(
            "A",
            vec![
                field("b", TypeRef::named("B").pointer(1)),
                field("x", TypeRef::prim(ctygen_core::Primitive::U32)),
            ],
        ),
        strukt("B", vec![field("a", TypeRef::named("A").pointer(1))]),
    ]);

    let steps = steps_for(&catalog, &["A"]);

    // B has fewer fields, so it is the deferred member and shells first.
    assert_eq!(
        steps,
        vec![
            EmitStep::Shell("B".to_string()),
            EmitStep::Shell("A".to_string()),
            EmitStep::Patch("A".to_string()),
            EmitStep::Patch("B".to_string()),
        ]
    );
}

#[test]
fn acyclic_nodes_are_planned_before_groups() {
    let catalog = catalog(vec![
        strukt("Free", vec![]),
        strukt("Loop", vec![field("l", TypeRef::named("Loop").pointer(1))]),
    ]);

    let steps = steps_for(&catalog, &["Free", "Loop"]);

    assert_eq!(
        steps,
        vec![
            EmitStep::Define("Free".to_string()),
            EmitStep::Shell("Loop".to_string()),
            EmitStep::Patch("Loop".to_string()),
        ]
    );
}

#[test]
fn stubs_come_first() {
    let catalog = catalog(vec![strukt("Only", vec![])]);
    let graph = DependencyGraph::build(&catalog, &roots(&["Only"]), true);
    let topo = sort(&graph);

    let (plan, _) = plan(&graph, &topo, &["Ghost".to_string()]);

    assert_eq!(
        plan.steps,
        vec![
            EmitStep::Stub("Ghost".to_string()),
            EmitStep::Define("Only".to_string()),
        ]
    );
}

#[test]
fn value_cycle_is_skipped_as_non_pointer() {
    let catalog = catalog(vec![
        strukt("A", vec![field("b", TypeRef::named("B"))]),
        strukt("B", vec![field("a", TypeRef::named("A"))]),
        strukt("Free", vec![]),
    ]);
    let graph = DependencyGraph::build(&catalog, &roots(&["A", "Free"]), true);
    let topo = sort(&graph);

    let (plan, skips) = plan(&graph, &topo, &[]);

    assert_eq!(plan.steps, vec![EmitStep::Define("Free".to_string())]);
    assert_eq!(skips.len(), 2);
    assert!(
        skips
            .iter()
            .all(|s| s.reason == SkipReason::NonPointerCycle)
    );
    let mut names: Vec<&str> = skips.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn typedef_in_cycle_is_defined_between_patches() {
    // X holds Alias by value, Alias renames Z, Z points back at X.
    // The alias has no shell form, so X's patch must wait for it, and the
    // alias must wait for Z's full definition.
    let catalog = catalog(vec![
        strukt("X", vec![field("a", TypeRef::named("Alias"))]),
        typedef("Alias", TypeRef::named("Z")),
        strukt("Z", vec![field("x", TypeRef::named("X").pointer(1))]),
    ]);

    let steps = steps_for(&catalog, &["X"]);

    assert_eq!(
        steps,
        vec![
            EmitStep::Shell("X".to_string()),
            EmitStep::Shell("Z".to_string()),
            EmitStep::Patch("Z".to_string()),
            EmitStep::Define("Alias".to_string()),
            EmitStep::Patch("X".to_string()),
        ]
    );
}

#[test]
fn one_bad_group_does_not_poison_another() {
    let catalog = catalog(vec![
        strukt("Bad1", vec![field("b", TypeRef::named("Bad2"))]),
        strukt("Bad2", vec![field("a", TypeRef::named("Bad1"))]),
        strukt("Ok1", vec![field("o", TypeRef::named("Ok1").pointer(1))]),
    ]);
    let graph = DependencyGraph::build(&catalog, &roots(&["Bad1", "Ok1"]), true);
    let topo = sort(&graph);

    let (plan, skips) = plan(&graph, &topo, &[]);

    assert_eq!(
        plan.steps,
        vec![
            EmitStep::Shell("Ok1".to_string()),
            EmitStep::Patch("Ok1".to_string()),
        ]
    );
    assert_eq!(skips.len(), 2);
}
