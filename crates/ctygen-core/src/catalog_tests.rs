//! Unit tests for snapshot loading and the catalog contract.

use indoc::indoc;

use crate::{
    Primitive, SnapshotCatalog, SnapshotError, TypeCatalog, TypeKind, TypeNode, TypeRef,
};

#[test]
fn parses_struct_snapshot() {
    let json = indoc! {r#"
        {
          "types": [
            {
              "name": "Point",
              "struct": {
                "packed": true,
                "fields": [
                  { "name": "x", "ty": { "prim": "i32" } },
                  { "name": "y", "ty": { "prim": "i32" } }
                ]
              }
            }
          ]
        }
    "#};

    let catalog = SnapshotCatalog::from_json(json).unwrap();

    assert_eq!(catalog.names(), vec!["Point"]);
    let point = catalog.lookup("Point").unwrap();
    match &point.kind {
        TypeKind::Struct { packed, fields } => {
            assert!(*packed);
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, "x");
            assert_eq!(fields[0].ty, TypeRef::prim(Primitive::I32));
        }
        other => panic!("expected struct, got {other:?}"),
    }
}

#[test]
fn parses_pointer_modifiers_on_references() {
    let json = indoc! {r#"
        {
          "types": [
            {
              "name": "Node",
              "struct": {
                "fields": [
                  { "name": "next", "ty": { "named": "Node", "ptr": 1 } },
                  { "name": "tag", "ty": { "prim": "u8", "dims": [4] } }
                ]
              }
            }
          ]
        }
    "#};

    let catalog = SnapshotCatalog::from_json(json).unwrap();
    let node = catalog.lookup("Node").unwrap();
    let TypeKind::Struct { fields, packed } = &node.kind else {
        panic!("expected struct");
    };

    assert!(!packed);
    assert_eq!(fields[0].ty, TypeRef::named("Node").pointer(1));
    assert_eq!(fields[1].ty, TypeRef::prim(Primitive::U8).array(vec![4]));
}

#[test]
fn rejects_duplicate_names() {
    let nodes = vec![
        TypeNode::new("Dup", TypeKind::Primitive(Primitive::U8)),
        TypeNode::new("Dup", TypeKind::Primitive(Primitive::U16)),
    ];

    let err = SnapshotCatalog::from_nodes(nodes).unwrap_err();
    assert!(matches!(err, SnapshotError::DuplicateType(name) if name == "Dup"));
}

#[test]
fn rejects_malformed_json() {
    let err = SnapshotCatalog::from_json("{\"types\": [{\"name\": 3}]}").unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn lookup_misses_return_none() {
    let catalog = SnapshotCatalog::from_nodes(vec![]).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.lookup("Anything").is_none());
}

#[test]
fn names_preserve_snapshot_order() {
    let nodes = vec![
        TypeNode::new("Zeta", TypeKind::Primitive(Primitive::U8)),
        TypeNode::new("Alpha", TypeKind::Primitive(Primitive::U8)),
    ];

    let catalog = SnapshotCatalog::from_nodes(nodes).unwrap();
    assert_eq!(catalog.names(), vec!["Zeta", "Alpha"]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn snapshot_round_trips_through_serde() {
    let nodes = vec![TypeNode::new(
        "Cb",
        TypeKind::FunctionPointer {
            params: vec![TypeRef::named("Ctx").pointer(1)],
            ret: TypeRef::prim(Primitive::I32),
        },
    )];

    let doc = crate::catalog::Snapshot {
        types: nodes.clone(),
    };
    let json = serde_json::to_string(&doc).unwrap();
    let catalog = SnapshotCatalog::from_json(&json).unwrap();

    assert_eq!(catalog.lookup("Cb").unwrap(), &nodes[0]);
}
