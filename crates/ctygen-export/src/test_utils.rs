//! Shared fixtures for engine tests.

use ctygen_core::{
    EnumMember, Field, Primitive, SnapshotCatalog, TypeKind, TypeNode, TypeRef,
};

pub fn field(name: &str, ty: TypeRef) -> Field {
    Field::new(name, ty)
}

pub fn strukt(name: &str, fields: Vec<Field>) -> TypeNode {
    TypeNode::new(
        name,
        TypeKind::Struct {
            packed: false,
            fields,
        },
    )
}

pub fn packed(name: &str, fields: Vec<Field>) -> TypeNode {
    TypeNode::new(
        name,
        TypeKind::Struct {
            packed: true,
            fields,
        },
    )
}

pub fn union(name: &str, fields: Vec<Field>) -> TypeNode {
    TypeNode::new(name, TypeKind::Union { fields })
}

pub fn typedef(name: &str, target: TypeRef) -> TypeNode {
    TypeNode::new(name, TypeKind::Typedef { target })
}

pub fn enumeration(name: &str, underlying: Primitive, members: &[(&str, i64)]) -> TypeNode {
    TypeNode::new(
        name,
        TypeKind::Enum {
            underlying,
            members: members
                .iter()
                .map(|&(name, value)| EnumMember {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        },
    )
}

pub fn unsupported(name: &str, reason: &str) -> TypeNode {
    TypeNode::new(
        name,
        TypeKind::Unsupported {
            reason: reason.to_string(),
        },
    )
}

pub fn catalog(nodes: Vec<TypeNode>) -> SnapshotCatalog {
    SnapshotCatalog::from_nodes(nodes).expect("valid test catalog")
}

pub fn roots(names: &[&str]) -> Vec<String> {
    names.iter().map(|&n| n.to_string()).collect()
}
