#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for ctygen type export.
//!
//! Two layers:
//! - **Type model**: `TypeNode` / `TypeKind` / `TypeRef`, a 1:1 mapping to
//!   the catalog snapshot JSON
//! - **Catalog contract**: the read-only [`TypeCatalog`] trait the export
//!   engine queries, plus [`SnapshotCatalog`](catalog::SnapshotCatalog)
//!   backed by a loaded snapshot
//!
//! Wildcard selection of root type names lives in [`pattern`].

use std::fmt;

mod catalog;
pub mod pattern;

#[cfg(test)]
mod catalog_tests;

pub use catalog::{SnapshotCatalog, SnapshotError, TypeCatalog};

// ============================================================================
// Scalars
// ============================================================================

/// Fixed-width scalar types with a direct ctypes spelling.
///
/// `Void` is only meaningful behind a pointer (`ctypes.c_void_p`) or as a
/// function-pointer return type (`None`); it has no spelling of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    WChar,
    Void,
}

impl Primitive {
    /// The ctypes spelling of this scalar, e.g. `ctypes.c_uint32`.
    ///
    /// Returns `None` for [`Primitive::Void`]; the emitter special-cases
    /// void behind pointers and in function-pointer returns.
    pub fn ctype(self) -> Option<&'static str> {
        match self {
            Primitive::I8 => Some("ctypes.c_int8"),
            Primitive::I16 => Some("ctypes.c_int16"),
            Primitive::I32 => Some("ctypes.c_int32"),
            Primitive::I64 => Some("ctypes.c_int64"),
            Primitive::U8 => Some("ctypes.c_uint8"),
            Primitive::U16 => Some("ctypes.c_uint16"),
            Primitive::U32 => Some("ctypes.c_uint32"),
            Primitive::U64 => Some("ctypes.c_uint64"),
            Primitive::F32 => Some("ctypes.c_float"),
            Primitive::F64 => Some("ctypes.c_double"),
            Primitive::Bool => Some("ctypes.c_bool"),
            Primitive::Char => Some("ctypes.c_char"),
            Primitive::WChar => Some("ctypes.c_wchar"),
            Primitive::Void => None,
        }
    }

    /// Whether this scalar can carry a bitfield width in ctypes.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::I8
                | Primitive::I16
                | Primitive::I32
                | Primitive::I64
                | Primitive::U8
                | Primitive::U16
                | Primitive::U32
                | Primitive::U64
        )
    }
}

// ============================================================================
// Type references
// ============================================================================

/// What a [`TypeRef`] points at: a named catalog type pending lookup, or a
/// scalar resolved immediately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefTarget {
    Named(String),
    Prim(Primitive),
}

/// A reference to a type, with pointer and array modifiers that are
/// independent of the referenced type's own kind.
///
/// `dims` are array dimensions, outermost first, and wrap the pointer
/// levels: `ptr: 1, dims: [4]` is an array of four pointers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TypeRef {
    #[serde(flatten)]
    pub target: RefTarget,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ptr: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dims: Vec<u64>,
}

fn is_zero(n: &u8) -> bool {
    *n == 0
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            target: RefTarget::Named(name.into()),
            ptr: 0,
            dims: Vec::new(),
        }
    }

    pub fn prim(prim: Primitive) -> Self {
        TypeRef {
            target: RefTarget::Prim(prim),
            ptr: 0,
            dims: Vec::new(),
        }
    }

    pub fn pointer(mut self, depth: u8) -> Self {
        self.ptr = depth;
        self
    }

    pub fn array(mut self, dims: impl Into<Vec<u64>>) -> Self {
        self.dims = dims.into();
        self
    }

    /// Name of the referenced catalog type, if any.
    pub fn named_target(&self) -> Option<&str> {
        match &self.target {
            RefTarget::Named(name) => Some(name),
            RefTarget::Prim(_) => None,
        }
    }

    /// How strongly the referring type depends on the target.
    ///
    /// Anything behind at least one level of pointer indirection only needs
    /// the target's name bound; everything else needs the full definition.
    pub fn strength(&self) -> RefStrength {
        if self.ptr > 0 {
            RefStrength::Name
        } else {
            RefStrength::Complete
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.ptr {
            write!(f, "*")?;
        }
        match &self.target {
            RefTarget::Named(name) => write!(f, "{name}")?,
            RefTarget::Prim(prim) => write!(f, "{prim:?}")?,
        }
        for dim in &self.dims {
            write!(f, "[{dim}]")?;
        }
        Ok(())
    }
}

/// Strength of a dependency edge: does the referrer need the target fully
/// defined, or just its name bound?
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RefStrength {
    /// Target must be fully defined first (size is needed).
    Complete,
    /// Target's name must exist first; a shell declaration satisfies this.
    Name,
}

// ============================================================================
// Type nodes
// ============================================================================

/// One field of a struct or union. `bits` renders the ctypes bitfield
/// three-tuple form and is only valid on integer scalars.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Field {
            name: name.into(),
            ty,
            bits: None,
        }
    }
}

/// One symbol of an enum. Values are emitted verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// The shape of a catalog type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A named alias of a scalar.
    Primitive(Primitive),
    Struct {
        #[serde(default)]
        packed: bool,
        fields: Vec<Field>,
    },
    Union {
        fields: Vec<Field>,
    },
    Enum {
        underlying: Primitive,
        members: Vec<EnumMember>,
    },
    Typedef {
        target: TypeRef,
    },
    Pointer {
        target: TypeRef,
    },
    Array {
        element: TypeRef,
        length: u64,
    },
    FunctionPointer {
        params: Vec<TypeRef>,
        ret: TypeRef,
    },
    /// Host type the adapter could not translate. Never emitted; the export
    /// engine skips it and applies the unresolved-reference policy to any
    /// type that refers to it.
    Unsupported {
        reason: String,
    },
}

/// A single type definition from the catalog, identified by its unique name.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl TypeNode {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeNode {
            name: name.into(),
            kind,
        }
    }

    /// Whether this type can be forward-declared as an empty class shell.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Struct { .. } | TypeKind::Union { .. }
        )
    }

    /// Every type reference this node makes, with its edge strength.
    ///
    /// A pointer type always yields a `Name` edge for its target, on top of
    /// whatever modifiers the target reference carries itself.
    pub fn references(&self) -> Vec<(&TypeRef, RefStrength)> {
        match &self.kind {
            TypeKind::Primitive(_) | TypeKind::Enum { .. } | TypeKind::Unsupported { .. } => {
                Vec::new()
            }
            TypeKind::Struct { fields, .. } | TypeKind::Union { fields } => fields
                .iter()
                .map(|f| (&f.ty, f.ty.strength()))
                .collect(),
            TypeKind::Typedef { target } => vec![(target, target.strength())],
            TypeKind::Pointer { target } => vec![(target, RefStrength::Name)],
            TypeKind::Array { element, .. } => vec![(element, element.strength())],
            TypeKind::FunctionPointer { params, ret } => params
                .iter()
                .chain(std::iter::once(ret))
                .map(|r| (r, r.strength()))
                .collect(),
        }
    }
}
