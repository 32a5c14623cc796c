//! Read-only catalog contract and the JSON snapshot implementation.
//!
//! The export engine only ever looks types up by name and enumerates the
//! full name set; it never mutates a catalog. Hosts with a live type system
//! implement [`TypeCatalog`] directly; everything else goes through
//! [`SnapshotCatalog`], a snapshot loaded once per session.

use std::path::Path;

use indexmap::IndexMap;

use crate::TypeNode;

/// Read-only query interface into an external type system.
pub trait TypeCatalog {
    /// Look a type up by its unique name.
    fn lookup(&self, name: &str) -> Option<&TypeNode>;

    /// All type names known to the catalog, in catalog order.
    fn names(&self) -> Vec<&str>;
}

/// Errors from loading a catalog snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate type name in snapshot: `{0}`")]
    DuplicateType(String),
}

/// Raw snapshot document: `{"types": [...]}`.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub types: Vec<TypeNode>,
}

/// A catalog backed by a loaded snapshot. Preserves snapshot order for
/// `names()` so selection and output are reproducible.
#[derive(Debug, Default)]
pub struct SnapshotCatalog {
    types: IndexMap<String, TypeNode>,
}

impl SnapshotCatalog {
    /// Build a catalog from already-constructed nodes.
    ///
    /// Duplicate names are rejected rather than last-wins: a snapshot with
    /// two definitions for one name is not a valid snapshot.
    pub fn from_nodes(
        nodes: impl IntoIterator<Item = TypeNode>,
    ) -> Result<Self, SnapshotError> {
        let mut types = IndexMap::new();
        for node in nodes {
            let name = node.name.clone();
            if types.insert(name.clone(), node).is_some() {
                return Err(SnapshotError::DuplicateType(name));
            }
        }
        Ok(SnapshotCatalog { types })
    }

    /// Parse a snapshot from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_nodes(snapshot.types)
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for SnapshotCatalog {
    fn lookup(&self, name: &str) -> Option<&TypeNode> {
        self.types.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}
