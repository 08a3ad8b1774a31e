//! Mesh-specific error types.

use fv_core::{ElementId, EntityId, NodeId};
use thiserror::Error;

use crate::mesh::ElementKind;

pub type MeshResult<T> = Result<T, MeshError>;

/// Mesh construction and data array errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Two entities of the same kind share an id.
    #[error("Duplicate {what} id {id}")]
    DuplicateId { what: &'static str, id: EntityId },

    #[error("Element {element} refers to non-existent node {node}")]
    UnknownNode { element: ElementId, node: NodeId },

    #[error("Element {element} of kind {kind} has {count} nodes (expected {})", kind.node_count())]
    BadConnectivity {
        element: ElementId,
        kind: ElementKind,
        count: usize,
    },

    /// Data array length is not a multiple of its component count.
    #[error("Data array of length {len} is not a multiple of {component_count} components")]
    BadArrayShape { len: usize, component_count: usize },
}
