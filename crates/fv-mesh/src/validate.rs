//! Mesh validation logic.

use crate::error::{MeshError, MeshResult};
use crate::indexing::EntityCollection;
use crate::mesh::{Element, Node};

/// Check element shapes and resolve node ids to node positions.
pub(crate) fn resolve_connectivity(
    nodes: &EntityCollection<Node>,
    elements: &EntityCollection<Element>,
) -> MeshResult<Vec<Vec<usize>>> {
    let mut connectivity = Vec::with_capacity(elements.len());

    for element in elements {
        // Connectivity length must match the kind
        if element.nodes.len() != element.kind.node_count() {
            return Err(MeshError::BadConnectivity {
                element: element.id,
                kind: element.kind,
                count: element.nodes.len(),
            });
        }

        // Every node must exist
        let mut resolved = Vec::with_capacity(element.nodes.len());
        for &node in &element.nodes {
            let index = nodes.index_of(node).ok_or(MeshError::UnknownNode {
                element: element.id,
                node,
            })?;
            resolved.push(index);
        }
        connectivity.push(resolved);
    }

    Ok(connectivity)
}
