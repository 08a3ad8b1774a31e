//! Incremental mesh builder.

use fv_core::{ElementId, NodeId};
use nalgebra::Point3;

use crate::error::MeshResult;
use crate::indexing::EntityCollection;
use crate::mesh::{Element, ElementKind, Mesh, Node};
use crate::validate;

/// Accumulates nodes and elements, then validates once in [`MeshBuilder::build`].
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    unit: String,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
            unit: "m".to_string(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn add_node(&mut self, id: NodeId, position: [f64; 3]) -> &mut Self {
        self.nodes.push(Node {
            id,
            position: Point3::from(position),
        });
        self
    }

    pub fn add_element(&mut self, id: ElementId, kind: ElementKind, nodes: &[NodeId]) -> &mut Self {
        self.elements.push(Element {
            id,
            kind,
            nodes: nodes.to_vec(),
        });
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Validate and freeze the mesh.
    pub fn build(self) -> MeshResult<Mesh> {
        let nodes = EntityCollection::new(self.nodes, "node")?;
        let elements = EntityCollection::new(self.elements, "element")?;
        let connectivity = validate::resolve_connectivity(&nodes, &elements)?;

        tracing::debug!(
            nodes = nodes.len(),
            elements = elements.len(),
            "mesh built"
        );

        Ok(Mesh {
            nodes,
            elements,
            connectivity,
            unit: self.unit,
        })
    }
}
