//! Core mesh data structures.

use core::fmt;

use fv_core::{ElementId, NodeId};
use nalgebra::Point3;

use crate::grid::Grid;
use crate::indexing::{Entity, EntityCollection};

/// Shape of an element, fixing its node count and face layout.
///
/// Node ordering follows the usual finite-element convention: for `Hex8`
/// nodes 0..4 form the bottom face counter-clockwise and 4..8 the top face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Line2,
    Tri3,
    Quad4,
    Tet4,
    Hex8,
}

const TRI3_FACES: &[&[usize]] = &[&[0, 1, 2]];
const QUAD4_FACES: &[&[usize]] = &[&[0, 1, 2, 3]];
const TET4_FACES: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[0, 3, 2]];
const HEX8_FACES: &[&[usize]] = &[
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

impl ElementKind {
    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Line2 => 2,
            ElementKind::Tri3 => 3,
            ElementKind::Quad4 => 4,
            ElementKind::Tet4 => 4,
            ElementKind::Hex8 => 8,
        }
    }

    /// Topological dimension (1 for lines, 2 for shells, 3 for solids).
    pub fn dimension(self) -> u8 {
        match self {
            ElementKind::Line2 => 1,
            ElementKind::Tri3 | ElementKind::Quad4 => 2,
            ElementKind::Tet4 | ElementKind::Hex8 => 3,
        }
    }

    /// Faces as local node positions, outward oriented for solids.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            ElementKind::Line2 => &[],
            ElementKind::Tri3 => TRI3_FACES,
            ElementKind::Quad4 => QUAD4_FACES,
            ElementKind::Tet4 => TET4_FACES,
            ElementKind::Hex8 => HEX8_FACES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Line2 => "line",
            ElementKind::Tri3 => "triangle",
            ElementKind::Quad4 => "quad",
            ElementKind::Tet4 => "tetra",
            ElementKind::Hex8 => "hexa",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mesh node: an id and a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point3<f64>,
}

impl Entity for Node {
    fn id(&self) -> fv_core::EntityId {
        self.id
    }
}

/// A mesh element: an id, a shape, and its nodes by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub nodes: Vec<NodeId>,
}

impl Entity for Element {
    fn id(&self) -> fv_core::EntityId {
        self.id
    }
}

/// Validated mesh. Construct with [`crate::MeshBuilder`].
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) nodes: EntityCollection<Node>,
    pub(crate) elements: EntityCollection<Element>,
    /// Per element, its nodes as positions in `nodes`.
    pub(crate) connectivity: Vec<Vec<usize>>,
    pub(crate) unit: String,
}

impl Mesh {
    pub fn nodes(&self) -> &EntityCollection<Node> {
        &self.nodes
    }

    pub fn elements(&self) -> &EntityCollection<Element> {
        &self.elements
    }

    /// Node positions of the element at `element_index`.
    pub fn element_connectivity(&self, element_index: usize) -> &[usize] {
        &self.connectivity[element_index]
    }

    /// Length unit of node coordinates.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Highest element dimension present, 0 for an element-less mesh.
    pub fn max_dimension(&self) -> u8 {
        self.elements
            .iter()
            .map(|e| e.kind.dimension())
            .max()
            .unwrap_or(0)
    }

    /// Number of elements of each kind, in first-seen order.
    pub fn element_kind_counts(&self) -> Vec<(ElementKind, usize)> {
        let mut counts: Vec<(ElementKind, usize)> = Vec::new();
        for element in self.elements.iter() {
            match counts.iter_mut().find(|(k, _)| *k == element.kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((element.kind, 1)),
            }
        }
        counts
    }

    /// Fresh renderable grid with empty data stores.
    pub fn grid(&self) -> Grid {
        Grid::from_mesh(self)
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meshed Region:")?;
        writeln!(f, "  {} nodes", self.nodes.len())?;
        writeln!(f, "  {} elements", self.elements.len())?;
        writeln!(f, "  Unit: {}", self.unit)?;
        let kinds: Vec<String> = self
            .element_kind_counts()
            .iter()
            .map(|(k, n)| format!("{} {}", n, k))
            .collect();
        if !kinds.is_empty() {
            write!(f, "  With {}", kinds.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_faces_cover_every_node_three_times() {
        let mut seen = [0usize; 8];
        for face in ElementKind::Hex8.faces() {
            for &n in *face {
                seen[n] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 3));
    }

    #[test]
    fn dimensions() {
        assert_eq!(ElementKind::Line2.dimension(), 1);
        assert_eq!(ElementKind::Quad4.dimension(), 2);
        assert_eq!(ElementKind::Hex8.dimension(), 3);
        assert!(ElementKind::Line2.faces().is_empty());
    }
}
