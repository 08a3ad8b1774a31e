//! Outer surface extraction for rendering.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::grid::Grid;

/// A renderable polygon on the grid's outer surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceFace {
    /// Cell the face belongs to.
    pub cell: usize,
    /// Point indices, counter-clockwise seen from outside.
    pub points: Vec<usize>,
}

impl SurfaceFace {
    /// Unnormalized face normal (Newell's method).
    pub fn normal(&self, grid: &Grid) -> Vector3<f64> {
        let pts = grid.points();
        let mut n = Vector3::zeros();
        for (i, &a) in self.points.iter().enumerate() {
            let b = self.points[(i + 1) % self.points.len()];
            let (p, q) = (pts[a], pts[b]);
            n.x += (p.y - q.y) * (p.z + q.z);
            n.y += (p.z - q.z) * (p.x + q.x);
            n.z += (p.x - q.x) * (p.y + q.y);
        }
        n
    }
}

/// Faces of solid cells used by exactly one cell, plus every shell cell.
///
/// Line cells contribute nothing. Output order is deterministic: cells in
/// index order, faces in local order.
pub fn extract_surface(grid: &Grid) -> Vec<SurfaceFace> {
    let mut candidates: Vec<SurfaceFace> = Vec::new();
    let mut uses: HashMap<Vec<usize>, usize> = HashMap::new();

    for (cell_index, cell) in grid.cells().iter().enumerate() {
        let solid = cell.kind.dimension() == 3;
        for local in cell.kind.faces() {
            let points: Vec<usize> = local.iter().map(|&l| cell.points[l]).collect();
            if solid {
                let mut key = points.clone();
                key.sort_unstable();
                *uses.entry(key).or_insert(0) += 1;
            }
            candidates.push(SurfaceFace {
                cell: cell_index,
                points,
            });
        }
    }

    candidates
        .into_iter()
        .filter(|face| {
            if grid.cells()[face.cell].kind.dimension() != 3 {
                return true;
            }
            let mut key = face.points.clone();
            key.sort_unstable();
            uses.get(&key).copied() == Some(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeshBuilder;
    use crate::mesh::ElementKind;
    use fv_core::{EntityId, ids};

    fn two_hexes() -> Grid {
        let mut b = MeshBuilder::new();
        let mut id = 1;
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..3 {
                    b.add_node(EntityId::new(id), [x as f64, y as f64, z as f64]);
                    id += 1;
                }
            }
        }
        // node id = 1 + x + 3*y + 6*z
        b.add_element(
            EntityId::new(1),
            ElementKind::Hex8,
            &ids([1, 2, 5, 4, 7, 8, 11, 10]),
        );
        b.add_element(
            EntityId::new(2),
            ElementKind::Hex8,
            &ids([2, 3, 6, 5, 8, 9, 12, 11]),
        );
        b.build().unwrap().grid()
    }

    #[test]
    fn shared_face_is_hidden() {
        let grid = two_hexes();
        let faces = extract_surface(&grid);
        assert_eq!(faces.len(), 10);
        assert_eq!(faces.iter().filter(|f| f.cell == 0).count(), 5);
    }

    #[test]
    fn hex_normals_point_outward() {
        let grid = two_hexes();
        let center = grid.center();
        for face in extract_surface(&grid) {
            let n = face.normal(&grid);
            let p = grid.points()[face.points[0]];
            assert!(n.dot(&(p - center)) > 0.0, "inward face {:?}", face);
        }
    }

    #[test]
    fn shells_are_kept() {
        let mut b = MeshBuilder::new();
        b.add_node(EntityId::new(1), [0.0, 0.0, 0.0])
            .add_node(EntityId::new(2), [1.0, 0.0, 0.0])
            .add_node(EntityId::new(3), [0.0, 1.0, 0.0]);
        b.add_element(EntityId::new(1), ElementKind::Tri3, &ids([1, 2, 3]));
        b.add_element(EntityId::new(2), ElementKind::Line2, &ids([1, 2]));
        let grid = b.build().unwrap().grid();
        let faces = extract_surface(&grid);
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].points, vec![0, 1, 2]);
    }
}
