//! Renderable unstructured grid with point and cell data stores.

use nalgebra::Point3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{ElementKind, Mesh};

/// One grid cell: a shape and its point indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: ElementKind,
    pub points: Vec<usize>,
}

/// Flat attribute array, `component_count` values per tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    values: Vec<f64>,
    component_count: usize,
}

impl DataArray {
    pub fn new(values: Vec<f64>, component_count: usize) -> MeshResult<Self> {
        if component_count == 0 || values.len() % component_count != 0 {
            return Err(MeshError::BadArrayShape {
                len: values.len(),
                component_count,
            });
        }
        Ok(Self {
            values,
            component_count,
        })
    }

    pub fn scalars(values: Vec<f64>) -> Self {
        Self {
            values,
            component_count: 1,
        }
    }

    /// `n_tuples` tuples with every value set to `fill`.
    ///
    /// A `component_count` of zero is treated as one.
    pub fn filled(n_tuples: usize, component_count: usize, fill: f64) -> Self {
        let component_count = component_count.max(1);
        Self {
            values: vec![fill; n_tuples * component_count],
            component_count,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn n_tuples(&self) -> usize {
        self.values.len() / self.component_count
    }

    pub fn tuple(&self, i: usize) -> Option<&[f64]> {
        let cc = self.component_count;
        self.values.get(i * cc..(i + 1) * cc)
    }

    /// Scalar value used for colouring tuple `i`: the value itself for
    /// scalar arrays, the Euclidean norm otherwise.
    pub fn magnitude(&self, i: usize) -> Option<f64> {
        let t = self.tuple(i)?;
        if t.len() == 1 {
            Some(t[0])
        } else {
            Some(t.iter().map(|v| v * v).sum::<f64>().sqrt())
        }
    }
}

/// Ordered name -> array store. Inserting an existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    arrays: Vec<(String, DataArray)>,
}

impl DataStore {
    pub fn insert(&mut self, name: impl Into<String>, array: DataArray) {
        let name = name.into();
        match self.arrays.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = array,
            None => self.arrays.push((name, array)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let pos = self.arrays.iter().position(|(n, _)| n == name)?;
        Some(self.arrays.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn clear(&mut self) {
        self.arrays.clear();
    }
}

/// Which store of a grid an array lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Point,
    Cell,
}

/// Unstructured grid ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    points: Vec<Point3<f64>>,
    cells: Vec<Cell>,
    pub point_data: DataStore,
    pub cell_data: DataStore,
    active_scalars: Option<String>,
}

impl Grid {
    pub fn new(points: Vec<Point3<f64>>, cells: Vec<Cell>) -> Self {
        Self {
            points,
            cells,
            point_data: DataStore::default(),
            cell_data: DataStore::default(),
            active_scalars: None,
        }
    }

    /// Point order follows node order, cell order follows element order.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let points = mesh.nodes().iter().map(|n| n.position).collect();
        let cells = mesh
            .elements()
            .iter()
            .enumerate()
            .map(|(i, e)| Cell {
                kind: e.kind,
                points: mesh.element_connectivity(i).to_vec(),
            })
            .collect();
        Self::new(points, cells)
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn active_scalars(&self) -> Option<&str> {
        self.active_scalars.as_deref()
    }

    pub fn set_active_scalars(&mut self, name: impl Into<String>) {
        self.active_scalars = Some(name.into());
    }

    pub fn store(&self, kind: DataKind) -> &DataStore {
        match kind {
            DataKind::Point => &self.point_data,
            DataKind::Cell => &self.cell_data,
        }
    }

    /// Array `name` in the store for `kind`.
    pub fn array(&self, kind: DataKind, name: &str) -> Option<&DataArray> {
        self.store(kind).get(name)
    }

    /// Axis-aligned bounds, None for an empty grid.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.points.first()?;
        let (lo, hi) = self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        });
        Some((lo, hi))
    }

    pub fn center(&self) -> Point3<f64> {
        self.bounds()
            .map(|(lo, hi)| nalgebra::center(&lo, &hi))
            .unwrap_or_else(Point3::origin)
    }

    /// Length of the bounding-box diagonal (0 for empty or single-point grids).
    pub fn diagonal(&self) -> f64 {
        self.bounds()
            .map(|(lo, hi)| (hi - lo).norm())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Grid {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 3.0),
        ];
        let cells = vec![
            Cell {
                kind: ElementKind::Tri3,
                points: vec![0, 1, 2],
            },
            Cell {
                kind: ElementKind::Tri3,
                points: vec![0, 2, 3],
            },
        ];
        Grid::new(points, cells)
    }

    #[test]
    fn data_array_shape_checked() {
        assert!(DataArray::new(vec![0.0; 6], 3).is_ok());
        assert!(matches!(
            DataArray::new(vec![0.0; 5], 3),
            Err(MeshError::BadArrayShape {
                len: 5,
                component_count: 3
            })
        ));
        assert!(DataArray::new(vec![], 0).is_err());
    }

    #[test]
    fn magnitude_of_vectors() {
        let a = DataArray::new(vec![3.0, 4.0, 0.0, 1.0, 0.0, 0.0], 3).unwrap();
        assert_eq!(a.n_tuples(), 2);
        assert_eq!(a.magnitude(0), Some(5.0));
        assert_eq!(a.magnitude(1), Some(1.0));
        assert_eq!(a.magnitude(2), None);
    }

    #[test]
    fn store_replaces_in_place() {
        let mut store = DataStore::default();
        store.insert("a", DataArray::scalars(vec![1.0]));
        store.insert("b", DataArray::scalars(vec![2.0]));
        store.insert("a", DataArray::scalars(vec![3.0]));
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().values(), &[3.0]);
        assert!(store.remove("b").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn array_lookup_is_per_store() {
        let mut grid = two_triangles();
        grid.cell_data.insert("t", DataArray::scalars(vec![1.0, 2.0]));
        grid.point_data.insert("t", DataArray::scalars(vec![0.0; 4]));
        assert_eq!(grid.array(DataKind::Cell, "t").unwrap().values(), &[1.0, 2.0]);
        assert_eq!(grid.array(DataKind::Point, "t").unwrap().values(), &[0.0; 4]);
        assert!(grid.array(DataKind::Cell, "missing").is_none());
    }

    #[test]
    fn bounds_and_center() {
        let grid = two_triangles();
        let (lo, hi) = grid.bounds().unwrap();
        assert_eq!(lo, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hi, Point3::new(2.0, 1.0, 3.0));
        assert_eq!(grid.center(), Point3::new(1.0, 0.5, 1.5));
        assert!((grid.diagonal() - 14.0_f64.sqrt()).abs() < 1e-12);
    }
}
