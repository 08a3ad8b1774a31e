//! Field projector: scatters a scoped field onto a dense grid attribute.
//!
//! A field's values belong to the entities named by its scoping, in
//! scoping order. The projector allocates a NaN-filled array with one tuple
//! per node (nodal fields) or per element (elemental fields), writes each
//! scoped value at its entity's position and attaches the array to a
//! [`Grid`]. Elemental-nodal fields are reduced to elemental first.
//!
//! Every check runs before the grid is touched, so a failed projection
//! leaves the target grid exactly as it was.

use fv_field::{ElementalMean, ElementalReduction, Field, Location};
use fv_mesh::{DataArray, DataKind, Grid, Mesh, ScopingMap};

use crate::error::{AppError, AppResult};

/// Placeholder array handling.
///
/// Some renderers expect both point and cell data to be populated. With
/// `fill_opposite_store` set, a zero-filled scalar array named
/// `placeholder_name` is written to the store the field does not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectorOptions {
    pub placeholder_name: String,
    pub fill_opposite_store: bool,
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        Self {
            placeholder_name: "dummy".to_string(),
            fill_opposite_store: true,
        }
    }
}

/// Name and effective location of an attached attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedAttribute {
    pub attribute_name: String,
    /// `Nodal` or `Elemental`; elemental-nodal input reports `Elemental`.
    pub location: Location,
}

/// A freshly built grid carrying the projected attribute.
#[derive(Debug, Clone)]
pub struct Projection {
    pub grid: Grid,
    pub attribute_name: String,
    pub location: Location,
}

/// Grid store holding attributes of an effective location.
pub fn data_kind(location: Location) -> DataKind {
    match location {
        Location::Nodal => DataKind::Point,
        Location::Elemental | Location::ElementalNodal => DataKind::Cell,
    }
}

/// Attribute name for a field name: the last `_`-separated segment is
/// dropped (`stress_1` -> `stress`). Names without a separator, or whose
/// remainder would be empty, are returned unchanged.
pub fn attribute_name(field_name: &str) -> String {
    match field_name.rsplit_once('_') {
        Some((base, _)) if !base.is_empty() => base.to_string(),
        _ => field_name.to_string(),
    }
}

/// Projects fields onto grids. `R` turns elemental-nodal fields into
/// elemental ones.
#[derive(Debug, Clone, Default)]
pub struct FieldProjector<R = ElementalMean> {
    reduction: R,
    options: ProjectorOptions,
}

impl FieldProjector<ElementalMean> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Attribute computed but not yet attached.
struct Prepared {
    name: String,
    kind: DataKind,
    array: DataArray,
    map: ScopingMap,
}

impl<R: ElementalReduction> FieldProjector<R> {
    pub fn with_reduction(reduction: R) -> Self {
        Self {
            reduction,
            options: ProjectorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProjectorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ProjectorOptions {
        &self.options
    }

    pub fn reduction(&self) -> &R {
        &self.reduction
    }

    /// Build a grid from `mesh` and attach `field` to it.
    pub fn project(&self, mesh: &Mesh, field: &Field) -> AppResult<Projection> {
        let prepared = self.prepare(mesh, field)?;
        let mut grid = Grid::from_mesh(mesh);
        let attribute = self.attach(&mut grid, prepared);
        Ok(Projection {
            grid,
            attribute_name: attribute.attribute_name,
            location: attribute.location,
        })
    }

    /// Attach `field` to an existing grid built from `mesh`.
    ///
    /// An existing array of the same name is replaced.
    pub fn project_onto(&self, mesh: &Mesh, field: &Field, grid: &mut Grid) -> AppResult<ProjectedAttribute> {
        if grid.n_points() != mesh.nodes().len() {
            return Err(AppError::GridMismatch {
                what: "points",
                grid: grid.n_points(),
                mesh: mesh.nodes().len(),
            });
        }
        if grid.n_cells() != mesh.elements().len() {
            return Err(AppError::GridMismatch {
                what: "cells",
                grid: grid.n_cells(),
                mesh: mesh.elements().len(),
            });
        }
        let prepared = self.prepare(mesh, field)?;
        Ok(self.attach(grid, prepared))
    }

    fn prepare(&self, mesh: &Mesh, field: &Field) -> AppResult<Prepared> {
        let location = field.location()?;
        field.validate()?;

        let reduced;
        let (source, kind) = match location {
            Location::Nodal => (field, DataKind::Point),
            Location::Elemental => (field, DataKind::Cell),
            Location::ElementalNodal => {
                reduced = self.reduction.reduce(field)?;
                reduced.validate()?;
                if reduced.location()? != Location::Elemental {
                    return Err(AppError::MalformedField {
                        name: reduced.name().to_string(),
                        reason: format!(
                            "reduction produced {} data, expected Elemental",
                            reduced.location_label()
                        ),
                    });
                }
                (&reduced, DataKind::Cell)
            }
        };

        let (count, map) = match kind {
            DataKind::Point => (
                mesh.nodes().len(),
                mesh.nodes().map_scoping(source.scoping().ids()),
            ),
            DataKind::Cell => (
                mesh.elements().len(),
                mesh.elements().map_scoping(source.scoping().ids()),
            ),
        };

        let cc = source.component_count();
        let data = source.data();
        let mut array = DataArray::filled(count, cc, f64::NAN);
        let values = array.values_mut();
        for (&dst, &src) in map.indices.iter().zip(&map.mask) {
            values[dst * cc..(dst + 1) * cc].copy_from_slice(&data[src * cc..(src + 1) * cc]);
        }

        Ok(Prepared {
            name: attribute_name(field.name()),
            kind,
            array,
            map,
        })
    }

    fn attach(&self, grid: &mut Grid, prepared: Prepared) -> ProjectedAttribute {
        let Prepared {
            name,
            kind,
            array,
            map,
        } = prepared;

        let n_points = grid.n_points();
        let n_cells = grid.n_cells();
        let (store, opposite, opposite_len) = match kind {
            DataKind::Point => (&mut grid.point_data, &mut grid.cell_data, n_cells),
            DataKind::Cell => (&mut grid.cell_data, &mut grid.point_data, n_points),
        };
        store.insert(name.clone(), array);
        if self.options.fill_opposite_store {
            opposite.insert(
                self.options.placeholder_name.clone(),
                DataArray::filled(opposite_len, 1, 0.0),
            );
        }
        grid.set_active_scalars(name.clone());

        let location = match kind {
            DataKind::Point => Location::Nodal,
            DataKind::Cell => Location::Elemental,
        };
        tracing::debug!(
            attribute = %name,
            %location,
            scoped = map.scoped,
            mapped = map.len(),
            dropped = map.dropped(),
            "field projected"
        );

        ProjectedAttribute {
            attribute_name: name,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::EntityId;
    use fv_field::Scoping;
    use fv_mesh::{ElementKind, MeshBuilder};

    fn strip() -> Mesh {
        // 4 nodes, 2 line elements, non-contiguous ids
        let mut b = MeshBuilder::new();
        for (id, x) in [(3, 0.0), (7, 1.0), (8, 2.0), (12, 3.0)] {
            b.add_node(EntityId::new(id), [x, 0.0, 0.0]);
        }
        b.add_element(EntityId::new(100), ElementKind::Line2, &[EntityId::new(3), EntityId::new(7)]);
        b.add_element(EntityId::new(200), ElementKind::Line2, &[EntityId::new(8), EntityId::new(12)]);
        b.build().unwrap()
    }

    #[test]
    fn attribute_names() {
        assert_eq!(attribute_name("stress_1"), "stress");
        assert_eq!(attribute_name("elastic_strain_12"), "elastic_strain");
        assert_eq!(attribute_name("displacement"), "displacement");
        assert_eq!(attribute_name("_1"), "_1");
        assert_eq!(attribute_name(""), "");
    }

    #[test]
    fn nodal_vector_field_lands_on_point_data() {
        let mesh = strip();
        let field = Field::new(
            "displacement_3",
            Location::Nodal,
            2,
            Scoping::from_raw([12, 3]),
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let p = FieldProjector::new().project(&mesh, &field).unwrap();
        assert_eq!(p.attribute_name, "displacement");
        assert_eq!(p.location, Location::Nodal);

        let a = p.grid.point_data.get("displacement").unwrap();
        assert_eq!(a.component_count(), 2);
        assert_eq!(&a.values()[0..2], &[3.0, 4.0]);
        assert!(a.values()[2..6].iter().all(|v| v.is_nan()));
        assert_eq!(&a.values()[6..8], &[1.0, 2.0]);

        let dummy = p.grid.cell_data.get("dummy").unwrap();
        assert_eq!(dummy.values(), &[0.0, 0.0]);
        assert_eq!(p.grid.active_scalars(), Some("displacement"));
    }

    #[test]
    fn elemental_field_lands_on_cell_data() {
        let mesh = strip();
        let field = Field::new("pressure_1", Location::Elemental, 1, Scoping::from_raw([200]), vec![5.0]).unwrap();
        let p = FieldProjector::new().project(&mesh, &field).unwrap();
        let a = p.grid.cell_data.get("pressure").unwrap();
        assert!(a.values()[0].is_nan());
        assert_eq!(a.values()[1], 5.0);
        assert_eq!(p.grid.point_data.get("dummy").unwrap().values().len(), 4);
    }

    #[test]
    fn placeholder_can_be_disabled_or_renamed() {
        let mesh = strip();
        let field = Field::new("t_1", Location::Nodal, 1, Scoping::from_raw([3]), vec![1.0]).unwrap();

        let off = FieldProjector::new().with_options(ProjectorOptions {
            fill_opposite_store: false,
            ..ProjectorOptions::default()
        });
        assert!(off.project(&mesh, &field).unwrap().grid.cell_data.is_empty());

        let renamed = FieldProjector::new().with_options(ProjectorOptions {
            placeholder_name: "unused".to_string(),
            fill_opposite_store: true,
        });
        let grid = renamed.project(&mesh, &field).unwrap().grid;
        assert!(grid.cell_data.contains("unused"));
    }

    #[test]
    fn elemental_nodal_is_averaged() {
        let mesh = strip();
        let field = Field::elemental_nodal(
            "stress_1",
            1,
            Scoping::from_raw([100, 200]),
            vec![1.0, 3.0, 10.0, 20.0],
            vec![0, 2, 4],
        )
        .unwrap();
        let p = FieldProjector::new().project(&mesh, &field).unwrap();
        assert_eq!(p.location, Location::Elemental);
        assert_eq!(p.grid.cell_data.get("stress").unwrap().values(), &[2.0, 15.0]);
    }

    #[test]
    fn mismatched_grid_rejected() {
        let mesh = strip();
        let field = Field::new("t_1", Location::Nodal, 1, Scoping::from_raw([3]), vec![1.0]).unwrap();
        let mut grid = Grid::new(Vec::new(), Vec::new());
        let err = FieldProjector::new().project_onto(&mesh, &field, &mut grid).unwrap_err();
        assert!(matches!(err, AppError::GridMismatch { what: "points", .. }));
        assert!(grid.point_data.is_empty());
    }

    #[test]
    fn malformed_field_leaves_grid_untouched() {
        let mesh = strip();
        let bad = Field::from_raw("t_1", "Nodal", 1, Scoping::from_raw([3, 7]), vec![1.0], None);
        let mut grid = Grid::from_mesh(&mesh);
        let before = grid.clone();
        let err = FieldProjector::new().project_onto(&mesh, &bad, &mut grid).unwrap_err();
        assert!(matches!(err, AppError::MalformedField { .. }));
        assert_eq!(grid, before);
    }

    #[test]
    fn reprojecting_replaces_attribute() {
        let mesh = strip();
        let projector = FieldProjector::new();
        let mut grid = Grid::from_mesh(&mesh);
        let a = Field::new("t_1", Location::Nodal, 1, Scoping::from_raw([3]), vec![1.0]).unwrap();
        let b = Field::new("t_2", Location::Nodal, 1, Scoping::from_raw([7]), vec![2.0]).unwrap();
        projector.project_onto(&mesh, &a, &mut grid).unwrap();
        projector.project_onto(&mesh, &b, &mut grid).unwrap();
        assert_eq!(grid.point_data.len(), 1);
        let values = grid.point_data.get("t").unwrap().values();
        assert!(values[0].is_nan());
        assert_eq!(values[1], 2.0);
    }
}
