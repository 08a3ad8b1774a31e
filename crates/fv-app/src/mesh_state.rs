//! Serialized mesh state for renderers.
//!
//! A [`MeshState`] is a snapshot of a grid carrying a single attribute:
//! flat point coordinates, cell connectivity and the values of the kept
//! field. Missing values (NaN) serialize as `null`.

use std::path::Path;

use fv_core::{ValueRange, finite_range};
use fv_mesh::{DataKind, Grid};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    pub kind: String,
    pub points: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateLocation {
    Point,
    Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshState {
    /// x0, y0, z0, x1, ...
    pub points: Vec<f64>,
    pub cells: Vec<CellState>,
    pub field_to_keep: String,
    pub location: StateLocation,
    pub component_count: usize,
    pub values: Vec<Option<f64>>,
    pub range: Option<ValueRange>,
}

impl MeshState {
    /// Snapshot `grid` keeping only the `kind` array called `field_to_keep`.
    pub fn from_grid(grid: &Grid, field_to_keep: &str, kind: DataKind) -> AppResult<Self> {
        let array = grid.array(kind, field_to_keep).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "grid has no {:?} array named '{}'",
                kind, field_to_keep
            ))
        })?;

        let points = grid.points().iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let cells = grid
            .cells()
            .iter()
            .map(|c| CellState {
                kind: c.kind.label().to_string(),
                points: c.points.clone(),
            })
            .collect();

        Ok(Self {
            points,
            cells,
            field_to_keep: field_to_keep.to_string(),
            location: match kind {
                DataKind::Point => StateLocation::Point,
                DataKind::Cell => StateLocation::Cell,
            },
            component_count: array.component_count(),
            values: array
                .values()
                .iter()
                .map(|v| if v.is_nan() { None } else { Some(*v) })
                .collect(),
            range: finite_range(array.values()),
        })
    }

    pub fn n_points(&self) -> usize {
        self.points.len() / 3
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> AppResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_mesh::{Cell, DataArray, ElementKind};
    use nalgebra::Point3;

    fn grid() -> Grid {
        let mut g = Grid::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![Cell {
                kind: ElementKind::Tri3,
                points: vec![0, 1, 2],
            }],
        );
        g.point_data.insert("t", DataArray::scalars(vec![1.0, f64::NAN, 3.0]));
        g.cell_data.insert("dummy", DataArray::scalars(vec![0.0]));
        g
    }

    #[test]
    fn keeps_named_field_only() {
        let state = MeshState::from_grid(&grid(), "t", DataKind::Point).unwrap();
        assert_eq!(state.n_points(), 3);
        assert_eq!(state.location, StateLocation::Point);
        assert_eq!(state.values, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(state.range, Some(ValueRange { min: 1.0, max: 3.0 }));
        assert_eq!(state.cells[0].kind, "triangle");
    }

    #[test]
    fn missing_field_is_invalid_input() {
        let err = MeshState::from_grid(&grid(), "stress", DataKind::Point).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn keeps_the_requested_store_when_names_collide() {
        let mut g = grid();
        g.point_data.insert("dummy", DataArray::scalars(vec![0.0; 3]));
        let state = MeshState::from_grid(&g, "dummy", DataKind::Cell).unwrap();
        assert_eq!(state.location, StateLocation::Cell);
        assert_eq!(state.values, vec![Some(0.0)]);

        g.cell_data.insert("dummy", DataArray::scalars(vec![42.0]));
        let state = MeshState::from_grid(&g, "dummy", DataKind::Cell).unwrap();
        assert_eq!(state.values, vec![Some(42.0)]);
        assert!(MeshState::from_grid(&g, "t", DataKind::Cell).is_err());
    }

    #[test]
    fn json_round_trip() {
        let state = MeshState::from_grid(&grid(), "t", DataKind::Point).unwrap();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"location\": \"point\""));
        let back: MeshState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
