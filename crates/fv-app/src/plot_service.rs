//! End-to-end plot chain: evaluate, select component, project, summarize.

use std::time::Instant;

use fv_core::{ValueRange, finite_range};
use fv_field::{ElementalReduction, Location, select_component_fc};
use fv_mesh::{DataArray, DataKind, Grid};
use fv_model::{Model, ResultOperator};

use crate::colorbar::Colorbar;
use crate::error::{AppError, AppResult};
use crate::mesh_state::MeshState;
use crate::projector::{FieldProjector, data_kind};
use crate::selection::{ResolvedSelection, Selection};
use crate::summary::MinMaxTable;

/// Wall-clock seconds spent in each stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotTiming {
    pub load_s: f64,
    pub evaluate_s: f64,
    pub project_s: f64,
    pub total_s: f64,
}

/// Everything a front end needs to draw one result.
#[derive(Debug, Clone)]
pub struct PlotResponse {
    pub grid: Grid,
    pub attribute_name: String,
    pub location: Location,
    pub range: ValueRange,
    pub colorbar: Colorbar,
    pub summary: MinMaxTable,
    pub mesh_state: MeshState,
    pub timing: PlotTiming,
}

impl PlotResponse {
    pub fn data_kind(&self) -> DataKind {
        data_kind(self.location)
    }

    /// The projected attribute, one tuple per point or cell.
    pub fn array(&self) -> Option<&DataArray> {
        self.grid.array(self.data_kind(), &self.attribute_name)
    }

    /// Flat attribute values.
    pub fn values(&self) -> &[f64] {
        self.array().map(|a| a.values()).unwrap_or(&[])
    }

    /// Colouring scalar of tuple `i`: the value for scalar attributes, the
    /// magnitude otherwise. NaN when out of range or unmapped.
    pub fn scalar_at(&self, i: usize) -> f64 {
        self.array().and_then(|a| a.magnitude(i)).unwrap_or(f64::NAN)
    }
}

/// NaN-ignoring range of the colouring scalars of `array`.
fn scalar_range(array: &DataArray) -> Option<ValueRange> {
    let scalars: Vec<f64> = (0..array.n_tuples())
        .filter_map(|i| array.magnitude(i))
        .collect();
    finite_range(&scalars)
}

/// Load the selected model fresh and plot it.
pub fn plot_selection(selection: &Selection) -> AppResult<PlotResponse> {
    let started = Instant::now();
    let source = selection
        .source
        .as_ref()
        .ok_or(AppError::NoSelection { missing: "model" })?;
    let model = source.load()?;
    let load_s = started.elapsed().as_secs_f64();

    let resolved = selection.resolve(&model)?;
    let mut response = plot(&model, &resolved)?;
    response.timing.load_s = load_s;
    response.timing.total_s = started.elapsed().as_secs_f64();
    Ok(response)
}

/// Plot with the default projector.
pub fn plot(model: &Model, selection: &ResolvedSelection) -> AppResult<PlotResponse> {
    plot_with(&FieldProjector::new(), model, selection)
}

pub fn plot_with<R: ElementalReduction>(
    projector: &FieldProjector<R>,
    model: &Model,
    selection: &ResolvedSelection,
) -> AppResult<PlotResponse> {
    let started = Instant::now();
    let result = &selection.result;

    let mut fields = ResultOperator::new(&result.operator_name)
        .with_time_scoping(selection.time_set())
        .evaluate(model.data_sources())?;
    if selection.needs_component_selection() {
        fields = select_component_fc(&fields, selection.component)?;
    }
    let field = fields.first().ok_or_else(|| {
        AppError::EmptyResult(format!(
            "'{}' has no fields at time set {}",
            result.name,
            selection.time_set()
        ))
    })?;
    let evaluate_s = started.elapsed().as_secs_f64();

    let project_started = Instant::now();
    let projection = projector.project(model.mesh(), field)?;
    let project_s = project_started.elapsed().as_secs_f64();

    let kind = data_kind(projection.location);
    let range = projection
        .grid
        .array(kind, &projection.attribute_name)
        .and_then(scalar_range)
        .ok_or_else(|| {
            AppError::EmptyResult(format!(
                "'{}' has no values on this mesh",
                projection.attribute_name
            ))
        })?;

    let mesh_state = MeshState::from_grid(&projection.grid, &projection.attribute_name, kind)?;
    let timing = PlotTiming {
        load_s: 0.0,
        evaluate_s,
        project_s,
        total_s: started.elapsed().as_secs_f64(),
    };

    tracing::info!(
        result = %result.name,
        time_set = selection.time_set(),
        component = selection.component,
        attribute = %projection.attribute_name,
        min = range.min,
        max = range.max,
        total_s = timing.total_s,
        "plot ready"
    );

    Ok(PlotResponse {
        colorbar: Colorbar::new(projection.attribute_name.clone(), range),
        summary: MinMaxTable::new(projection.attribute_name.clone(), range),
        grid: projection.grid,
        attribute_name: projection.attribute_name,
        location: projection.location,
        range,
        mesh_state,
        timing,
    })
}
