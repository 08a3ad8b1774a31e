//! Shared application service layer for fieldview.
//!
//! Both front ends go through this crate: the field projector that turns
//! scoped result fields into renderable grid attributes, selection
//! validation and selector options, and the plot service that runs the
//! whole chain and packages colorbar, min/max table and mesh state.

pub mod colorbar;
pub mod error;
pub mod mesh_state;
pub mod plot_service;
pub mod projector;
pub mod selection;
pub mod summary;

pub use colorbar::{Colorbar, Colormap};
pub use error::{AppError, AppResult};
pub use mesh_state::{CellState, MeshState, StateLocation};
pub use plot_service::{PlotResponse, PlotTiming, plot, plot_selection, plot_with};
pub use projector::{FieldProjector, ProjectedAttribute, Projection, ProjectorOptions, attribute_name, data_kind};
pub use selection::{
    ComponentOptions, Options, ResolvedSelection, SelectOption, Selection, component_options,
    result_options, time_options,
};
pub use summary::{MinMaxRow, MinMaxTable, TABLE_PRECISION, format_decimal_or_exponent};
