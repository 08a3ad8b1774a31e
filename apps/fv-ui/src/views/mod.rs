pub mod colorbar_view;
pub mod mesh_view;
pub mod summary_view;
pub mod time_view;

pub use colorbar_view::show_colorbar;
pub use mesh_view::MeshView;
pub use summary_view::show_summary;
pub use time_view::show_time_axis;
