//! fv-model: result source for fieldview.
//!
//! A [`Model`] bundles a mesh, the catalog of available results, the
//! time/frequency axis and a data-source handle that [`ResultOperator`]s
//! evaluate against. Models come from the built-in examples
//! ([`load_model`]) or from YAML/JSON model files ([`Model::from_path`]).

pub mod builtin;
pub mod cache;
pub mod model;
pub mod operator;
pub mod schema;
pub mod store;

pub use builtin::{ExampleKey, load_model};
pub use cache::{ModelCache, ModelSource};
pub use model::{AvailableResult, DataSources, Metadata, Model, RecordedResult, ResultInfo, TimeFreqSupport};
pub use operator::ResultOperator;
pub use store::{load_json, load_yaml, save_json, save_model, save_yaml};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported model file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("Unknown example: {name}")]
    UnknownExample { name: String },

    #[error("Unknown result operator: {name}")]
    UnknownOperator { name: String },

    #[error("Time set {set} out of range (model has {n_sets} sets)")]
    TimeSetOutOfRange { set: usize, n_sets: usize },

    #[error("Invalid model: {what}")]
    Invalid { what: String },

    #[error("Mesh error: {0}")]
    Mesh(#[from] fv_mesh::MeshError),

    #[error("Field error: {0}")]
    Field(#[from] fv_field::FieldError),
}
