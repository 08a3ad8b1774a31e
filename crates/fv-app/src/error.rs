//! Error types for the fv-app service layer.

use fv_field::FieldError;
use fv_mesh::MeshError;
use fv_model::ModelError;

/// Unified error for both front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required selection is missing. Front ends treat this as "do
    /// nothing" and keep their previous state.
    #[error("Nothing to plot: no {missing} selected")]
    NoSelection { missing: &'static str },

    #[error("Unknown result: {name}")]
    UnknownResult { name: String },

    #[error("Unsupported field location '{location}'")]
    UnsupportedLocation { location: String },

    #[error("Malformed field '{name}': {reason}")]
    MalformedField { name: String, reason: String },

    #[error("Grid does not match mesh: grid has {grid} {what}, mesh has {mesh}")]
    GridMismatch {
        what: &'static str,
        grid: usize,
        mesh: usize,
    },

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Mesh error: {0}")]
    Mesh(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fv-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::UnsupportedLocation { location } => AppError::UnsupportedLocation { location },
            FieldError::MalformedField { name, reason } => AppError::MalformedField { name, reason },
            e @ FieldError::ComponentOutOfRange { .. } => AppError::InvalidInput(e.to_string()),
        }
    }
}

impl From<MeshError> for AppError {
    fn from(err: MeshError) -> Self {
        AppError::Mesh(err.to_string())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Field(e) => e.into(),
            ModelError::Mesh(e) => e.into(),
            ModelError::Io(e) => AppError::Io(e),
            e @ ModelError::TimeSetOutOfRange { .. } => AppError::InvalidInput(e.to_string()),
            e => AppError::Model(e.to_string()),
        }
    }
}
