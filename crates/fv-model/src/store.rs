//! Model file loading and saving.

use std::path::Path;

use crate::model::Model;
use crate::schema::ModelFile;
use crate::{ModelError, ModelResult};

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ModelResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ModelError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_yaml(path: &Path) -> ModelResult<Model> {
    let content = std::fs::read_to_string(path)?;
    let file: ModelFile = serde_yaml::from_str(&content)?;
    file.into_model(&path.display().to_string())
}

pub fn save_yaml(path: &Path, model: &Model) -> ModelResult<()> {
    let content = serde_yaml::to_string(&ModelFile::from_model(model))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ModelResult<Model> {
    let content = std::fs::read_to_string(path)?;
    let file: ModelFile = serde_json::from_str(&content)?;
    file.into_model(&path.display().to_string())
}

pub fn save_json(path: &Path, model: &Model) -> ModelResult<()> {
    let content = serde_json::to_string_pretty(&ModelFile::from_model(model))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub(crate) fn load_model_file(path: &Path) -> ModelResult<Model> {
    let model = match format_of(path)? {
        Format::Yaml => load_yaml(path)?,
        Format::Json => load_json(path)?,
    };
    tracing::info!(
        path = %path.display(),
        nodes = model.mesh().nodes().len(),
        elements = model.mesh().elements().len(),
        results = model.result_info().available_results.len(),
        "model file loaded"
    );
    Ok(model)
}

/// Save as YAML or JSON, chosen by extension.
pub fn save_model(path: &Path, model: &Model) -> ModelResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, model),
        Format::Json => save_json(path, model),
    }
}
