//! Model and metadata types.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fv_field::{FieldsContainer, Location};
use fv_mesh::Mesh;

use crate::ModelResult;

/// One entry of the result catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableResult {
    /// Display name, also the selection key (e.g. `displacement`).
    pub name: String,
    /// Operator identifier used to evaluate the result (e.g. `U`).
    pub operator_name: String,
    pub n_components: usize,
    pub location: Location,
    /// Human description (e.g. `Nodal Displacement`).
    pub physics_name: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultInfo {
    pub analysis_type: String,
    pub physics_type: String,
    pub unit_system: String,
    pub available_results: Vec<AvailableResult>,
}

impl ResultInfo {
    pub fn find(&self, name: &str) -> Option<&AvailableResult> {
        self.available_results.iter().find(|r| r.name == name)
    }
}

/// Ordered time (or frequency) values, one per result set.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFreqSupport {
    pub time_frequencies: Vec<f64>,
    pub unit: String,
}

impl TimeFreqSupport {
    pub fn n_sets(&self) -> usize {
        self.time_frequencies.len()
    }
}

/// Stored fields of one result, one container per time set.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedResult {
    pub operator_name: String,
    pub sets: Vec<FieldsContainer>,
}

/// Handle to the result data that operators read from.
#[derive(Debug, Clone)]
pub struct DataSources {
    origin: String,
    results: Arc<Vec<RecordedResult>>,
}

impl DataSources {
    pub fn new(origin: impl Into<String>, results: Vec<RecordedResult>) -> Self {
        Self {
            origin: origin.into(),
            results: Arc::new(results),
        }
    }

    /// Where the data came from (example key or file path).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn recorded(&self, operator_name: &str) -> Option<&RecordedResult> {
        self.results
            .iter()
            .find(|r| r.operator_name == operator_name)
    }

    pub fn recorded_results(&self) -> &[RecordedResult] {
        &self.results
    }
}

#[derive(Debug, Clone)]
pub struct Metadata {
    pub meshed_region: Mesh,
    pub result_info: ResultInfo,
    pub time_freq_support: TimeFreqSupport,
    pub data_sources: DataSources,
}

/// A loaded result set.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    metadata: Metadata,
}

impl Model {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Load a YAML or JSON model file, chosen by extension.
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        crate::store::load_model_file(path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn mesh(&self) -> &Mesh {
        &self.metadata.meshed_region
    }

    pub fn result_info(&self) -> &ResultInfo {
        &self.metadata.result_info
    }

    pub fn time_freq_support(&self) -> &TimeFreqSupport {
        &self.metadata.time_freq_support
    }

    pub fn data_sources(&self) -> &DataSources {
        &self.metadata.data_sources
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "------------------------------";
        let info = &self.metadata.result_info;
        writeln!(f, "Model: {}", self.name)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{} analysis", capitalize(&info.analysis_type))?;
        writeln!(f, "Unit system: {}", info.unit_system)?;
        writeln!(f, "Physics Type: {}", capitalize(&info.physics_type))?;
        writeln!(f, "Available results:")?;
        for r in &info.available_results {
            writeln!(
                f,
                "     -  {}: {} {} ({} component{}, {})",
                r.name,
                r.location,
                r.physics_name,
                r.n_components,
                if r.n_components == 1 { "" } else { "s" },
                r.unit
            )?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", self.metadata.meshed_region)?;
        writeln!(f, "{}", rule)?;
        let tf = &self.metadata.time_freq_support;
        writeln!(f, "Time/Freq Support:")?;
        writeln!(f, "  Number of sets: {}", tf.n_sets())?;
        writeln!(f, "  {:<12}{}", "Set", format!("Time ({})", tf.unit))?;
        for (i, t) in tf.time_frequencies.iter().enumerate() {
            writeln!(f, "  {:<12}{}", i + 1, t)?;
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
