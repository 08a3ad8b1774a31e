//! Model file schema definitions and conversions to/from [`Model`].

use serde::{Deserialize, Serialize};

use fv_core::EntityId;
use fv_field::{Field, FieldError, FieldsContainer, Location, Scoping};
use fv_mesh::{ElementKind, MeshBuilder};

use crate::model::{AvailableResult, DataSources, Metadata, Model, RecordedResult, ResultInfo, TimeFreqSupport};
use crate::{ModelError, ModelResult};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelFile {
    pub version: u32,
    pub name: String,
    pub analysis_type: String,
    #[serde(default = "default_physics_type")]
    pub physics_type: String,
    pub unit_system: String,
    pub mesh: MeshDef,
    pub time_freq: TimeFreqDef,
    #[serde(default)]
    pub results: Vec<ResultDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    #[serde(default = "default_length_unit")]
    pub unit: String,
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: u32,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub id: u32,
    pub kind: ElementKindDef,
    pub nodes: Vec<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ElementKindDef {
    Line2,
    Tri3,
    Quad4,
    Tet4,
    Hex8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeFreqDef {
    #[serde(default = "default_time_unit")]
    pub unit: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultDef {
    pub name: String,
    pub operator_name: String,
    pub location: String,
    pub n_components: usize,
    #[serde(default)]
    pub physics_name: String,
    #[serde(default)]
    pub unit: String,
    /// One entry per time set.
    #[serde(default)]
    pub sets: Vec<ResultSetDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSetDef {
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub location: String,
    pub component_count: usize,
    pub scoping: Vec<u32>,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offsets: Option<Vec<usize>>,
}

fn default_physics_type() -> String {
    "mechanical".to_string()
}

fn default_length_unit() -> String {
    "m".to_string()
}

fn default_time_unit() -> String {
    "s".to_string()
}

impl From<ElementKindDef> for ElementKind {
    fn from(def: ElementKindDef) -> Self {
        match def {
            ElementKindDef::Line2 => ElementKind::Line2,
            ElementKindDef::Tri3 => ElementKind::Tri3,
            ElementKindDef::Quad4 => ElementKind::Quad4,
            ElementKindDef::Tet4 => ElementKind::Tet4,
            ElementKindDef::Hex8 => ElementKind::Hex8,
        }
    }
}

impl From<ElementKind> for ElementKindDef {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Line2 => ElementKindDef::Line2,
            ElementKind::Tri3 => ElementKindDef::Tri3,
            ElementKind::Quad4 => ElementKindDef::Quad4,
            ElementKind::Tet4 => ElementKindDef::Tet4,
            ElementKind::Hex8 => ElementKindDef::Hex8,
        }
    }
}

impl FieldDef {
    fn from_field(field: &Field) -> Self {
        Self {
            name: field.name().to_string(),
            location: field.location_label().to_string(),
            component_count: field.component_count(),
            scoping: field.scoping().iter().map(|id| id.get()).collect(),
            data: field.data().to_vec(),
            offsets: field.offsets().map(|o| o.to_vec()),
        }
    }

    /// Shape errors are fatal. An unrecognised location is kept as-is so
    /// that plotting can report it for the one field that carries it.
    fn into_field(self) -> ModelResult<Field> {
        let field = Field::from_raw(
            self.name,
            self.location,
            self.component_count,
            Scoping::from_raw(self.scoping),
            self.data,
            self.offsets,
        );
        match field.validate() {
            Ok(()) => Ok(field),
            Err(FieldError::UnsupportedLocation { location }) => {
                tracing::warn!(field = field.name(), %location, "field with unsupported location");
                Ok(field)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl ModelFile {
    pub fn from_model(model: &Model) -> Self {
        let meta = model.metadata();
        let mesh = &meta.meshed_region;

        let nodes = mesh
            .nodes()
            .iter()
            .map(|n| NodeDef {
                id: n.id.get(),
                position: [n.position.x, n.position.y, n.position.z],
            })
            .collect();
        let elements = mesh
            .elements()
            .iter()
            .map(|e| ElementDef {
                id: e.id.get(),
                kind: e.kind.into(),
                nodes: e.nodes.iter().map(|id| id.get()).collect(),
            })
            .collect();

        let results = meta
            .result_info
            .available_results
            .iter()
            .map(|r| ResultDef {
                name: r.name.clone(),
                operator_name: r.operator_name.clone(),
                location: r.location.as_str().to_string(),
                n_components: r.n_components,
                physics_name: r.physics_name.clone(),
                unit: r.unit.clone(),
                sets: meta
                    .data_sources
                    .recorded(&r.operator_name)
                    .map(|rec| {
                        rec.sets
                            .iter()
                            .map(|fc| ResultSetDef {
                                fields: fc.iter().map(FieldDef::from_field).collect(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            version: LATEST_VERSION,
            name: model.name().to_string(),
            analysis_type: meta.result_info.analysis_type.clone(),
            physics_type: meta.result_info.physics_type.clone(),
            unit_system: meta.result_info.unit_system.clone(),
            mesh: MeshDef {
                unit: mesh.unit().to_string(),
                nodes,
                elements,
            },
            time_freq: TimeFreqDef {
                unit: meta.time_freq_support.unit.clone(),
                values: meta.time_freq_support.time_frequencies.clone(),
            },
            results,
        }
    }

    /// Validate and build the in-memory model.
    pub fn into_model(self, origin: &str) -> ModelResult<Model> {
        if self.version > LATEST_VERSION {
            return Err(ModelError::Invalid {
                what: format!(
                    "model file version {} is newer than supported version {}",
                    self.version, LATEST_VERSION
                ),
            });
        }

        let mut builder = MeshBuilder::new().with_unit(self.mesh.unit);
        for n in &self.mesh.nodes {
            builder.add_node(EntityId::new(n.id), n.position);
        }
        for e in &self.mesh.elements {
            let nodes: Vec<EntityId> = e.nodes.iter().map(|&id| EntityId::new(id)).collect();
            builder.add_element(EntityId::new(e.id), e.kind.into(), &nodes);
        }
        let mesh = builder.build()?;

        let n_sets = self.time_freq.values.len();
        let mut available = Vec::with_capacity(self.results.len());
        let mut recorded = Vec::with_capacity(self.results.len());
        for r in self.results {
            let location: Location = r.location.parse()?;
            if r.n_components == 0 {
                return Err(ModelError::Invalid {
                    what: format!("result '{}' has zero components", r.name),
                });
            }
            if r.sets.len() != n_sets {
                return Err(ModelError::Invalid {
                    what: format!(
                        "result '{}' has {} sets but the time axis has {}",
                        r.name,
                        r.sets.len(),
                        n_sets
                    ),
                });
            }
            if available.iter().any(|a: &AvailableResult| a.name == r.name) {
                return Err(ModelError::Invalid {
                    what: format!("duplicate result name '{}'", r.name),
                });
            }
            if let Some(other) = available
                .iter()
                .find(|a: &&AvailableResult| a.operator_name == r.operator_name)
            {
                return Err(ModelError::Invalid {
                    what: format!(
                        "results '{}' and '{}' share operator '{}'",
                        other.name, r.name, r.operator_name
                    ),
                });
            }

            let mut sets = Vec::with_capacity(r.sets.len());
            for set in r.sets {
                let fields = set
                    .fields
                    .into_iter()
                    .map(FieldDef::into_field)
                    .collect::<ModelResult<Vec<_>>>()?;
                if let Some(f) = fields.iter().find(|f| f.component_count() != r.n_components) {
                    return Err(ModelError::Invalid {
                        what: format!(
                            "field '{}' has {} components but result '{}' declares {}",
                            f.name(),
                            f.component_count(),
                            r.name,
                            r.n_components
                        ),
                    });
                }
                sets.push(FieldsContainer::new(fields));
            }

            recorded.push(RecordedResult {
                operator_name: r.operator_name.clone(),
                sets,
            });
            available.push(AvailableResult {
                name: r.name,
                operator_name: r.operator_name,
                n_components: r.n_components,
                location,
                physics_name: r.physics_name,
                unit: r.unit,
            });
        }

        let metadata = Metadata {
            meshed_region: mesh,
            result_info: ResultInfo {
                analysis_type: self.analysis_type,
                physics_type: self.physics_type,
                unit_system: self.unit_system,
                available_results: available,
            },
            time_freq_support: TimeFreqSupport {
                time_frequencies: self.time_freq.values,
                unit: self.time_freq.unit,
            },
            data_sources: DataSources::new(origin, recorded),
        };

        Ok(Model::new(self.name, metadata))
    }
}
