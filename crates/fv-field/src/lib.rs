//! fv-field: scoped result fields and the operators applied to them.
//!
//! Provides:
//! - Location (which mesh-entity kind a field is indexed against)
//! - Scoping (ordered entity ids a field's values belong to)
//! - Field and FieldsContainer
//! - Operators: elemental mean reduction, component selection

pub mod container;
pub mod field;
pub mod location;
pub mod ops;
pub mod scoping;

pub use container::FieldsContainer;
pub use field::Field;
pub use location::Location;
pub use ops::{ElementalMean, ElementalReduction, select_component, select_component_fc};
pub use scoping::Scoping;

pub type FieldResult<T> = Result<T, FieldError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Unsupported field location '{location}': only Nodal, Elemental and ElementalNodal can be plotted")]
    UnsupportedLocation { location: String },

    #[error("Malformed field '{name}': {reason}")]
    MalformedField { name: String, reason: String },

    #[error("Component {component} out of range for a field with {component_count} components")]
    ComponentOutOfRange {
        component: usize,
        component_count: usize,
    },
}
