//! Field operators: elemental reduction and component selection.

use crate::container::FieldsContainer;
use crate::field::Field;
use crate::location::Location;
use crate::{FieldError, FieldResult};

/// Turns an elemental-nodal field into an elemental one.
pub trait ElementalReduction {
    fn reduce(&self, field: &Field) -> FieldResult<Field>;
}

/// Component-wise mean of each element's per-node values.
///
/// Elements with no values reduce to NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementalMean;

impl ElementalReduction for ElementalMean {
    fn reduce(&self, field: &Field) -> FieldResult<Field> {
        field.validate()?;
        let location = field.location()?;
        if location != Location::ElementalNodal {
            return Err(FieldError::MalformedField {
                name: field.name().to_string(),
                reason: format!("elemental mean expects ElementalNodal data, got {}", location),
            });
        }

        let cc = field.component_count();
        let n = field.scoping().len();
        let mut data = Vec::with_capacity(n * cc);
        for k in 0..n {
            let run = field.entity_data(k).unwrap_or(&[]);
            let count = run.len() / cc;
            for c in 0..cc {
                if count == 0 {
                    data.push(f64::NAN);
                } else {
                    let sum: f64 = run.iter().skip(c).step_by(cc).sum();
                    data.push(sum / count as f64);
                }
            }
        }

        tracing::debug!(field = field.name(), elements = n, "elemental mean");

        Field::new(
            field.name(),
            Location::Elemental,
            cc,
            field.scoping().clone(),
            data,
        )
    }
}

/// Keep a single component of `field`.
pub fn select_component(field: &Field, component: usize) -> FieldResult<Field> {
    field.validate()?;
    let cc = field.component_count();
    if component >= cc {
        return Err(FieldError::ComponentOutOfRange {
            component,
            component_count: cc,
        });
    }

    let data: Vec<f64> = field
        .data()
        .iter()
        .skip(component)
        .step_by(cc)
        .copied()
        .collect();
    let offsets = field
        .offsets()
        .map(|o| o.iter().map(|v| v / cc).collect::<Vec<_>>());

    Ok(Field::from_raw(
        field.name(),
        field.location_label(),
        1,
        field.scoping().clone(),
        data,
        offsets,
    ))
}

/// [`select_component`] applied to every field in a container.
pub fn select_component_fc(fields: &FieldsContainer, component: usize) -> FieldResult<FieldsContainer> {
    fields.iter().map(|f| select_component(f, component)).collect()
}
