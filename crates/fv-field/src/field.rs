//! Scoped result field.

use crate::location::Location;
use crate::scoping::Scoping;
use crate::{FieldError, FieldResult};

/// Named numeric values over a scoped set of mesh entities.
///
/// `data` is entity-major: the `component_count` values of entity `k` are
/// `data[k * cc..(k + 1) * cc]`. Elemental-nodal fields carry a variable
/// number of value sets per element, delimited by `offsets`
/// (`offsets[k]..offsets[k + 1]` into `data`).
///
/// The location is kept as the label the source reported; `location()`
/// turns it into the closed [`Location`] enum.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    location: String,
    component_count: usize,
    scoping: Scoping,
    data: Vec<f64>,
    offsets: Option<Vec<usize>>,
}

impl Field {
    /// Nodal or elemental field, shape checked.
    pub fn new(
        name: impl Into<String>,
        location: Location,
        component_count: usize,
        scoping: Scoping,
        data: Vec<f64>,
    ) -> FieldResult<Self> {
        let field = Self::from_raw(name, location.as_str(), component_count, scoping, data, None);
        field.validate()?;
        Ok(field)
    }

    /// Elemental-nodal field with per-element offsets, shape checked.
    pub fn elemental_nodal(
        name: impl Into<String>,
        component_count: usize,
        scoping: Scoping,
        data: Vec<f64>,
        offsets: Vec<usize>,
    ) -> FieldResult<Self> {
        let field = Self::from_raw(
            name,
            Location::ElementalNodal.as_str(),
            component_count,
            scoping,
            data,
            Some(offsets),
        );
        field.validate()?;
        Ok(field)
    }

    /// Field exactly as a source reported it. Nothing is checked; call
    /// [`Field::validate`] before relying on its shape.
    pub fn from_raw(
        name: impl Into<String>,
        location: impl Into<String>,
        component_count: usize,
        scoping: Scoping,
        data: Vec<f64>,
        offsets: Option<Vec<usize>>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            component_count,
            scoping,
            data,
            offsets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Location label as reported by the source.
    pub fn location_label(&self) -> &str {
        &self.location
    }

    pub fn location(&self) -> FieldResult<Location> {
        self.location.parse()
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn scoping(&self) -> &Scoping {
        &self.scoping
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn offsets(&self) -> Option<&[usize]> {
        self.offsets.as_deref()
    }

    /// Values of the `k`-th scoped entity (all of them, for elemental-nodal).
    pub fn entity_data(&self, k: usize) -> Option<&[f64]> {
        match &self.offsets {
            Some(offsets) => {
                let (start, end) = (*offsets.get(k)?, *offsets.get(k + 1)?);
                self.data.get(start..end)
            }
            None => {
                let cc = self.component_count;
                self.data.get(k * cc..(k + 1) * cc)
            }
        }
    }

    /// Check location and shape invariants.
    pub fn validate(&self) -> FieldResult<()> {
        let location = self.location()?;
        let cc = self.component_count;
        if cc == 0 {
            return Err(self.malformed("component count must be at least 1".to_string()));
        }

        match location {
            Location::Nodal | Location::Elemental => {
                if self.offsets.is_some() {
                    return Err(self.malformed(format!("{} field must not carry offsets", location)));
                }
                let expected = self.scoping.len() * cc;
                if self.data.len() != expected {
                    return Err(self.malformed(format!(
                        "{} values for {} scoped entities x {} components (expected {})",
                        self.data.len(),
                        self.scoping.len(),
                        cc,
                        expected
                    )));
                }
            }
            Location::ElementalNodal => {
                let offsets = self
                    .offsets
                    .as_deref()
                    .ok_or_else(|| self.malformed("elemental-nodal field without offsets".to_string()))?;
                if offsets.len() != self.scoping.len() + 1 {
                    return Err(self.malformed(format!(
                        "{} offsets for {} scoped elements (expected {})",
                        offsets.len(),
                        self.scoping.len(),
                        self.scoping.len() + 1
                    )));
                }
                if offsets[0] != 0 || offsets[offsets.len() - 1] != self.data.len() {
                    return Err(self.malformed(
                        "offsets must start at 0 and end at the data length".to_string(),
                    ));
                }
                for w in offsets.windows(2) {
                    if w[1] < w[0] || (w[1] - w[0]) % cc != 0 {
                        return Err(self.malformed(format!(
                            "element run {}..{} is not a whole number of {}-component values",
                            w[0], w[1], cc
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn malformed(&self, reason: String) -> FieldError {
        FieldError::MalformedField {
            name: self.name.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodal_shape_checked() {
        let ok = Field::new("u_1", Location::Nodal, 3, Scoping::from_raw([1, 2]), vec![0.0; 6]);
        assert!(ok.is_ok());

        let err = Field::new("u_1", Location::Nodal, 3, Scoping::from_raw([1, 2]), vec![0.0; 5])
            .unwrap_err();
        assert!(matches!(err, FieldError::MalformedField { .. }));
    }

    #[test]
    fn zero_components_rejected() {
        let err = Field::new("t", Location::Elemental, 0, Scoping::from_raw([]), vec![]).unwrap_err();
        assert!(matches!(err, FieldError::MalformedField { .. }));
    }

    #[test]
    fn elemental_nodal_offsets_checked() {
        let scoping = Scoping::from_raw([1, 2]);
        let ok = Field::elemental_nodal("s", 2, scoping.clone(), vec![0.0; 10], vec![0, 4, 10]);
        assert!(ok.is_ok());

        let bad_end = Field::elemental_nodal("s", 2, scoping.clone(), vec![0.0; 10], vec![0, 4, 8]);
        assert!(bad_end.is_err());

        let odd_run = Field::elemental_nodal("s", 2, scoping.clone(), vec![0.0; 10], vec![0, 3, 10]);
        assert!(odd_run.is_err());

        let missing = Field::from_raw("s", "ElementalNodal", 2, scoping, vec![0.0; 10], None);
        assert!(missing.validate().is_err());
    }

    #[test]
    fn unknown_location_reported_by_validate() {
        let f = Field::from_raw("x_1", "unknown_location", 1, Scoping::from_raw([1]), vec![1.0], None);
        assert!(matches!(
            f.validate(),
            Err(FieldError::UnsupportedLocation { .. })
        ));
    }

    #[test]
    fn entity_data_slices() {
        let f = Field::new("u", Location::Nodal, 2, Scoping::from_raw([5, 6]), vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(f.entity_data(1), Some(&[3.0, 4.0][..]));
        assert_eq!(f.entity_data(2), None);

        let en = Field::elemental_nodal("s", 1, Scoping::from_raw([1, 2]), vec![1.0, 2.0, 3.0], vec![0, 1, 3])
            .unwrap();
        assert_eq!(en.entity_data(1), Some(&[2.0, 3.0][..]));
    }
}
