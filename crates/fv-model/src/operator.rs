//! Result operator: reads one result's fields for selected time sets.

use fv_field::FieldsContainer;

use crate::model::DataSources;
use crate::{ModelError, ModelResult};

/// Evaluates a recorded result by operator name.
///
/// Time sets are 1-based. Without an explicit time scoping the last set
/// is read.
#[derive(Debug, Clone)]
pub struct ResultOperator {
    operator_name: String,
    time_scoping: Vec<usize>,
}

impl ResultOperator {
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self {
            operator_name: operator_name.into(),
            time_scoping: Vec::new(),
        }
    }

    pub fn with_time_scoping(mut self, set: usize) -> Self {
        self.time_scoping = vec![set];
        self
    }

    pub fn with_time_sets(mut self, sets: Vec<usize>) -> Self {
        self.time_scoping = sets;
        self
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn evaluate(&self, data_sources: &DataSources) -> ModelResult<FieldsContainer> {
        let recorded =
            data_sources
                .recorded(&self.operator_name)
                .ok_or_else(|| ModelError::UnknownOperator {
                    name: self.operator_name.clone(),
                })?;

        let n_sets = recorded.sets.len();
        let sets = if self.time_scoping.is_empty() {
            vec![n_sets]
        } else {
            self.time_scoping.clone()
        };

        let mut out = FieldsContainer::default();
        for set in sets {
            if set == 0 || set > n_sets {
                return Err(ModelError::TimeSetOutOfRange { set, n_sets });
            }
            for field in recorded.sets[set - 1].iter() {
                out.push(field.clone());
            }
        }

        tracing::debug!(
            operator = %self.operator_name,
            origin = data_sources.origin(),
            fields = out.len(),
            "result operator evaluated"
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordedResult;
    use fv_field::{Field, Location, Scoping};

    fn sources() -> DataSources {
        let set = |v: f64| {
            FieldsContainer::new(vec![
                Field::new("t_1", Location::Nodal, 1, Scoping::from_raw([1]), vec![v]).unwrap(),
            ])
        };
        DataSources::new(
            "test",
            vec![RecordedResult {
                operator_name: "BFE".to_string(),
                sets: vec![set(1.0), set(2.0), set(3.0)],
            }],
        )
    }

    #[test]
    fn reads_requested_set() {
        let fc = ResultOperator::new("BFE")
            .with_time_scoping(2)
            .evaluate(&sources())
            .unwrap();
        assert_eq!(fc.first().unwrap().data(), &[2.0]);
    }

    #[test]
    fn defaults_to_last_set() {
        let fc = ResultOperator::new("BFE").evaluate(&sources()).unwrap();
        assert_eq!(fc.first().unwrap().data(), &[3.0]);
    }

    #[test]
    fn several_sets_concatenate() {
        let fc = ResultOperator::new("BFE")
            .with_time_sets(vec![1, 3])
            .evaluate(&sources())
            .unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.get(1).unwrap().data(), &[3.0]);
    }

    #[test]
    fn zero_and_overflow_sets_rejected() {
        for set in [0, 4] {
            let err = ResultOperator::new("BFE")
                .with_time_scoping(set)
                .evaluate(&sources())
                .unwrap_err();
            assert!(matches!(err, ModelError::TimeSetOutOfRange { n_sets: 3, .. }));
        }
    }

    #[test]
    fn unknown_operator() {
        let err = ResultOperator::new("S").evaluate(&sources()).unwrap_err();
        assert!(matches!(err, ModelError::UnknownOperator { .. }));
    }
}
