//! Plot selection: validation and option lists for the selectors.

use fv_model::{AvailableResult, Model, ModelSource};

use crate::error::{AppError, AppResult};

/// What the user has picked so far. Any field may still be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub source: Option<ModelSource>,
    pub result_name: Option<String>,
    pub component: Option<usize>,
    /// Zero-based index into the model's time/frequency axis.
    pub time_index: Option<usize>,
}

/// A selection checked against a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub result: AvailableResult,
    pub component: usize,
    pub time_index: usize,
}

impl ResolvedSelection {
    /// 1-based set number for the result operator.
    pub fn time_set(&self) -> usize {
        self.time_index + 1
    }

    pub fn needs_component_selection(&self) -> bool {
        self.result.n_components > 1
    }
}

impl Selection {
    pub fn new(source: ModelSource) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    pub fn with_result(mut self, name: impl Into<String>) -> Self {
        self.result_name = Some(name.into());
        self
    }

    pub fn with_component(mut self, component: usize) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_time_index(mut self, index: usize) -> Self {
        self.time_index = Some(index);
        self
    }

    /// Fill unset result and time with the selector defaults for `model`:
    /// first result, last time set.
    pub fn with_defaults(mut self, model: &Model) -> Self {
        if self.result_name.is_none() {
            self.result_name = result_options(model).default;
        }
        if self.time_index.is_none() {
            self.time_index = time_options(model).default;
        }
        self
    }

    /// Check the selection against `model`.
    ///
    /// Missing inputs give [`AppError::NoSelection`]. For single-component
    /// results the component is fixed at 0 whatever was selected.
    pub fn resolve(&self, model: &Model) -> AppResult<ResolvedSelection> {
        if self.source.is_none() {
            return Err(AppError::NoSelection { missing: "model" });
        }
        let name = self
            .result_name
            .as_deref()
            .ok_or(AppError::NoSelection { missing: "result" })?;
        let time_index = self
            .time_index
            .ok_or(AppError::NoSelection { missing: "time step" })?;

        let result = model
            .result_info()
            .find(name)
            .ok_or_else(|| AppError::UnknownResult {
                name: name.to_string(),
            })?;

        let n_sets = model.time_freq_support().n_sets();
        if time_index >= n_sets {
            return Err(AppError::InvalidInput(format!(
                "time index {} out of range, model has {} time sets",
                time_index, n_sets
            )));
        }

        let component = if result.n_components == 1 {
            0
        } else {
            let component = self.component.unwrap_or(0);
            if component >= result.n_components {
                return Err(AppError::InvalidInput(format!(
                    "component {} out of range, '{}' has {} components",
                    component, result.name, result.n_components
                )));
            }
            component
        };

        Ok(ResolvedSelection {
            result: result.clone(),
            component,
            time_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<T> {
    pub label: String,
    pub value: T,
}

/// Options of one selector plus the value it should switch to.
#[derive(Debug, Clone, PartialEq)]
pub struct Options<T> {
    pub options: Vec<SelectOption<T>>,
    pub default: Option<T>,
}

/// One option per time set, labelled with its value; defaults to the last.
pub fn time_options(model: &Model) -> Options<usize> {
    let tf = &model.time_freq_support().time_frequencies;
    Options {
        options: tf
            .iter()
            .enumerate()
            .map(|(i, t)| SelectOption {
                label: t.to_string(),
                value: i,
            })
            .collect(),
        default: tf.len().checked_sub(1),
    }
}

/// One option per available result; defaults to the first.
pub fn result_options(model: &Model) -> Options<String> {
    let results = &model.result_info().available_results;
    Options {
        options: results
            .iter()
            .map(|r| SelectOption {
                label: r.name.clone(),
                value: r.name.clone(),
            })
            .collect(),
        default: results.first().map(|r| r.name.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOptions {
    pub values: Vec<usize>,
    pub value: usize,
    pub disabled: bool,
}

/// Scalar state: only component 0, selector disabled.
impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            values: vec![0],
            value: 0,
            disabled: true,
        }
    }
}

/// Component selector state for `result`: disabled at `[0]` for scalars.
pub fn component_options(result: &AvailableResult) -> ComponentOptions {
    if result.n_components <= 1 {
        ComponentOptions::default()
    } else {
        ComponentOptions {
            values: (0..result.n_components).collect(),
            value: 0,
            disabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_model::{ExampleKey, load_model};

    fn transient() -> Model {
        load_model(ExampleKey::MsupTransient).unwrap()
    }

    fn selection() -> Selection {
        Selection::new(ModelSource::Example(ExampleKey::MsupTransient))
    }

    #[test]
    fn missing_inputs_are_no_selection() {
        let model = transient();
        let err = Selection::default().resolve(&model).unwrap_err();
        assert!(matches!(err, AppError::NoSelection { missing: "model" }));

        let err = selection().with_time_index(0).resolve(&model).unwrap_err();
        assert!(matches!(err, AppError::NoSelection { missing: "result" }));

        let err = selection().with_result("stress").resolve(&model).unwrap_err();
        assert!(matches!(err, AppError::NoSelection { missing: "time step" }));
    }

    #[test]
    fn unknown_result() {
        let err = selection()
            .with_result("velocity")
            .with_time_index(0)
            .resolve(&transient())
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownResult { .. }));
    }

    #[test]
    fn time_index_converts_to_one_based_set() {
        let r = selection()
            .with_result("stress")
            .with_time_index(19)
            .resolve(&transient())
            .unwrap();
        assert_eq!(r.time_set(), 20);
        assert_eq!(r.component, 0);

        let err = selection()
            .with_result("stress")
            .with_time_index(20)
            .resolve(&transient())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn component_rules() {
        let model = load_model(ExampleKey::SimpleBar).unwrap();
        let base = Selection::new(ModelSource::Example(ExampleKey::SimpleBar)).with_time_index(0);

        let scalar = base
            .clone()
            .with_result("structural_temperature")
            .with_component(4)
            .resolve(&model)
            .unwrap();
        assert_eq!(scalar.component, 0);

        let err = base
            .clone()
            .with_result("displacement")
            .with_component(3)
            .resolve(&model)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let vector = base.with_result("displacement").with_component(2).resolve(&model).unwrap();
        assert_eq!(vector.component, 2);
        assert!(vector.needs_component_selection());
    }

    #[test]
    fn option_defaults() {
        let model = transient();
        let times = time_options(&model);
        assert_eq!(times.options.len(), 20);
        assert_eq!(times.options[0].label, "0.01");
        assert_eq!(times.default, Some(19));

        let results = result_options(&model);
        assert_eq!(results.default.as_deref(), Some("displacement"));

        let s = selection().with_defaults(&model);
        assert_eq!(s.result_name.as_deref(), Some("displacement"));
        assert_eq!(s.time_index, Some(19));
    }

    #[test]
    fn component_options_follow_component_count() {
        let model = transient();
        let info = model.result_info();
        let stress = component_options(info.find("stress").unwrap());
        assert_eq!(stress.values, vec![0, 1, 2, 3, 4, 5]);
        assert!(!stress.disabled);

        let bar = load_model(ExampleKey::SimpleBar).unwrap();
        let vol = component_options(bar.result_info().find("elemental_volume").unwrap());
        assert_eq!(vol, ComponentOptions { values: vec![0], value: 0, disabled: true });
    }
}
