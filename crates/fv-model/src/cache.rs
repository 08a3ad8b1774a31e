//! Explicit keyed model cache.
//!
//! Nothing in the library caches implicitly. Front ends that want to keep
//! models across interactions hold a [`ModelCache`] and invalidate it
//! themselves (e.g. after a model file changed on disk).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::builtin::{ExampleKey, load_model};
use crate::model::Model;
use crate::ModelResult;

/// Where a model comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelSource {
    Example(ExampleKey),
    File(PathBuf),
}

impl ModelSource {
    /// Load the model. Always reads fresh.
    pub fn load(&self) -> ModelResult<Model> {
        match self {
            ModelSource::Example(key) => load_model(*key),
            ModelSource::File(path) => Model::from_path(path),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Example(key) => write!(f, "{}", key),
            ModelSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<ExampleKey> for ModelSource {
    fn from(key: ExampleKey) -> Self {
        ModelSource::Example(key)
    }
}

/// Example keys win; anything else is taken as a file path.
impl FromStr for ModelSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<ExampleKey>() {
            Ok(key) => ModelSource::Example(key),
            Err(_) => ModelSource::File(PathBuf::from(s)),
        })
    }
}

#[derive(Debug, Default)]
pub struct ModelCache {
    models: HashMap<ModelSource, Arc<Model>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached model, loading it on first use. Load failures are
    /// not cached.
    pub fn get_or_load(&mut self, source: &ModelSource) -> ModelResult<Arc<Model>> {
        if let Some(model) = self.models.get(source) {
            tracing::debug!(%source, "model cache hit");
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(source.load()?);
        self.models.insert(source.clone(), Arc::clone(&model));
        Ok(model)
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&mut self, source: &ModelSource) -> bool {
        self.models.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }

    pub fn contains(&self, source: &ModelSource) -> bool {
        self.models.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
