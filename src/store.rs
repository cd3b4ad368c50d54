/*!
This modules holds the dataset store: a mapping from a dataset name to the ordered list of the
annotations recorded for it. The store is a trait so that callers such as the HTTP layer can be
given any implementation; `InMemoryStore` keeps everything in memory behind a read/write lock.
*/
use crate::entity::EntityAnnotation;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;
use std::sync::RwLock;

/// Dataset used when a caller does not name one.
pub const DEFAULT_DATASET: &str = "default";

/// An annotation as recorded in a dataset. The `id` is the position of the annotation inside its
/// dataset at the time it was appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredAnnotation {
    pub id: usize,
    pub text: String,
    pub entities: Vec<EntityAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the lock.
    Poisoned,
    UnknownDataset(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poisoned => write!(f, "The dataset store lock is poisoned"),
            Self::UnknownDataset(name) => write!(f, "Dataset not found: {}", name),
        }
    }
}

impl Error for StoreError {}

/// Storage of the annotations, grouped by dataset. Annotations are returned in the order in which
/// they were appended.
pub trait AnnotationStore: Send + Sync {
    /// Records an annotation, creating the dataset on first use.
    fn append(
        &self,
        dataset: &str,
        text: String,
        entities: Vec<EntityAnnotation>,
    ) -> Result<StoredAnnotation, StoreError>;

    /// All the annotations of a dataset, `None` if the dataset does not exist.
    fn get(&self, dataset: &str) -> Result<Option<Vec<StoredAnnotation>>, StoreError>;

    /// Names of every dataset, sorted.
    fn dataset_names(&self) -> Result<Vec<String>, StoreError>;

    /// All the annotations of a dataset. An unknown dataset is empty.
    fn list(&self, dataset: &str) -> Result<Vec<StoredAnnotation>, StoreError> {
        Ok(self.get(dataset)?.unwrap_or_default())
    }

    /// Same as `get`, but an unknown dataset is an error.
    fn require(&self, dataset: &str) -> Result<Vec<StoredAnnotation>, StoreError> {
        self.get(dataset)?
            .ok_or_else(|| StoreError::UnknownDataset(String::from(dataset)))
    }
}

/// Store keeping every dataset in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    datasets: RwLock<AHashMap<String, Vec<StoredAnnotation>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for InMemoryStore {
    fn append(
        &self,
        dataset: &str,
        text: String,
        entities: Vec<EntityAnnotation>,
    ) -> Result<StoredAnnotation, StoreError> {
        let mut datasets = self.datasets.write().map_err(|_| StoreError::Poisoned)?;
        let annotations = datasets.entry(String::from(dataset)).or_default();
        let stored = StoredAnnotation {
            id: annotations.len(),
            text,
            entities,
        };
        annotations.push(stored.clone());
        Ok(stored)
    }

    fn get(&self, dataset: &str) -> Result<Option<Vec<StoredAnnotation>>, StoreError> {
        let datasets = self.datasets.read().map_err(|_| StoreError::Poisoned)?;
        Ok(datasets.get(dataset).cloned())
    }

    fn dataset_names(&self) -> Result<Vec<String>, StoreError> {
        let datasets = self.datasets.read().map_err(|_| StoreError::Poisoned)?;
        let mut names: Vec<String> = datasets.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
