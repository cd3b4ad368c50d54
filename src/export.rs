/*!
Batch export of a dataset: every stored annotation is compiled, in storage order, into an
`ExportRecord`. The ordered list of records is the exported artifact.
*/
use crate::compiler::{Compiler, ExportRecord};
use crate::observer::{ConflictCollector, LabelConflict, TracingObserver};
use crate::store::{AnnotationStore, StoreError, StoredAnnotation};
use std::error::Error;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    DatasetNotFound(String),
    Store(StoreError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(name) => write!(f, "Dataset not found: {}", name),
            Self::Store(store_err) => std::fmt::Display::fmt(store_err, f),
        }
    }
}

impl Error for ExportError {}

impl From<StoreError> for ExportError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UnknownDataset(name) => Self::DatasetNotFound(name),
            e => Self::Store(e),
        }
    }
}

/// The compiled records of a dataset with the diagnostics gathered while compiling them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportBatch {
    pub records: Vec<ExportRecord>,
    pub conflicts: Vec<LabelConflict>,
    /// Number of entities whose tokens were not found in their text.
    pub unmatched: usize,
}

impl ExportBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Compiles every annotation, keeping their order. Diagnostics are both traced and collected.
pub fn compile_batch(compiler: &Compiler, annotations: &[StoredAnnotation]) -> ExportBatch {
    let mut collector = ConflictCollector::new();
    let records = annotations
        .iter()
        .map(|annotation| {
            compiler
                .compile_with(
                    &annotation.text,
                    &annotation.entities,
                    (&mut collector, TracingObserver),
                )
                .to_record()
        })
        .collect();
    ExportBatch {
        records,
        conflicts: collector.conflicts,
        unmatched: collector.unmatched,
    }
}

/// Snapshots a dataset from the store and compiles it. The store is not held while compiling.
pub fn export_dataset<S: AnnotationStore + ?Sized>(
    store: &S,
    dataset: &str,
    compiler: &Compiler,
) -> Result<ExportBatch, ExportError> {
    let annotations = store.require(dataset)?;
    let batch = compile_batch(compiler, &annotations);
    if !batch.conflicts.is_empty() {
        tracing::warn!(
            dataset,
            conflicts = batch.conflicts.len(),
            "entity conflicts detected while exporting, overlapping labels were overwritten"
        );
    }
    tracing::info!(dataset, records = batch.len(), "dataset compiled");
    Ok(batch)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::EntityAnnotation;
    use crate::store::InMemoryStore;

    fn build_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .append(
                "news",
                String::from("John lives in Paris."),
                vec![EntityAnnotation::new("Paris", "LOC")],
            )
            .unwrap();
        store
            .append(
                "news",
                String::from("New York City"),
                vec![
                    EntityAnnotation::new("New York City", "LOC"),
                    EntityAnnotation::new("New York", "ORG").with_priority(5),
                    EntityAnnotation::new("Boston", "LOC"),
                ],
            )
            .unwrap();
        store.append("news", String::new(), vec![]).unwrap();
        store
    }

    #[test]
    fn test_export_dataset_keeps_storage_order() {
        let store = build_store();
        let batch = export_dataset(&store, "news", &Compiler::default()).unwrap();
        let expected = vec![
            ExportRecord {
                tokens: vec!["John", "lives", "in", "Paris", "."]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                ner_tags: vec!["O", "O", "O", "B-LOC", "O"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            ExportRecord {
                tokens: vec!["New", "York", "City"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                ner_tags: vec!["B-LOC", "I-LOC", "I-LOC"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            ExportRecord::default(),
        ];
        assert_eq!(batch.records, expected);
        assert_eq!(batch.conflicts.len(), 2);
        assert_eq!(batch.unmatched, 1);
    }

    #[test]
    fn test_export_unknown_dataset() {
        let store = build_store();
        let res = export_dataset(&store, "missing", &Compiler::default());
        assert_eq!(
            res,
            Err(ExportError::DatasetNotFound(String::from("missing")))
        );
    }

    #[test]
    fn test_export_through_trait_object() {
        let store: Box<dyn AnnotationStore> = Box::new(build_store());
        let batch = export_dataset(store.as_ref(), "news", &Compiler::default()).unwrap();
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_compile_batch_of_nothing() {
        let batch = compile_batch(&Compiler::default(), &[]);
        assert!(batch.is_empty());
        assert!(batch.conflicts.is_empty());
    }
}
