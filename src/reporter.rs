/*!
This modules gives a few tools to summarize a dataset: how many samples and entities it holds, how
the entities are distributed over the entity types and how many of them survived the compilation.
*/
use crate::entity::{Label, Prefix};
use crate::export::ExportBatch;
use crate::store::{AnnotationStore, StoreError, StoredAnnotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// The reporter holds the statistics of a single dataset. It can be used to display the results
/// (i.e. prettyprint them) as if they were collected into a dataframe, one line per entity type.
///
/// # Example
///
/// ```rust
/// use nerlabel::{compile_batch, Compiler, DatasetReport, EntityAnnotation, StoredAnnotation};
///
/// let annotations = vec![StoredAnnotation {
///     id: 0,
///     text: String::from("John lives in Paris."),
///     entities: vec![
///         EntityAnnotation::new("John", "PER"),
///         EntityAnnotation::new("Paris", "LOC"),
///     ],
/// }];
/// let batch = compile_batch(&Compiler::default(), &annotations);
/// let report = DatasetReport::new("people", &annotations, &batch);
///
/// let expected_report = "Type, Entities, Spans, Tokens
/// LOC, 1, 1, 1
/// PER, 1, 1, 1\n";
///
/// assert_eq!(expected_report, report.to_string());
/// assert_eq!(report.total_samples, 1);
/// assert_eq!(report.average_entities_per_sample, 2.0);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReport {
    pub dataset: String,
    pub total_samples: usize,
    pub total_entities: usize,
    pub average_entities_per_sample: f32,
    /// Labels overwritten while compiling the dataset.
    pub conflicts: usize,
    /// Entities whose tokens could not be found in their text.
    pub unmatched_entities: usize,
    pub entity_types: BTreeMap<String, TypeMetrics>,
}

/// Counts for a single entity type.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetrics {
    /// Number of annotated entities of this type.
    pub entities: usize,
    /// Number of spans (`B-` labels) of this type left after compilation.
    pub spans: usize,
    /// Number of tokens (`B-` and `I-` labels) of this type left after compilation.
    pub tokens: usize,
}

impl DatasetReport {
    /// Builds the report of a dataset from its annotations and the batch compiled from them.
    pub fn new(dataset: &str, annotations: &[StoredAnnotation], batch: &ExportBatch) -> Self {
        let mut entity_types: BTreeMap<String, TypeMetrics> = BTreeMap::new();
        for entity in annotations.iter().flat_map(|a| a.entities.iter()) {
            entity_types
                .entry(entity.entity_type.clone())
                .or_default()
                .entities += 1;
        }
        let labels = batch
            .records
            .iter()
            .flat_map(|r| r.ner_tags.iter())
            .filter_map(|tag| Label::try_from(tag.as_str()).ok());
        for label in labels {
            let (prefix, entity_type) = match label.entity_type() {
                Some(t) => (label.prefix(), t),
                None => continue,
            };
            let metrics = entity_types.entry(String::from(entity_type)).or_default();
            metrics.tokens += 1;
            if prefix == Prefix::B {
                metrics.spans += 1;
            }
        }
        let total_samples = annotations.len();
        let total_entities: usize = annotations.iter().map(|a| a.entities.len()).sum();
        let average_entities_per_sample = if total_samples > 0 {
            total_entities as f32 / total_samples as f32
        } else {
            0.
        };
        DatasetReport {
            dataset: String::from(dataset),
            total_samples,
            total_entities,
            average_entities_per_sample,
            conflicts: batch.conflicts.len(),
            unmatched_entities: batch.unmatched,
            entity_types,
        }
    }
}

/// The DatasetReport acts as a dataframe when displayed.
impl Display for DatasetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Type, Entities, Spans, Tokens")?;
        for (entity_type, metrics) in self.entity_types.iter() {
            writeln!(f, "{}, {}", entity_type, metrics)?
        }
        Ok(())
    }
}

/// The TypeMetrics acts as a line in a dataframe when displayed.
impl Display for TypeMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.entities, self.spans, self.tokens)
    }
}

/// Totals over every dataset of a store.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoreReport {
    pub total_datasets: usize,
    pub total_samples: usize,
    pub total_entities: usize,
}

impl StoreReport {
    pub fn from_store<S: AnnotationStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let mut report = StoreReport::default();
        for name in store.dataset_names()? {
            let annotations = store.list(&name)?;
            report.total_datasets += 1;
            report.total_samples += annotations.len();
            report.total_entities += annotations.iter().map(|a| a.entities.len()).sum::<usize>();
        }
        Ok(report)
    }
}

impl Display for StoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Datasets, Samples, Entities")?;
        writeln!(
            f,
            "{}, {}, {}",
            self.total_datasets, self.total_samples, self.total_entities
        )
    }
}
