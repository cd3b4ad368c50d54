/*!
This library compiles raw text annotations into token-level BIO labels, the format expected by
named entity recognition datasets. An annotation is a text with a list of entities, each entity
being a substring of the text with a type and an optional priority. The compiled form is a list of
tokens and a list of labels of the same length.

# Compilation
* The text is split on whitespace, and the punctuation characters `, . ! ? ; :` are split into
    their own tokens. Nothing else is normalized.
* Every label starts as `O`.
* Entities are applied from the highest priority to the lowest. Entities with the same priority
    keep their input order.
* An entity is tokenized like the text and only its first occurrence in the text is labeled: its
    first token gets `B-TYPE` and the next ones `I-TYPE`. Entities that are not found are skipped.
* Labels are always overwritten. When entities overlap, the entity applied last wins, which is the
    one with the lowest priority. Every overwritten label is reported as a `LabelConflict`.

# Terminology
* An entity type is a string such as `LOC`, `PER` or `ORG`.
* A label is either `O` (outside of any entity), or a prefix (`B` for the beginning of an entity
    and `I` for its inside) joined to an entity type with a `-`.
* A dataset is a named, ordered list of annotations. Exporting a dataset compiles each of its
    annotations into an `ExportRecord`.
*/

mod compiler;
mod config;
mod entity;
mod export;
mod observer;
mod reporter;
mod store;
mod tokenizer;

pub use compiler::{CompiledSequence, Compiler, ExportRecord};
pub use config::{CompilerConfig, CompilerConfigBuilder, DEFAULT_PUNCTUATION};
pub use entity::{
    validate_entities, EntityAnnotation, Label, ParsingError, Prefix, ValidationError,
    DEFAULT_PRIORITY, DELIMITER,
};
pub use export::{compile_batch, export_dataset, ExportBatch, ExportError};
pub use observer::{
    CompileObserver, ConflictCollector, LabelConflict, NoopObserver, TracingObserver,
};
pub use reporter::{DatasetReport, StoreReport, TypeMetrics};
pub use store::{AnnotationStore, InMemoryStore, StoreError, StoredAnnotation, DEFAULT_DATASET};
pub use tokenizer::TokenIter;

/// Main entrypoint of the library. Compiles a text and its entities with the default
/// configuration and returns an owned record.
///
/// * `text`: Annotated text
/// * `entities`: Entities found in `text`
///
/// #Example
/// ```rust
/// use nerlabel::{compile, EntityAnnotation};
///
/// let entities = vec![
///     EntityAnnotation::new("John Smith", "PER"),
///     EntityAnnotation::new("New York", "LOC"),
/// ];
/// let record = compile("John Smith moved to New York.", &entities);
/// assert_eq!(
///     record.tokens,
///     vec!["John", "Smith", "moved", "to", "New", "York", "."]
/// );
/// assert_eq!(
///     record.ner_tags,
///     vec!["B-PER", "I-PER", "O", "O", "B-LOC", "I-LOC", "O"]
/// );
/// ```
pub fn compile(text: &str, entities: &[EntityAnnotation]) -> ExportRecord {
    Compiler::default().compile(text, entities).to_record()
}

/// Splits `text` into tokens with the default punctuation.
///
/// #Example
/// ```rust
/// assert_eq!(nerlabel::tokenize("Hello, world!"), vec!["Hello", ",", "world", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    Compiler::default().tokenize(text).collect()
}
