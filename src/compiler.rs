/*!
This module turns a text and its entity annotations into a sequence of tokens and a parallel
sequence of BIO labels.

Entities are applied from the highest to the lowest priority, ties keeping their input order.
Each entity is tokenized like the text and only its first (leftmost) occurrence is labeled.
Labels are always overwritten, so on overlapping spans the entity applied last, the one with the
lowest priority, is the one left in the output.
*/
use crate::config::CompilerConfig;
use crate::entity::{EntityAnnotation, Label};
use crate::observer::{CompileObserver, LabelConflict, TracingObserver};
use crate::tokenizer::TokenIter;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt::Display;

/// The compiled form of one annotation. `tokens` and `labels` always have the same length and
/// are position-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledSequence<'a> {
    pub tokens: Vec<&'a str>,
    pub labels: Vec<Label<'a>>,
}

impl<'a> CompiledSequence<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'a str, &Label<'a>)> {
        self.tokens.iter().zip(self.labels.iter())
    }

    /// Copies the tokens and renders the labels as strings.
    pub fn to_record(&self) -> ExportRecord {
        ExportRecord {
            tokens: self.tokens.iter().map(|t| String::from(*t)).collect(),
            ner_tags: self.labels.iter().map(Label::to_string).collect(),
        }
    }
}

impl<'a> From<CompiledSequence<'a>> for ExportRecord {
    fn from(value: CompiledSequence<'a>) -> Self {
        value.to_record()
    }
}

/// One record of the exported dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ExportRecord {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<String>,
}

/// The ExportRecord acts as a two columns dataframe when displayed, one token per line.
impl Display for ExportRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (token, tag) in self.tokens.iter().zip(self.ner_tags.iter()) {
            writeln!(f, "{} {}", token, tag)?
        }
        Ok(())
    }
}

/// Compiles annotations with a given `CompilerConfig`. The compiler holds no state besides its
/// configuration and can be shared freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Compiler { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Lazily splits `text` into tokens.
    pub fn tokenize<'t, 'c>(&'c self, text: &'t str) -> TokenIter<'t, 'c> {
        TokenIter::new(text, &self.config)
    }

    /// Compiles a text and its entities, reporting diagnostics as `tracing` events.
    pub fn compile<'a>(&self, text: &'a str, entities: &'a [EntityAnnotation]) -> CompiledSequence<'a> {
        self.compile_with(text, entities, TracingObserver)
    }

    /// Compiles a text and its entities, reporting diagnostics to `observer`.
    pub fn compile_with<'a, O: CompileObserver>(
        &self,
        text: &'a str,
        entities: &'a [EntityAnnotation],
        mut observer: O,
    ) -> CompiledSequence<'a> {
        let tokens: Vec<&'a str> = self.tokenize(text).collect();
        observer.on_tokenized(text, &tokens);
        let mut labels = vec![Label::Outside; tokens.len()];

        // `sorted_by_key` is stable: equal priorities keep their input order.
        for entity in entities.iter().sorted_by_key(|e| Reverse(e.priority)) {
            let entity_tokens: Vec<&'a str> = self.tokenize(&entity.text).collect();
            observer.on_tokenized(&entity.text, &entity_tokens);
            let start = match find_first(&tokens, &entity_tokens) {
                Some(start) => start,
                None => {
                    observer.on_entity_unmatched(entity);
                    continue;
                }
            };
            let span = start..start + entity_tokens.len();

            // Reported conflicts only: silenced conflicts do not reach the observer at all.
            let mut conflicts = 0;
            if self.config.report_conflicts {
                for position in span.clone() {
                    let old_label = &labels[position];
                    if old_label.is_outside() {
                        continue;
                    }
                    conflicts += 1;
                    let conflict = LabelConflict::new(tokens[position], position, old_label, entity);
                    observer.on_conflict(&conflict);
                }
            }

            let entity_type = entity.entity_type.as_str();
            for (offset, position) in span.clone().enumerate() {
                labels[position] = match offset {
                    0 => Label::begin(entity_type),
                    _ => Label::inside(entity_type),
                };
            }
            observer.on_entity_applied(entity, span, conflicts);
        }

        CompiledSequence { tokens, labels }
    }
}

/// Index of the first window of `haystack` equal to `needle`. An empty needle matches at `0`.
fn find_first(haystack: &[&str], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
