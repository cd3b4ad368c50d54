/*!
Diagnostics emitted while compiling annotations. The compiler reports what it does through a
`CompileObserver`; observers never change the tokens or the labels it returns.
*/
use crate::entity::{EntityAnnotation, Label};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Range;

/// A label conflict happens when an entity is written over a token that already carries a label
/// from a previously applied entity. The new entity always wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelConflict {
    pub token: String,
    pub position: usize,
    pub old_label: String,
    pub new_type: String,
    /// Text of the entity doing the overwrite.
    pub entity_text: String,
}

impl LabelConflict {
    pub(crate) fn new(
        token: &str,
        position: usize,
        old_label: &Label<'_>,
        entity: &EntityAnnotation,
    ) -> Self {
        LabelConflict {
            token: String::from(token),
            position,
            old_label: old_label.to_string(),
            new_type: entity.entity_type.clone(),
            entity_text: entity.text.clone(),
        }
    }
}

impl Display for LabelConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token {:?} at position {}: {} -> {} (from {:?})",
            self.token, self.position, self.old_label, self.new_type, self.entity_text
        )
    }
}

/// Receives the diagnostic events of a compilation. Every method has an empty default
/// implementation.
pub trait CompileObserver {
    /// Called once for the annotated text and once for every entity text.
    fn on_tokenized(&mut self, _text: &str, _tokens: &[&str]) {}
    /// The entity was found and its labels were written over `span`. `conflicts` counts the
    /// reported conflicts, it is always 0 when conflict reporting is disabled.
    fn on_entity_applied(
        &mut self,
        _entity: &EntityAnnotation,
        _span: Range<usize>,
        _conflicts: usize,
    ) {
    }
    /// The tokens of the entity do not appear in the text. Nothing was written.
    fn on_entity_unmatched(&mut self, _entity: &EntityAnnotation) {}
    fn on_conflict(&mut self, _conflict: &LabelConflict) {}
}

impl<T: CompileObserver + ?Sized> CompileObserver for &mut T {
    fn on_tokenized(&mut self, text: &str, tokens: &[&str]) {
        (**self).on_tokenized(text, tokens)
    }
    fn on_entity_applied(&mut self, entity: &EntityAnnotation, span: Range<usize>, conflicts: usize) {
        (**self).on_entity_applied(entity, span, conflicts)
    }
    fn on_entity_unmatched(&mut self, entity: &EntityAnnotation) {
        (**self).on_entity_unmatched(entity)
    }
    fn on_conflict(&mut self, conflict: &LabelConflict) {
        (**self).on_conflict(conflict)
    }
}

/// Forwards every event to both observers, left first.
impl<A: CompileObserver, B: CompileObserver> CompileObserver for (A, B) {
    fn on_tokenized(&mut self, text: &str, tokens: &[&str]) {
        self.0.on_tokenized(text, tokens);
        self.1.on_tokenized(text, tokens);
    }
    fn on_entity_applied(&mut self, entity: &EntityAnnotation, span: Range<usize>, conflicts: usize) {
        self.0.on_entity_applied(entity, span.clone(), conflicts);
        self.1.on_entity_applied(entity, span, conflicts);
    }
    fn on_entity_unmatched(&mut self, entity: &EntityAnnotation) {
        self.0.on_entity_unmatched(entity);
        self.1.on_entity_unmatched(entity);
    }
    fn on_conflict(&mut self, conflict: &LabelConflict) {
        self.0.on_conflict(conflict);
        self.1.on_conflict(conflict);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CompileObserver for NoopObserver {}

/// Emits every event as a `tracing` event. Tokenization is traced at the `TRACE` level, applied
/// and unmatched entities at `DEBUG` and conflicts at `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CompileObserver for TracingObserver {
    fn on_tokenized(&mut self, text: &str, tokens: &[&str]) {
        tracing::trace!(text, ?tokens, "tokenized");
    }

    fn on_entity_applied(&mut self, entity: &EntityAnnotation, span: Range<usize>, conflicts: usize) {
        if conflicts > 0 {
            tracing::warn!(
                entity = %entity,
                position = span.start,
                conflicts,
                "entity overwrites existing labels"
            );
        } else {
            tracing::debug!(
                entity = %entity,
                position = span.start,
                len = span.len(),
                "entity applied"
            );
        }
    }

    fn on_entity_unmatched(&mut self, entity: &EntityAnnotation) {
        tracing::debug!(entity = %entity, "entity not found in text, skipped");
    }

    fn on_conflict(&mut self, conflict: &LabelConflict) {
        tracing::warn!(
            token = %conflict.token,
            position = conflict.position,
            old_label = %conflict.old_label,
            new_type = %conflict.new_type,
            entity_text = %conflict.entity_text,
            "label conflict"
        );
    }
}

/// Keeps the conflicts and counts applied and unmatched entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictCollector {
    pub conflicts: Vec<LabelConflict>,
    pub applied: usize,
    pub unmatched: usize,
}

impl ConflictCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompileObserver for ConflictCollector {
    fn on_entity_applied(&mut self, _entity: &EntityAnnotation, _span: Range<usize>, _conflicts: usize) {
        self.applied += 1;
    }
    fn on_entity_unmatched(&mut self, _entity: &EntityAnnotation) {
        self.unmatched += 1;
    }
    fn on_conflict(&mut self, conflict: &LabelConflict) {
        self.conflicts.push(conflict.clone());
    }
}
