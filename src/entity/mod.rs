/*!
This modules holds the entity annotations supplied by the user and the labels produced from them.
An annotation stores the surface text of the entity, not its offsets: the compiler locates it again
by matching its tokens against the tokens of the annotated text.
*/
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;

mod label;

// Re-exporting
pub use label::{Label, ParsingError, Prefix, DELIMITER};

/// Priority given to entities that do not specify one.
pub const DEFAULT_PRIORITY: i64 = 1;

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

/// An entity annotation asserts that a span of a text belongs to a category (such as `LOC`,
/// `PER`, `ORG`, etc.). Entities with a higher priority are applied first, which means that on
/// overlapping spans the entity with the lowest priority is the one left in the labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityAnnotation {
    /// Verbatim surface text of the entity.
    pub text: String,
    /// Label category, such as `"PERSON"`. Serialized as `type`.
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

impl EntityAnnotation {
    pub fn new<T: Into<String>, E: Into<String>>(text: T, entity_type: E) -> Self {
        EntityAnnotation {
            text: text.into(),
            entity_type: entity_type.into(),
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Caller-side validation. The compiler itself accepts any entity, but an entity without text
    /// or without type cannot produce a meaningful label.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.entity_type.trim().is_empty() {
            return Err(ValidationError::EmptyType(self.text.clone()));
        }
        Ok(())
    }
}

impl Display for EntityAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {}, {})", self.text, self.entity_type, self.priority)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Entity rejected before being stored.
pub enum ValidationError {
    EmptyText,
    EmptyType(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Entity text cannot be empty"),
            Self::EmptyType(text) => {
                write!(f, "Entity type must be selected for the entity {:?}", text)
            }
        }
    }
}

impl Error for ValidationError {}

/// Validates every entity of a list, stopping at the first invalid one.
pub fn validate_entities(entities: &[EntityAnnotation]) -> Result<(), ValidationError> {
    entities.iter().try_for_each(EntityAnnotation::validate)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use enum_iterator::{all, Sequence};
    use quickcheck::Arbitrary;
    use rstest::rstest;

    /// Small vocabulary used by the property tests. Every variant is a word or a punctuation
    /// mark, so that random sequences collide often enough to produce matches and conflicts.
    #[derive(Debug, Clone, Copy, Sequence)]
    pub(crate) enum WordsToTest {
        New,
        York,
        City,
        Paris,
        In,
        Comma,
        Period,
    }
    impl From<WordsToTest> for &str {
        fn from(value: WordsToTest) -> Self {
            match value {
                WordsToTest::New => "New",
                WordsToTest::York => "York",
                WordsToTest::City => "City",
                WordsToTest::Paris => "Paris",
                WordsToTest::In => "in",
                WordsToTest::Comma => ",",
                WordsToTest::Period => ".",
            }
        }
    }
    impl Arbitrary for WordsToTest {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let choice_slice: Vec<WordsToTest> = all::<WordsToTest>().collect();
            *g.choose(choice_slice.as_ref()).unwrap()
        }
    }

    pub(crate) fn join_words(words: &[WordsToTest]) -> String {
        words
            .iter()
            .map(|w| -> &str { (*w).into() })
            .collect::<Vec<_>>()
            .join(" ")
    }

    impl Arbitrary for EntityAnnotation {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let length = usize::arbitrary(g) % 3 + 1;
            let words: Vec<WordsToTest> = (0..length).map(|_| WordsToTest::arbitrary(g)).collect();
            let entity_type = *g.choose(&["LOC", "ORG", "PER"]).unwrap();
            let priority = i64::from(u8::arbitrary(g) % 5);
            EntityAnnotation::new(join_words(&words), entity_type).with_priority(priority)
        }
    }

    #[test]
    fn test_priority_defaults_to_one_when_missing() {
        let raw = r#"{"text": "Paris", "type": "LOC"}"#;
        let entity: EntityAnnotation = serde_json::from_str(raw).unwrap();
        assert_eq!(entity, EntityAnnotation::new("Paris", "LOC"));
        assert_eq!(entity.priority, 1);
    }

    #[test]
    fn test_offsets_sent_by_clients_are_ignored() {
        let raw = r#"{"text": "Paris", "type": "LOC", "priority": 3, "start": 14, "end": 19}"#;
        let entity: EntityAnnotation = serde_json::from_str(raw).unwrap();
        assert_eq!(entity, EntityAnnotation::new("Paris", "LOC").with_priority(3));
    }

    #[test]
    fn test_type_is_serialized_as_type() {
        let entity = EntityAnnotation::new("Paris", "LOC");
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], "LOC");
        assert!(value.get("entity_type").is_none());
    }

    #[rstest]
    #[case(EntityAnnotation::new("Paris", "LOC"), Ok(()))]
    #[case(EntityAnnotation::new("  ", "LOC"), Err(ValidationError::EmptyText))]
    #[case(
        EntityAnnotation::new("Paris", ""),
        Err(ValidationError::EmptyType(String::from("Paris")))
    )]
    #[case(EntityAnnotation::new("Mona Lisa", "WORK OF ART"), Ok(()))]
    fn test_validate(
        #[case] entity: EntityAnnotation,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(entity.validate(), expected)
    }

    #[test]
    fn test_validate_entities_stops_at_first_error() {
        let entities = vec![
            EntityAnnotation::new("Paris", "LOC"),
            EntityAnnotation::new("", "LOC"),
            EntityAnnotation::new("John", ""),
        ];
        assert_eq!(
            validate_entities(&entities),
            Err(ValidationError::EmptyText)
        );
    }
}
