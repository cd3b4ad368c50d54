use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// Character separating the prefix from the entity type, as in `B-PER`.
pub const DELIMITER: char = '-';

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Sequence, Serialize, Deserialize)]
/// Prefix represent the place of a token in a chunk. `B` marks the first token of an entity,
/// `I` a continuation token and `O` a token outside of any entity. Prefix are a single ascii
/// character.
pub enum Prefix {
    B,
    I,
    O,
}

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::B => "B",
            Prefix::I => "I",
            Prefix::O => "O",
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::B),
            "I" => Ok(Self::I),
            "O" => Ok(Self::O),
            _ => Err(ParsingError::PrefixError(String::from(s))),
        }
    }
}

impl TryFrom<char> for Prefix {
    type Error = ParsingError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'B' => Ok(Self::B),
            'I' => Ok(Self::I),
            'O' => Ok(Self::O),
            _ => Err(ParsingError::PrefixError(String::from(value))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Could not parse the string into a `Label`
pub enum ParsingError {
    PrefixError(String),
    /// A `B` or `I` prefix without an entity type, such as `"B-"` or `"I"`.
    MissingType(String),
    /// The `O` label does not carry an entity type.
    UnexpectedType(String),
    EmptyLabel,
}

impl Display for ParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrefixError(s) => {
                let allowed: Vec<&str> = all::<Prefix>().map(|p| p.as_str()).collect();
                write!(
                    f,
                    "Could not parse the following string into a Prefix: {}. Allowed prefixes: {:?}",
                    s, allowed
                )
            }
            Self::MissingType(s) => write!(f, "The label {} is missing its entity type", s),
            Self::UnexpectedType(s) => {
                write!(f, "The label {} is outside any entity and cannot carry a type", s)
            }
            Self::EmptyLabel => write!(f, "Received an empty string/&str"),
        }
    }
}

impl Error for ParsingError {}

/// A BIO label attached to a single token. Labels borrow their entity type whenever possible,
/// which is the case when they are produced by the `Compiler`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label<'a> {
    Outside,
    Begin(Cow<'a, str>),
    Inside(Cow<'a, str>),
}

impl<'a> Label<'a> {
    pub fn begin<T: Into<Cow<'a, str>>>(entity_type: T) -> Self {
        Label::Begin(entity_type.into())
    }

    pub fn inside<T: Into<Cow<'a, str>>>(entity_type: T) -> Self {
        Label::Inside(entity_type.into())
    }

    pub fn prefix(&self) -> Prefix {
        match self {
            Label::Outside => Prefix::O,
            Label::Begin(_) => Prefix::B,
            Label::Inside(_) => Prefix::I,
        }
    }

    /// The entity type of the label, `None` for `O`.
    pub fn entity_type(&self) -> Option<&str> {
        match self {
            Label::Outside => None,
            Label::Begin(t) | Label::Inside(t) => Some(t.as_ref()),
        }
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, Label::Outside)
    }

    pub fn into_owned(self) -> Label<'static> {
        match self {
            Label::Outside => Label::Outside,
            Label::Begin(t) => Label::Begin(Cow::Owned(t.into_owned())),
            Label::Inside(t) => Label::Inside(Cow::Owned(t.into_owned())),
        }
    }
}

impl<'a> Display for Label<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Outside => write!(f, "{}", Prefix::O),
            Label::Begin(t) => write!(f, "{}{}{}", Prefix::B, DELIMITER, t),
            Label::Inside(t) => write!(f, "{}{}{}", Prefix::I, DELIMITER, t),
        }
    }
}

/// Parses `O`, `B-<type>` and `I-<type>`. Only the first delimiter separates the prefix, so types
/// such as `WORK-OF-ART` are kept whole.
impl<'a> TryFrom<&'a str> for Label<'a> {
    type Error = ParsingError;
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ParsingError::EmptyLabel);
        }
        let (raw_prefix, entity_type) = match value.split_once(DELIMITER) {
            Some((p, t)) => (p, Some(t)),
            None => (value, None),
        };
        match (Prefix::from_str(raw_prefix)?, entity_type) {
            (Prefix::O, None) => Ok(Label::Outside),
            (Prefix::O, Some(_)) => Err(ParsingError::UnexpectedType(String::from(value))),
            (_, None) => Err(ParsingError::MissingType(String::from(value))),
            (_, Some("")) => Err(ParsingError::MissingType(String::from(value))),
            (Prefix::B, Some(t)) => Ok(Label::Begin(Cow::Borrowed(t))),
            (Prefix::I, Some(t)) => Ok(Label::Inside(Cow::Borrowed(t))),
        }
    }
}

impl FromStr for Label<'static> {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::try_from(s).map(Label::into_owned)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("O", Label::Outside)]
    #[case("B-PER", Label::begin("PER"))]
    #[case("I-LOC", Label::inside("LOC"))]
    #[case("B-WORK-OF-ART", Label::begin("WORK-OF-ART"))]
    #[case("I-WORK OF ART", Label::inside("WORK OF ART"))]
    fn test_parse_label(#[case] raw: &str, #[case] expected: Label<'static>) {
        let actual = Label::try_from(raw).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.to_string(), raw);
    }

    #[rstest]
    #[case("", ParsingError::EmptyLabel)]
    #[case("X-PER", ParsingError::PrefixError(String::from("X")))]
    #[case("B", ParsingError::MissingType(String::from("B")))]
    #[case("I-", ParsingError::MissingType(String::from("I-")))]
    #[case("O-PER", ParsingError::UnexpectedType(String::from("O-PER")))]
    #[case("PER", ParsingError::PrefixError(String::from("PER")))]
    fn test_parse_label_errors(#[case] raw: &str, #[case] expected: ParsingError) {
        assert_eq!(Label::try_from(raw), Err(expected));
    }

    #[test]
    fn test_label_from_str_is_owned() {
        let owned: Label<'static> = {
            let raw = String::from("B-ORG");
            raw.parse().unwrap()
        };
        assert_eq!(owned, Label::Begin(Cow::Owned(String::from("ORG"))));
        assert_eq!(owned.entity_type(), Some("ORG"));
        assert_eq!(owned.prefix(), Prefix::B);
    }

    #[test]
    fn test_all_prefixes_round_trip_through_char() {
        for prefix in all::<Prefix>() {
            let c = prefix.as_str().chars().next().unwrap();
            assert_eq!(Prefix::try_from(c), Ok(prefix));
        }
    }
}
