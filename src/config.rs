/*
 * This modules contains the `CompilerConfig` struct, which implements the default trait, and its
 * builder. The config can be given to a `Compiler` to change the punctuation set used when
 * splitting tokens and to silence the conflict diagnostics.
*/
use either::Either as LeftOrRight;
use std::fmt::{Debug, Display};

/// Punctuation characters that are split into their own single-character token.
pub const DEFAULT_PUNCTUATION: [char; 6] = [',', '.', '!', '?', ';', ':'];

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
/// Config struct used by the `Compiler`. It implements the default trait, which reproduces the
/// standard behavior of the annotation tool.
pub struct CompilerConfig {
    /// Characters emitted as standalone tokens. Kept sorted and deduplicated.
    pub(crate) punctuation: Box<[char]>,
    /// Are label conflicts forwarded to the observer? Conflicts are always resolved by
    /// overwriting, this only changes what gets reported.
    pub(crate) report_conflicts: bool,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn punctuation(&self) -> &[char] {
        &self.punctuation
    }

    pub fn report_conflicts(&self) -> bool {
        self.report_conflicts
    }

    #[inline(always)]
    pub(crate) fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.binary_search(&c).is_ok()
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            punctuation: normalize_punctuation(DEFAULT_PUNCTUATION),
            report_conflicts: true,
        }
    }
}

impl Display for CompilerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let punctuation: String = self.punctuation.iter().collect();
        write!(
            f,
            "Punctuation split into tokens: {:?}\n Reporting label conflicts: {}",
            punctuation, self.report_conflicts
        )
    }
}

fn normalize_punctuation<I: IntoIterator<Item = char>>(chars: I) -> Box<[char]> {
    let mut punctuation: Vec<char> = chars.into_iter().collect();
    punctuation.sort_unstable();
    punctuation.dedup();
    punctuation.into_boxed_slice()
}

impl<Punct> From<CompilerConfigBuilder<Punct>> for CompilerConfig
where
    Punct: IntoIterator<Item = char>,
{
    fn from(value: CompilerConfigBuilder<Punct>) -> Self {
        let punctuation = match value.punctuation {
            LeftOrRight::Left(custom) => normalize_punctuation(custom),
            LeftOrRight::Right(default) => normalize_punctuation(default),
        };
        Self {
            punctuation,
            report_conflicts: value.report_conflicts,
        }
    }
}

/// This builder can be used to build and customize a `CompilerConfig` stucture.
pub struct CompilerConfigBuilder<Punct>
where
    Punct: IntoIterator<Item = char>,
{
    punctuation: LeftOrRight<Punct, [char; 6]>,
    report_conflicts: bool,
}

impl Default for CompilerConfigBuilder<Vec<char>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Punct> CompilerConfigBuilder<Punct>
where
    Punct: IntoIterator<Item = char>,
{
    pub fn punctuation(mut self, punctuation: Punct) -> Self {
        self.punctuation = LeftOrRight::Left(punctuation);
        self
    }
    pub fn report_conflicts(mut self, report_conflicts: bool) -> Self {
        self.report_conflicts = report_conflicts;
        self
    }
    pub fn new() -> Self {
        Self {
            punctuation: LeftOrRight::Right(DEFAULT_PUNCTUATION),
            report_conflicts: true,
        }
    }
    pub fn build(self) -> CompilerConfig {
        CompilerConfig::from(self)
    }
}
