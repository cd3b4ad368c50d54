/*!
This modules splits a text into tokens. A token is a maximal run of characters that are neither
whitespace nor punctuation, or a single punctuation character. Whitespace only separates tokens.
The ASCII information separators (`U+001C` to `U+001F`) count as whitespace.
The same tokenizer is used on the text of an annotation and on the text of each of its entities.
*/
use crate::config::CompilerConfig;
use std::iter::FusedIterator;
use std::str::CharIndices;

/// This struct iterates over a *single* text and returns its tokens as slices of the text.
#[derive(Debug, Clone)]
pub struct TokenIter<'t, 'c> {
    /// The text on which we are iterating
    text: &'t str,
    chars: CharIndices<'t>,
    /// Byte offset of the token currently being accumulated, if any.
    start: Option<usize>,
    /// Punctuation token found right after a word. It is returned on the next call.
    pending: Option<&'t str>,
    config: &'c CompilerConfig,
}

/// Characters separating tokens: Unicode whitespace and the ASCII information separators.
#[inline(always)]
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

impl<'t, 'c> TokenIter<'t, 'c> {
    pub(crate) fn new(text: &'t str, config: &'c CompilerConfig) -> Self {
        TokenIter {
            text,
            chars: text.char_indices(),
            start: None,
            pending: None,
            config,
        }
    }
}

impl<'t, 'c> Iterator for TokenIter<'t, 'c> {
    type Item = &'t str;
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(punctuation) = self.pending.take() {
            return Some(punctuation);
        }
        loop {
            let (index, current_char) = match self.chars.next() {
                Some(v) => v,
                // End of input: flush whatever is left in the buffer.
                None => return self.start.take().map(|start| &self.text[start..]),
            };
            if is_separator(current_char) {
                if let Some(start) = self.start.take() {
                    return Some(&self.text[start..index]);
                }
            } else if self.config.is_punctuation(current_char) {
                let punctuation = &self.text[index..index + current_char.len_utf8()];
                match self.start.take() {
                    Some(start) => {
                        self.pending = Some(punctuation);
                        return Some(&self.text[start..index]);
                    }
                    None => return Some(punctuation),
                }
            } else if self.start.is_none() {
                self.start = Some(index);
            }
        }
    }
}

impl<'t, 'c> FusedIterator for TokenIter<'t, 'c> {}
