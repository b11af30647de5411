mod cursor;
mod kind;
mod kind_set;
mod tokenizer;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

pub use kind::{TokenKind, UnknownKind};
pub use kind_set::KindSet;
use text_size::{TextRange, TextSize};
pub use tokenizer::{Lexicon, Tokenizer};

/// A lexical unit of a text.
///
/// Tokens compare and hash by their text alone: the same word at two
/// different positions is the same token for diffing purposes.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Box<str>,
    /// Position in the owning token sequence.
    pub index: u32,
    /// Byte range in the source text.
    pub range: TextRange,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        &*self.text == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Turns a text into a token sequence.
///
/// Implementations must be lossless: the token texts, joined in order,
/// reproduce `text` exactly.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl<T: Tokenize + ?Sized> Tokenize for &T {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

impl Tokenize for Lexicon {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        Tokenizer::new(text, *self).collect()
    }
}

/// Tokenizer for MediaWiki markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikitextSplit;

impl Tokenize for WikitextSplit {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        Tokenizer::new(text, Lexicon::Wikitext).collect()
    }
}

/// Tokenizer for plain prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSplit;

impl Tokenize for TextSplit {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        Tokenizer::new(text, Lexicon::Text).collect()
    }
}

/// Builds a token sequence out of already split pieces.
///
/// Indices and ranges are assigned as if the pieces were laid out back to
/// back in one source text.
pub fn tokens_from_pieces<'a>(pieces: impl IntoIterator<Item = (TokenKind, &'a str)>) -> Vec<Token> {
    let mut offset = TextSize::new(0);
    pieces
        .into_iter()
        .enumerate()
        .map(|(index, (kind, text))| {
            let range = TextRange::at(offset, TextSize::of(text));
            offset = range.end();
            Token { kind, text: text.into(), index: index as u32, range }
        })
        .collect()
}

/// Joins token texts back into a string.
pub fn join<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    tokens.into_iter().map(Token::as_str).collect()
}
