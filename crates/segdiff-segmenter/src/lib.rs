//! Splits token sequences into paragraphs, sentences and whitespace.

mod grammar;
mod parser;

use std::str::FromStr;
use std::sync::Arc;

use parser::Parser;
use segdiff_tokenizer::{KindSet, Token, TokenKind, UnknownKind};
use segdiff_tree::SegmentTree;
use serde::{Deserialize, Serialize};

pub const WHITESPACE: KindSet = KindSet::new([TokenKind::WHITESPACE, TokenKind::BREAK]);
pub const PARAGRAPH_END: KindSet = KindSet::new([TokenKind::BREAK]);
pub const SENTENCE_END: KindSet =
    KindSet::new([TokenKind::PERIOD, TokenKind::EPOINT, TokenKind::QMARK]);
pub const MIN_SENTENCE: usize = 5;

/// Category sets driving segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    pub whitespace: KindSet,
    pub paragraph_end: KindSet,
    pub sentence_end: KindSet,
    /// Non-whitespace tokens a sentence needs before a terminator ends it.
    pub min_sentence: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            whitespace: WHITESPACE,
            paragraph_end: PARAGRAPH_END,
            sentence_end: SENTENCE_END,
            min_sentence: MIN_SENTENCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("the whitespace category set is empty")]
    EmptyWhitespace,
    #[error("the paragraph end category set is empty")]
    EmptyParagraphEnd,
    #[error("the sentence end category set is empty")]
    EmptySentenceEnd,
    #[error("min_sentence must be at least 1")]
    ZeroMinSentence,
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

/// Serialized form of a [`SegmenterConfig`], naming categories by their
/// lexicon names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterOptions {
    pub whitespace: Vec<String>,
    pub paragraph_end: Vec<String>,
    pub sentence_end: Vec<String>,
    pub min_sentence: usize,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        let names = |set: KindSet| set.iter().map(|kind| kind.name().to_owned()).collect();
        Self {
            whitespace: names(WHITESPACE),
            paragraph_end: names(PARAGRAPH_END),
            sentence_end: names(SENTENCE_END),
            min_sentence: MIN_SENTENCE,
        }
    }
}

impl TryFrom<&SegmenterOptions> for SegmenterConfig {
    type Error = ConfigError;

    fn try_from(options: &SegmenterOptions) -> Result<Self, Self::Error> {
        fn kinds(names: &[String]) -> Result<KindSet, UnknownKind> {
            names.iter().map(|name| TokenKind::from_str(name)).collect()
        }

        Ok(Self {
            whitespace: kinds(&options.whitespace)?,
            paragraph_end: kinds(&options.paragraph_end)?,
            sentence_end: kinds(&options.sentence_end)?,
            min_sentence: options.min_sentence,
        })
    }
}

/// A validated, reusable segmenter.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, ConfigError> {
        if config.whitespace.is_empty() {
            return Err(ConfigError::EmptyWhitespace);
        }
        if config.paragraph_end.is_empty() {
            return Err(ConfigError::EmptyParagraphEnd);
        }
        if config.sentence_end.is_empty() {
            return Err(ConfigError::EmptySentenceEnd);
        }
        if config.min_sentence == 0 {
            return Err(ConfigError::ZeroMinSentence);
        }
        Ok(Self { config })
    }

    pub fn from_options(options: &SegmenterOptions) -> Result<Self, ConfigError> {
        Self::new(SegmenterConfig::try_from(options)?)
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Builds the segment tree of `tokens`.
    pub fn segment(&self, tokens: impl Into<Arc<[Token]>>) -> SegmentTree {
        let tokens = tokens.into();

        let mut parser = Parser::new(&tokens);
        grammar::root(&mut parser, &self.config);
        let tree = parser.build_tree(tokens.clone());

        tracing::debug!(tokens = tree.token_count(), segments = tree.segment_count(), "segmented");
        tree
    }
}
