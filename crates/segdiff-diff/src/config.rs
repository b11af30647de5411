use std::fmt;
use std::str::FromStr;

use segdiff_segmenter::{ConfigError, Segmenter, SegmenterOptions};
use segdiff_tokenizer::Lexicon;
use serde::{Deserialize, Serialize};

use crate::processor::DiffEngine;
use crate::sequence_matcher::{Algorithm, SequenceMatcher};
use crate::segment_matcher::SegmentMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineName {
    #[default]
    SegmentMatcher,
    SequenceMatcher,
}

impl EngineName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SegmentMatcher => "segment_matcher",
            Self::SequenceMatcher => "sequence_matcher",
        }
    }
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineName {
    type Err = EngineConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Self::SegmentMatcher, Self::SequenceMatcher]
            .into_iter()
            .find(|engine| engine.as_str() == name)
            .ok_or_else(|| EngineConfigError::UnknownEngine(name.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerName {
    #[default]
    WikitextSplit,
    TextSplit,
}

impl TokenizerName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WikitextSplit => "wikitext_split",
            Self::TextSplit => "text_split",
        }
    }

    pub const fn lexicon(self) -> Lexicon {
        match self {
            Self::WikitextSplit => Lexicon::Wikitext,
            Self::TextSplit => Lexicon::Text,
        }
    }
}

impl FromStr for TokenizerName {
    type Err = EngineConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Self::WikitextSplit, Self::TextSplit]
            .into_iter()
            .find(|tokenizer| tokenizer.as_str() == name)
            .ok_or_else(|| EngineConfigError::UnknownTokenizer(name.to_owned()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineConfigError {
    #[error("unknown engine `{0}`")]
    UnknownEngine(String),
    #[error("unknown tokenizer `{0}`")]
    UnknownTokenizer(String),
    #[error("invalid segmenter configuration")]
    Segmenter(#[from] ConfigError),
}

/// Everything needed to build a diff engine, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub engine: EngineName,
    pub tokenizer: TokenizerName,
    pub algorithm: Algorithm,
    pub segmenter: SegmenterOptions,
}

impl EngineConfig {
    pub fn build(&self) -> Result<Box<dyn DiffEngine>, EngineConfigError> {
        let lexicon = self.tokenizer.lexicon();
        let engine: Box<dyn DiffEngine> = match self.engine {
            EngineName::SegmentMatcher => {
                let segmenter = Segmenter::from_options(&self.segmenter)?;
                Box::new(SegmentMatcher::new(lexicon, segmenter).with_algorithm(self.algorithm))
            }
            EngineName::SequenceMatcher => Box::new(SequenceMatcher::new(lexicon, self.algorithm)),
        };

        tracing::debug!(engine = %self.engine, tokenizer = self.tokenizer.as_str(), "built engine");
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Operation;

    #[test]
    fn defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.engine, EngineName::SegmentMatcher);
        assert_eq!(config.tokenizer, TokenizerName::WikitextSplit);
    }

    #[test]
    fn builds_selected_engine() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "engine": "sequence_matcher", "tokenizer": "text_split", "algorithm": "myers" }"#,
        )
        .unwrap();
        let engine = config.build().unwrap();

        let deltas: Vec<_> = engine.process(["one two", "one three two"]).collect();
        assert_eq!(deltas[1].operations, [
            Operation::equal(0, 2, 0, 2),
            Operation::insert(2, 2, 2, 4),
            Operation::equal(2, 3, 4, 5),
        ]);
    }

    #[test]
    fn invalid_segmenter_options() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "segmenter": { "min_sentence": 0 } }"#).unwrap();
        let err = config.build().err().unwrap();
        assert!(matches!(err, EngineConfigError::Segmenter(ConfigError::ZeroMinSentence)), "{err}");
    }

    #[test]
    fn names() {
        assert_eq!("sequence_matcher".parse::<EngineName>().unwrap(), EngineName::SequenceMatcher);
        assert_eq!(
            "lcs_matcher".parse::<EngineName>().unwrap_err().to_string(),
            "unknown engine `lcs_matcher`"
        );
        assert_eq!("text_split".parse::<TokenizerName>().unwrap(), TokenizerName::TextSplit);
        assert!(serde_json::from_str::<EngineConfig>(r#"{ "engine": "other" }"#).is_err());
    }
}
