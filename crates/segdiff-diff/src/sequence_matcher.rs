//! Plain longest-common-subsequence diffing of flat sequences.

use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use segdiff_tokenizer::{Token, Tokenize, WikitextSplit};
use serde::{Deserialize, Serialize};
use similar::DiffOp;

use crate::processor::{Delta, DiffEngine, DiffProcessor, State};
use crate::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<Algorithm> for similar::Algorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Myers => Self::Myers,
            Algorithm::Patience => Self::Patience,
            Algorithm::Lcs => Self::Lcs,
        }
    }
}

pub fn diff<T: Hash + Ord>(a: &[T], b: &[T]) -> Vec<Operation> {
    diff_with(Algorithm::default(), a, b)
}

/// Diffs two sequences item by item.
///
/// A replaced range is reported as a deletion followed by an insertion, so
/// only the three operation tags ever come out.
pub fn diff_with<T: Hash + Ord>(algorithm: Algorithm, a: &[T], b: &[T]) -> Vec<Operation> {
    let ops = similar::capture_diff_slices(algorithm.into(), a, b);

    let mut operations = Vec::with_capacity(ops.len() + ops.len() / 2);
    for op in ops {
        match op {
            DiffOp::Equal { old_index, new_index, len } => operations.push(Operation::equal(
                old_index,
                old_index + len,
                new_index,
                new_index + len,
            )),
            DiffOp::Delete { old_index, old_len, new_index } => operations.push(
                Operation::delete(old_index, old_index + old_len, new_index, new_index),
            ),
            DiffOp::Insert { old_index, new_index, new_len } => operations.push(
                Operation::insert(old_index, old_index, new_index, new_index + new_len),
            ),
            DiffOp::Replace { old_index, old_len, new_index, new_len } => {
                let old_end = old_index + old_len;
                operations.push(Operation::delete(old_index, old_end, new_index, new_index));
                operations.push(Operation::insert(old_end, old_end, new_index, new_index + new_len));
            }
        }
    }
    operations
}

/// Engine diffing token sequences directly, without segmentation.
#[derive(Debug, Clone, Default)]
pub struct SequenceMatcher<T = WikitextSplit> {
    tokenizer: T,
    algorithm: Algorithm,
}

impl<T> SequenceMatcher<T> {
    pub fn new(tokenizer: T, algorithm: Algorithm) -> Self {
        Self { tokenizer, algorithm }
    }
}

impl<T: Tokenize + Clone + 'static> DiffEngine for SequenceMatcher<T> {
    fn processor(&self) -> Box<dyn DiffProcessor> {
        Box::new(SequenceProcessor::new(self.tokenizer.clone(), self.algorithm))
    }
}

pub struct SequenceProcessor<T> {
    tokenizer: T,
    algorithm: Algorithm,
    state: State<Arc<[Token]>>,
}

impl<T: Tokenize> SequenceProcessor<T> {
    pub fn new(tokenizer: T, algorithm: Algorithm) -> Self {
        Self { tokenizer, algorithm, state: State::Empty }
    }

    pub fn state(&self) -> &State<Arc<[Token]>> {
        &self.state
    }
}

impl<T: Tokenize> DiffProcessor for SequenceProcessor<T> {
    fn process(&mut self, text: &str) -> Delta {
        let new_tokens: Arc<[Token]> = self.tokenizer.tokenize(text).into();
        let old_tokens = match mem::take(&mut self.state) {
            State::Empty => Arc::from(Vec::new()),
            State::Loaded(tokens) => tokens,
        };

        let operations = diff_with(self.algorithm, &old_tokens, &new_tokens);
        tracing::debug!(
            old = old_tokens.len(),
            new = new_tokens.len(),
            operations = operations.len(),
            "sequence diff"
        );

        self.state = State::Loaded(new_tokens.clone());
        Delta { operations, old_tokens, new_tokens }
    }

    fn update(&mut self, last_text: &str) {
        self.update_tokens(self.tokenizer.tokenize(last_text));
    }

    fn update_tokens(&mut self, tokens: Vec<Token>) {
        self.state = State::Loaded(tokens.into());
    }

    fn reset(&mut self) {
        self.state = State::Empty;
    }
}
