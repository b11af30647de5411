//! Diffing through segment trees, so that moved paragraphs and sentences are
//! reported as equal instead of deleted and reinserted.

use std::mem;
use std::sync::Arc;

use segdiff_segmenter::Segmenter;
use segdiff_tokenizer::{Token, Tokenize, WikitextSplit};
use segdiff_tree::SegmentTree;

use crate::matcher::{self, Matching};
use crate::processor::{Delta, DiffEngine, DiffProcessor, State};
use crate::sequence_matcher::{self, Algorithm};
use crate::{Operation, expand};

pub fn diff(
    old_tokens: impl Into<Arc<[Token]>>,
    new_tokens: impl Into<Arc<[Token]>>,
    segmenter: &Segmenter,
) -> Vec<Operation> {
    let old = segmenter.segment(old_tokens);
    let new = segmenter.segment(new_tokens);
    diff_segments(&old, &new)
}

pub fn diff_segments(old: &SegmentTree, new: &SegmentTree) -> Vec<Operation> {
    diff_segments_with(Algorithm::default(), old, new)
}

/// Diffs two segmented token sequences.
///
/// Matchable segments with the same content are paired first, then both
/// trees are flattened into tokens and paired segments and diffed with
/// `algorithm`. Trees carry no pairing state, so either one can be diffed
/// again against another tree.
pub fn diff_segments_with(
    algorithm: Algorithm,
    old: &SegmentTree,
    new: &SegmentTree,
) -> Vec<Operation> {
    let matching = Matching::new(old, new);

    let old_clusters = matcher::clusters(old, |id| matching.new_of(id).is_some());
    let new_clusters = matcher::clusters(new, |id| matching.old_of(id).is_some());
    let coarse = sequence_matcher::diff_with(
        algorithm,
        &matcher::old_keys(old, &old_clusters, &matching),
        &matcher::new_keys(new, &new_clusters),
    );

    let operations =
        expand::expand(&coarse, (old, &old_clusters), (new, &new_clusters), &matching);
    tracing::debug!(
        old_clusters = old_clusters.len(),
        new_clusters = new_clusters.len(),
        coarse = coarse.len(),
        operations = operations.len(),
        "segment diff"
    );
    operations
}

/// Engine diffing through segment trees.
#[derive(Debug, Clone, Default)]
pub struct SegmentMatcher<T = WikitextSplit> {
    tokenizer: T,
    segmenter: Segmenter,
    algorithm: Algorithm,
}

impl<T> SegmentMatcher<T> {
    pub fn new(tokenizer: T, segmenter: Segmenter) -> Self {
        Self { tokenizer, segmenter, algorithm: Algorithm::default() }
    }

    /// Sets the algorithm the clustered sequences are diffed with.
    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        Self { algorithm, ..self }
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }
}

impl<T: Tokenize + Clone + 'static> DiffEngine for SegmentMatcher<T> {
    fn processor(&self) -> Box<dyn DiffProcessor> {
        Box::new(
            SegmentProcessor::new(self.tokenizer.clone(), self.segmenter.clone())
                .with_algorithm(self.algorithm),
        )
    }
}

pub struct SegmentProcessor<T> {
    tokenizer: T,
    segmenter: Segmenter,
    algorithm: Algorithm,
    state: State<SegmentTree>,
}

impl<T: Tokenize> SegmentProcessor<T> {
    pub fn new(tokenizer: T, segmenter: Segmenter) -> Self {
        Self { tokenizer, segmenter, algorithm: Algorithm::default(), state: State::Empty }
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        Self { algorithm, ..self }
    }

    pub fn state(&self) -> &State<SegmentTree> {
        &self.state
    }

    /// Makes an already segmented text the one the next call to `process`
    /// compares to.
    pub fn update_tree(&mut self, tree: SegmentTree) {
        self.state = State::Loaded(tree);
    }

    /// Diffs an already segmented text against the last processed one.
    pub fn process_tree(&mut self, new: SegmentTree) -> Delta {
        let old = match mem::take(&mut self.state) {
            State::Empty => SegmentTree::empty(),
            State::Loaded(tree) => tree,
        };

        let operations = diff_segments_with(self.algorithm, &old, &new);
        let delta = Delta {
            operations,
            old_tokens: old.tokens().clone(),
            new_tokens: new.tokens().clone(),
        };
        self.state = State::Loaded(new);
        delta
    }
}

impl<T: Tokenize> DiffProcessor for SegmentProcessor<T> {
    fn process(&mut self, text: &str) -> Delta {
        let tree = self.segmenter.segment(self.tokenizer.tokenize(text));
        self.process_tree(tree)
    }

    fn update(&mut self, last_text: &str) {
        self.update_tokens(self.tokenizer.tokenize(last_text));
    }

    fn update_tokens(&mut self, tokens: Vec<Token>) {
        let tree = self.segmenter.segment(tokens);
        self.update_tree(tree);
    }

    fn reset(&mut self) {
        self.state = State::Empty;
    }
}
