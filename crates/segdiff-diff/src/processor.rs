//! Diffing a whole revision history, one text at a time.

use std::sync::Arc;

use segdiff_tokenizer::Token;

use crate::serialize::SerializedOperation;
use crate::{Operation, apply, serialize};

/// What a processor remembers of the previously processed text.
#[derive(Debug, Clone)]
pub enum State<T> {
    Empty,
    Loaded(T),
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> State<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Loaded(last) => Some(last),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The outcome of processing one revision.
#[derive(Debug, Clone)]
pub struct Delta {
    pub operations: Vec<Operation>,
    pub old_tokens: Arc<[Token]>,
    pub new_tokens: Arc<[Token]>,
}

impl Delta {
    pub fn into_parts(self) -> (Vec<Operation>, Arc<[Token]>, Arc<[Token]>) {
        (self.operations, self.old_tokens, self.new_tokens)
    }

    /// The tokens of the new revision, rebuilt from the operations.
    pub fn apply(&self) -> impl Iterator<Item = &Token> {
        apply(&self.operations, &self.old_tokens, &self.new_tokens)
    }

    pub fn serialize(&self) -> Vec<SerializedOperation> {
        serialize(&self.operations, &self.old_tokens, &self.new_tokens)
    }
}

/// A stateful differ: every processed text is compared to the previous one.
pub trait DiffProcessor {
    /// Diffs `text` against the last processed text and remembers `text`.
    fn process(&mut self, text: &str) -> Delta;

    /// Makes `last_text` the text the next call to `process` compares to.
    fn update(&mut self, last_text: &str);

    /// Like [`DiffProcessor::update`], for an already tokenized text.
    fn update_tokens(&mut self, tokens: Vec<Token>);

    /// Forgets the last processed text.
    fn reset(&mut self);
}

impl<P: DiffProcessor + ?Sized> DiffProcessor for Box<P> {
    fn process(&mut self, text: &str) -> Delta {
        (**self).process(text)
    }

    fn update(&mut self, last_text: &str) {
        (**self).update(last_text);
    }

    fn update_tokens(&mut self, tokens: Vec<Token>) {
        (**self).update_tokens(tokens);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

pub trait DiffEngine {
    /// A fresh processor in the [`State::Empty`] state.
    fn processor(&self) -> Box<dyn DiffProcessor>;

    /// Diffs every text against its predecessor, the first one against
    /// nothing.
    fn process<I>(&self, texts: I) -> Deltas<I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Deltas { processor: self.processor(), texts: texts.into_iter() }
    }
}

impl<E: DiffEngine + ?Sized> DiffEngine for Box<E> {
    fn processor(&self) -> Box<dyn DiffProcessor> {
        (**self).processor()
    }
}

impl<E: DiffEngine + ?Sized> DiffEngine for &E {
    fn processor(&self) -> Box<dyn DiffProcessor> {
        (**self).processor()
    }
}

/// Iterator returned by [`DiffEngine::process`].
pub struct Deltas<I> {
    processor: Box<dyn DiffProcessor>,
    texts: I,
}

impl<I> Iterator for Deltas<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Delta;

    fn next(&mut self) -> Option<Delta> {
        let text = self.texts.next()?;
        Some(self.processor.process(text.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.texts.size_hint()
    }
}
