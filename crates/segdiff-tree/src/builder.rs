//! Incremental builder for segment trees.

use std::mem;
use std::sync::Arc;

use la_arena::Arena;
use segdiff_tokenizer::Token;

use crate::digest::DigestBuilder;
use crate::{Child, Segment, SegmentId, SegmentKind, SegmentTree};

struct Opened {
    id: SegmentId,
    children: Vec<Child>,
    digest: DigestBuilder,
}

/// Builds a [`SegmentTree`] over a token sequence.
///
/// Tokens have to be added in sequence order, each one exactly once, so that
/// every segment covers a contiguous token range.
pub struct Builder {
    tokens: Arc<[Token]>,
    segments: Arena<Segment>,
    children: Vec<Child>,
    opened: Vec<Opened>,
    children_pool: Vec<Vec<Child>>,
    next_token: u32,
    root: Option<SegmentId>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 8;
const DEFAULT_CHILDREN_LEN: usize = 16;

impl Builder {
    pub fn new(tokens: impl Into<Arc<[Token]>>) -> Self {
        let tokens = tokens.into();
        Self {
            children: Vec::with_capacity(tokens.len() + tokens.len() / 4),
            tokens,
            segments: Arena::new(),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            next_token: 0,
            root: None,
        }
    }

    fn new_children_vec(&mut self) -> Vec<Child> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    fn recycle_children_vec(&mut self, vec: Vec<Child>) {
        self.children_pool.push(vec);
    }

    /// Starts a new segment of the given kind under the current one.
    pub fn start_segment(&mut self, kind: SegmentKind) {
        let parent = self.opened.last().map(|opened| opened.id);
        assert!(
            parent.is_some() || self.root.is_none(),
            "a segment tree has exactly one root segment"
        );

        let id = self.segments.alloc(Segment {
            kind,
            parent,
            children: 0..0,
            start: self.next_token,
            end: self.next_token,
            digest: None,
        });

        match self.opened.last_mut() {
            Some(parent) => parent.children.push(Child::Segment(id)),
            None => self.root = Some(id),
        }

        let children = self.new_children_vec();
        self.opened.push(Opened { id, children, digest: DigestBuilder::new() });
    }

    /// Adds the next token of the sequence to the current segment.
    #[track_caller]
    pub fn token(&mut self, index: u32) {
        assert_eq!(index, self.next_token, "tokens must be added in sequence order");
        let text = self.tokens[index as usize].as_str();

        let Some(parent) = self.opened.last_mut() else {
            panic!("a token needs an opened segment");
        };
        parent.children.push(Child::Token(index));

        for opened in &mut self.opened {
            opened.digest.push(text);
        }
        self.next_token += 1;
    }

    /// Finishes the most recently started segment.
    pub fn finish_segment(&mut self) {
        let Some(Opened { id, mut children, digest }) = self.opened.pop() else {
            panic!("no opened segment to finish");
        };

        let start = self.children.len() as u32;
        self.children.append(&mut children);
        self.recycle_children_vec(children);

        let segment = &mut self.segments[id];
        segment.children = start..self.children.len() as u32;
        segment.end = self.next_token;
        if segment.kind.is_matchable() {
            segment.digest = Some(digest.finish());
        }
    }

    /// Finishes building and returns the immutable tree.
    pub fn finish(mut self) -> SegmentTree {
        assert!(self.opened.is_empty(), "unfinished segments");
        let Some(root) = self.root else {
            panic!("a segment tree needs a root segment");
        };
        assert_eq!(
            self.next_token as usize,
            self.tokens.len(),
            "every token must belong to the tree"
        );

        SegmentTree {
            tokens: mem::replace(&mut self.tokens, Arc::from(Vec::new())),
            segments: mem::take(&mut self.segments),
            children: mem::take(&mut self.children).into_boxed_slice(),
            root,
        }
    }
}
