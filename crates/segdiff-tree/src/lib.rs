mod builder;
mod digest;

use std::fmt::Write as _;
use std::ops::Range;
use std::sync::Arc;

pub use builder::Builder;
pub use digest::Digest;
use la_arena::{Arena, Idx};
use segdiff_tokenizer::Token;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SegmentKind {
    ROOT,
    WHITESPACE,
    PARAGRAPH,
    SENTENCE,
}

impl SegmentKind {
    /// Matchable segments carry a digest and can be paired across trees.
    pub const fn is_matchable(self) -> bool {
        matches!(self, Self::PARAGRAPH | Self::SENTENCE)
    }
}

pub type SegmentId = Idx<Segment>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Child {
    Token(u32),
    Segment(SegmentId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    kind: SegmentKind,
    parent: Option<SegmentId>,
    children: Range<u32>,
    start: u32,
    end: u32,
    digest: Option<Digest>,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    /// Index of the first token.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// One past the index of the last token.
    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    pub fn token_count(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `Some` exactly for matchable segments.
    pub fn digest(&self) -> Option<Digest> {
        self.digest
    }
}

/// An immutable tree of segments over one token sequence.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    tokens: Arc<[Token]>,
    segments: Arena<Segment>,
    children: Box<[Child]>,
    root: SegmentId,
}

impl SegmentTree {
    /// The tree of an empty token sequence: a lone root.
    pub fn empty() -> Self {
        let mut builder = Builder::new(Vec::new());
        builder.start_segment(SegmentKind::ROOT);
        builder.finish_segment();
        builder.finish()
    }

    pub fn root(&self) -> SegmentId {
        self.root
    }

    pub fn tokens(&self) -> &Arc<[Token]> {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id]
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn children(&self, id: SegmentId) -> &[Child] {
        let Range { start, end } = self.segments[id].children;
        &self.children[start as usize..end as usize]
    }

    /// `id` and every segment below it, in pre-order.
    pub fn descendants(&self, id: SegmentId) -> Descendants<'_> {
        Descendants { tree: self, stack: vec![id] }
    }

    pub fn segment_tokens(&self, id: SegmentId) -> &[Token] {
        &self.tokens[self.segments[id].span()]
    }

    pub fn segment_text(&self, id: SegmentId) -> String {
        segdiff_tokenizer::join(self.segment_tokens(id))
    }

    /// Renders the tree one node per line, for snapshot tests and logs.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.debug_segment(&mut out, self.root, 0);
        out
    }

    fn debug_segment(&self, out: &mut String, id: SegmentId, depth: usize) {
        let segment = &self.segments[id];
        let _ = writeln!(
            out,
            "{:indent$}{:?}@{}..{}",
            "",
            segment.kind,
            segment.start,
            segment.end,
            indent = depth * 2
        );

        for &child in self.children(id) {
            match child {
                Child::Token(index) => {
                    let token = &self.tokens[index as usize];
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?}@{} {:?}",
                        "",
                        token.kind,
                        index,
                        token.as_str(),
                        indent = (depth + 1) * 2
                    );
                }
                Child::Segment(child) => self.debug_segment(out, child, depth + 1),
            }
        }
    }
}

/// Pre-order iterator over segment ids.
pub struct Descendants<'a> {
    tree: &'a SegmentTree,
    stack: Vec<SegmentId>,
}

impl Iterator for Descendants<'_> {
    type Item = SegmentId;

    fn next(&mut self) -> Option<SegmentId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().filter_map(|child| match *child {
            Child::Segment(child) => Some(child),
            Child::Token(_) => None,
        }));
        Some(id)
    }
}
