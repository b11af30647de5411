use std::sync::Arc;

use drop_bomb::DropBomb;
use segdiff_tokenizer::{KindSet, Token, TokenKind};
use segdiff_tree::{Builder, SegmentKind, SegmentTree};

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    events: Vec<Event>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0, events: Vec::with_capacity(tokens.len() + tokens.len() / 2) }
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|token| token.kind)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos == self.tokens.len()
    }

    pub(crate) fn at(&self, set: &KindSet) -> bool {
        self.peek_kind().is_some_and(|kind| set.contains(kind))
    }

    pub(crate) fn advance(&mut self) {
        if self.at_end() {
            return;
        }

        self.events.push(Event::Token(self.pos as u32));
        self.pos += 1;
    }

    /// Consumes tokens while they belong to `set`.
    pub(crate) fn advance_while(&mut self, set: &KindSet) {
        while self.at(set) {
            self.advance();
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn build_tree(self, tokens: Arc<[Token]>) -> SegmentTree {
        debug_assert!(self.at_end(), "unconsumed tokens");
        let mut builder = Builder::new(tokens);

        for event in self.events {
            match event {
                Event::Start { kind: None } => {}
                Event::Start { kind: Some(kind) } => builder.start_segment(kind),
                Event::Token(index) => builder.token(index),
                Event::Finish => builder.finish_segment(),
            }
        }

        builder.finish()
    }
}

enum Event {
    Start { kind: Option<SegmentKind> },
    Token(u32),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Self { position: pos, bomb: DropBomb::new("Marker must be completed") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SegmentKind) {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot } => {
                *slot = Some(kind);
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
    }
}
