use segdiff_tokenizer::KindSet;
use segdiff_tree::SegmentKind::*;

use crate::SegmenterConfig;
use crate::parser::Parser;

pub(crate) fn root(p: &mut Parser<'_>, config: &SegmenterConfig) {
    let separators = config.whitespace.union(&config.paragraph_end);

    let m = p.start();
    while !p.at_end() {
        if p.at(&separators) {
            whitespace(p, &separators);
        } else {
            paragraph(p, config);
        }
    }
    m.complete(p, ROOT);
}

fn whitespace(p: &mut Parser<'_>, set: &KindSet) {
    let m = p.start();
    p.advance_while(set);
    m.complete(p, WHITESPACE);
}

/// Runs until a paragraph terminator, which is left for the caller.
fn paragraph(p: &mut Parser<'_>, config: &SegmenterConfig) {
    let inner_whitespace = config.whitespace.difference(&config.paragraph_end);

    let m = p.start();
    while !p.at_end() && !p.at(&config.paragraph_end) {
        if p.at(&inner_whitespace) {
            whitespace(p, &inner_whitespace);
        } else {
            sentence(p, config);
        }
    }
    m.complete(p, PARAGRAPH);
}

/// A sentence terminator only ends the sentence once `min_sentence`
/// non-whitespace tokens have been seen, so "A. J. Smith" stays whole.
fn sentence(p: &mut Parser<'_>, config: &SegmenterConfig) {
    let m = p.start();
    let mut content = 0;
    while let Some(kind) = p.peek_kind() {
        if config.paragraph_end.contains(kind) {
            break;
        }

        p.advance();
        if !config.whitespace.contains(kind) {
            content += 1;
        }
        if config.sentence_end.contains(kind) && content >= config.min_sentence {
            break;
        }
    }
    m.complete(p, SENTENCE);
}
