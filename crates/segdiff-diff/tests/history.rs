use segdiff_diff::{
    DiffEngine, DiffProcessor as _, Operation, SegmentMatcher, SegmentProcessor, SequenceMatcher,
    Tag, apply, diff, sequence_matcher,
};
use segdiff_segmenter::Segmenter;
use segdiff_tokenizer::{TextSplit, Token, Tokenize as _, WikitextSplit, join};

fn tokens(text: &str) -> Vec<Token> {
    WikitextSplit.tokenize(text)
}

fn changed_tokens(operations: &[Operation]) -> usize {
    operations
        .iter()
        .map(|op| match op.tag {
            Tag::Equal => 0,
            Tag::Insert => op.b2 - op.b1,
            Tag::Delete => op.a2 - op.a1,
        })
        .sum()
}

#[test]
fn swapped_sentences_barely_change() {
    let old = "This is some text.  This is some other text.";
    let new = "This is some other text.  This is some text.";

    let segmented = diff(tokens(old), tokens(new), &Segmenter::default());
    let sequenced = sequence_matcher::diff(&tokens(old), &tokens(new));

    assert!(changed_tokens(&segmented) <= 2, "{segmented:?}");
    assert!(changed_tokens(&segmented) < changed_tokens(&sequenced), "{sequenced:?}");
    assert_eq!(join(apply(&segmented, &tokens(old), &tokens(new))), new);
}

#[test]
fn history_through_engine() {
    let engine = SegmentMatcher::new(WikitextSplit, Segmenter::default());
    let deltas: Vec<_> = engine.process(["Apples are red.", "Apples are tasty and red."]).collect();

    assert_eq!(deltas.len(), 2);
    assert_eq!(deltas[0].operations, [Operation::insert(0, 0, 0, 6)]);
    assert_eq!(deltas[1].operations, [
        Operation::equal(0, 4, 0, 4),
        Operation::insert(4, 4, 4, 8),
        Operation::equal(4, 6, 8, 10),
    ]);

    let (operations, old_tokens, new_tokens) = deltas[1].clone().into_parts();
    assert_eq!(operations.len(), 3);
    assert_eq!(old_tokens.len(), 6);
    assert_eq!(new_tokens.len(), 10);
}

#[test]
fn reused_processor_matches_fresh_diffs() {
    let revisions = [
        "A first paragraph is here.\n\nA second one follows it.",
        "A second one follows it.\n\nA first paragraph is here.",
        "A second one follows it.\n\nA first paragraph is here. And now more text is added.",
    ];
    let segmenter = Segmenter::default();
    let mut processor = SegmentProcessor::new(WikitextSplit, segmenter.clone());

    let first = processor.process(revisions[0]);
    assert_eq!(first.operations, [Operation::insert(0, 0, 0, tokens(revisions[0]).len())]);

    for pair in revisions.windows(2) {
        let delta = processor.process(pair[1]);
        let fresh = diff(tokens(pair[0]), tokens(pair[1]), &segmenter);
        assert_eq!(delta.operations, fresh);
        assert_eq!(join(delta.old_tokens.iter()), pair[0]);
    }
}

#[test]
fn processed_tree_is_kept_for_the_next_text() {
    let segmenter = Segmenter::default();
    let mut processor = SegmentProcessor::new(WikitextSplit, segmenter.clone());
    processor.update_tree(segmenter.segment(tokens("Something was here before.")));

    let delta = processor.process("Something was here before. And then more.");
    assert_eq!(delta.operations, [Operation::equal(0, 8, 0, 8), Operation::insert(8, 8, 8, 15)]);

    let last = processor.state().loaded().map(|tree| tree.token_count());
    assert_eq!(last, Some(15));
}

#[test]
fn copied_and_removed_sentences() {
    let old = concat!(
        "\n",
        "    This sentence is going to get copied. This sentence is going to go away.\n",
        "    \n",
        "    ASDSJDNA  asas random words.\n",
        "    \n",
        "    This is another sentence.\n",
        "    ",
    );
    let new = concat!(
        "\n",
        "    This sentence is going to get copied.  Wha... a new thing appeared!\n",
        "    \n",
        "    ASDSJDNA  asas random words.\n",
        "    \n",
        "    This is another sentence. This sentence is going to get copied.\n",
        "    ",
    );

    for engine in [
        Box::new(SegmentMatcher::new(TextSplit, Segmenter::default())) as Box<dyn DiffEngine>,
        Box::new(SegmentMatcher::new(WikitextSplit, Segmenter::default())),
        Box::new(SequenceMatcher::new(TextSplit, Default::default())),
    ] {
        let deltas: Vec<_> = engine.process([old, new]).collect();
        let delta = &deltas[1];
        assert_eq!(join(delta.apply()), new);

        let records = delta.serialize();
        assert_eq!(segdiff_diff::replay_old(&records).as_deref(), Ok(old));
        assert_eq!(segdiff_diff::replay_new(&records).as_deref(), Ok(new));
    }
}

#[test]
fn moved_paragraph_is_an_equal() {
    let old = "First paragraph stays where it is.\n\nSecond paragraph moves up top.";
    let new = "Second paragraph moves up top.\n\nFirst paragraph stays where it is.";

    let ops = diff(tokens(old), tokens(new), &Segmenter::default());
    let equal_tokens: usize =
        ops.iter().filter(|op| op.tag == Tag::Equal).map(|op| op.a2 - op.a1).sum();

    // Only the paragraph break can be reported as changed.
    assert!(equal_tokens >= tokens(old).len() - 1, "{ops:?}");
}
