use proptest::prelude::*;
use segdiff_diff::{
    Algorithm, Delta, DiffEngine, SegmentMatcher, SequenceMatcher, Tag, old_side, replay_new,
    replay_old,
};
use segdiff_segmenter::Segmenter;
use segdiff_tokenizer::{TextSplit, WikitextSplit, join};

#[track_caller]
fn check(engine: &impl DiffEngine, old: &str, new: &str) {
    let mut processor = engine.processor();
    processor.update(old);
    let delta = processor.process(new);

    assert_eq!(join(delta.apply()), new);
    assert_eq!(join(old_side(&delta.operations, &delta.old_tokens)), old);
    check_cover(&delta);

    let records = delta.serialize();
    assert_eq!(replay_old(&records).as_deref(), Ok(old));
    assert_eq!(replay_new(&records).as_deref(), Ok(new));
}

#[track_caller]
fn check_cover(delta: &Delta) {
    let mut next = 0;
    for op in delta.operations.iter().filter(|op| op.is_new_side()) {
        assert_eq!(op.b1, next, "gap or overlap on the new side at {op:?}");
        assert!(op.b1 < op.b2, "empty operation {op:?}");
        next = op.b2;
    }
    assert_eq!(next, delta.new_tokens.len());

    let mut old: Vec<_> = delta.operations.iter().filter(|op| op.is_old_side()).collect();
    old.sort_by_key(|op| op.a1);
    let mut next = 0;
    for op in old {
        assert_eq!(op.a1, next, "gap or overlap on the old side at {op:?}");
        assert!(op.a1 < op.a2, "empty operation {op:?}");
        next = op.a2;
    }
    assert_eq!(next, delta.old_tokens.len());

    for op in delta.operations.iter().filter(|op| op.tag == Tag::Equal) {
        assert_eq!(&delta.old_tokens[op.old_range()], &delta.new_tokens[op.new_range()]);
    }
}

const PIECES: &[&str] = &[
    "apples", "are", "red", "tasty", "and", "The", "A", "I", "like", "it", "3.14", "'''bold'''",
    "[[link]]", "{{tpl}}", "<ref>", "</ref>", ".", "!", "?", ",", " ", " ", " ", "  ", "\n",
    "\n\n", " \n \n", "\t",
];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..60).prop_map(|pieces| pieces.concat())
}

/// An old text and a new one made of the same material, reordered and
/// partially edited.
fn revision() -> impl Strategy<Value = (String, String)> {
    (prop::collection::vec(text(), 1..6), any::<prop::sample::Index>(), text()).prop_map(
        |(chunks, split, insert)| {
            let old = chunks.concat();
            let split = split.index(chunks.len());
            let mut moved = chunks[split..].to_vec();
            moved.push(insert);
            moved.extend_from_slice(&chunks[..split]);
            (old, moved.concat())
        },
    )
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(vec![Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs])
}

proptest! {
    #[test]
    fn segment_matcher_unrelated_texts(old in text(), new in text(), algorithm in algorithm()) {
        let engine = SegmentMatcher::new(WikitextSplit, Segmenter::default())
            .with_algorithm(algorithm);
        check(&engine, &old, &new);
    }

    #[test]
    fn segment_matcher_revisions((old, new) in revision(), algorithm in algorithm()) {
        let engine = SegmentMatcher::new(WikitextSplit, Segmenter::default())
            .with_algorithm(algorithm);
        check(&engine, &old, &new);
    }

    #[test]
    fn segment_matcher_text_split((old, new) in revision()) {
        check(&SegmentMatcher::new(TextSplit, Segmenter::default()), &old, &new);
    }

    #[test]
    fn sequence_matcher_revisions((old, new) in revision(), algorithm in algorithm()) {
        check(&SequenceMatcher::new(WikitextSplit, algorithm), &old, &new);
    }
}
