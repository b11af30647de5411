use segdiff_tokenizer::Token;

use crate::{Operation, Tag};

/// Rebuilds the new token sequence: equal ranges come from `old`, inserted
/// ones from `new`.
pub fn apply<'a>(
    operations: &'a [Operation],
    old: &'a [Token],
    new: &'a [Token],
) -> impl Iterator<Item = &'a Token> + 'a {
    operations.iter().flat_map(move |op| match op.tag {
        Tag::Equal => &old[op.old_range()],
        Tag::Insert => &new[op.new_range()],
        Tag::Delete => &[][..],
    })
}

/// Rebuilds the old token sequence by laying out the equal and deleted
/// ranges at their old positions.
pub fn old_side<'a>(operations: &[Operation], old: &'a [Token]) -> Vec<&'a Token> {
    let mut ranges: Vec<_> =
        operations.iter().filter(|op| op.is_old_side()).map(Operation::old_range).collect();
    ranges.sort_unstable_by_key(|range| range.start);
    ranges.into_iter().flat_map(|range| &old[range]).collect()
}

#[cfg(test)]
mod tests {
    use segdiff_tokenizer::{Tokenize as _, WikitextSplit, join};

    use super::*;

    #[test]
    fn moved_equal_reads_from_old_positions() {
        let old = WikitextSplit.tokenize("b a");
        let new = WikitextSplit.tokenize("a b");
        let ops = [
            Operation::equal(2, 3, 0, 1),
            Operation::insert(0, 0, 1, 2),
            Operation::equal(0, 1, 2, 3),
            Operation::delete(1, 2, 3, 3),
        ];

        assert_eq!(join(apply(&ops, &old, &new)), "a b");
        assert_eq!(join(old_side(&ops, &old)), "b a");
    }
}
