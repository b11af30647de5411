//! The JSON record form of operations, carrying their token texts.

use segdiff_tokenizer::Token;
use serde::{Deserialize, Serialize};

use crate::{Operation, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedOperation {
    pub name: Tag,
    pub a1: usize,
    pub a2: usize,
    pub b1: usize,
    pub b2: usize,
    pub tokens: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("operation {index} spans {expected} tokens but carries {found}")]
    TokenCount { index: usize, expected: usize, found: usize },
    #[error("no operation covers token {position}")]
    Gap { position: usize },
    #[error("token {position} is covered by more than one operation")]
    Overlap { position: usize },
}

/// Attaches token texts to `operations`: from the old side for equalities
/// and deletions, from the new side for insertions.
pub fn serialize(
    operations: &[Operation],
    old: &[Token],
    new: &[Token],
) -> Vec<SerializedOperation> {
    operations
        .iter()
        .map(|op| {
            let tokens = match op.tag {
                Tag::Equal | Tag::Delete => &old[op.old_range()],
                Tag::Insert => &new[op.new_range()],
            };
            SerializedOperation {
                name: op.tag,
                a1: op.a1,
                a2: op.a2,
                b1: op.b1,
                b2: op.b2,
                tokens: tokens.iter().map(|token| token.as_str().to_owned()).collect(),
            }
        })
        .collect()
}

/// Rebuilds the old text out of serialized operations alone.
pub fn replay_old(records: &[SerializedOperation]) -> Result<String, ReplayError> {
    replay(records, |record| match record.name {
        Tag::Equal | Tag::Delete => Some((record.a1, record.a2)),
        Tag::Insert => None,
    })
}

/// Rebuilds the new text out of serialized operations alone.
pub fn replay_new(records: &[SerializedOperation]) -> Result<String, ReplayError> {
    replay(records, |record| match record.name {
        Tag::Equal | Tag::Insert => Some((record.b1, record.b2)),
        Tag::Delete => None,
    })
}

fn replay(
    records: &[SerializedOperation],
    range: impl Fn(&SerializedOperation) -> Option<(usize, usize)>,
) -> Result<String, ReplayError> {
    let mut slots: Vec<Option<&str>> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some((start, end)) = range(record) else { continue };

        let expected = end.saturating_sub(start);
        if expected != record.tokens.len() {
            return Err(ReplayError::TokenCount { index, expected, found: record.tokens.len() });
        }

        if slots.len() < end {
            slots.resize(end, None);
        }
        for (position, token) in (start..end).zip(&record.tokens) {
            if slots[position].replace(token).is_some() {
                return Err(ReplayError::Overlap { position });
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(position, slot)| slot.ok_or(ReplayError::Gap { position }))
        .collect()
}
