use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Equal,
    Insert,
    Delete,
}

impl Tag {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of an edit script over two token sequences.
///
/// `a1..a2` is a range of the old sequence and `b1..b2` a range of the new
/// one. Insertions have an empty old range, deletions an empty new range, and
/// both ranges of an equality have the same length.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub tag: Tag,
    pub a1: usize,
    pub a2: usize,
    pub b1: usize,
    pub b2: usize,
}

impl Operation {
    #[track_caller]
    pub fn equal(a1: usize, a2: usize, b1: usize, b2: usize) -> Self {
        assert!(a2 - a1 == b2 - b1, "an equality spans ranges of the same length");
        Self { tag: Tag::Equal, a1, a2, b1, b2 }
    }

    #[track_caller]
    pub fn insert(a1: usize, a2: usize, b1: usize, b2: usize) -> Self {
        assert!(a1 == a2, "an insertion has an empty old range");
        Self { tag: Tag::Insert, a1, a2, b1, b2 }
    }

    #[track_caller]
    pub fn delete(a1: usize, a2: usize, b1: usize, b2: usize) -> Self {
        assert!(b1 == b2, "a deletion has an empty new range");
        Self { tag: Tag::Delete, a1, a2, b1, b2 }
    }

    pub fn name(&self) -> &'static str {
        self.tag.name()
    }

    pub fn old_range(&self) -> Range<usize> {
        self.a1..self.a2
    }

    pub fn new_range(&self) -> Range<usize> {
        self.b1..self.b2
    }

    /// Whether the operation accounts for tokens of the old sequence.
    pub fn is_old_side(&self) -> bool {
        matches!(self.tag, Tag::Equal | Tag::Delete)
    }

    /// Whether the operation accounts for tokens of the new sequence.
    pub fn is_new_side(&self) -> bool {
        matches!(self.tag, Tag::Equal | Tag::Insert)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.tag {
            Tag::Equal => "Equal",
            Tag::Insert => "Insert",
            Tag::Delete => "Delete",
        };
        write!(f, "{name}({}, {}, {}, {})", self.a1, self.a2, self.b1, self.b2)
    }
}
