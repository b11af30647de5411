use crate::TokenKind;

const _: () = assert!(TokenKind::ALL.len() <= u64::BITS as usize);

/// A set of token kinds, one bit per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KindSet {
    bits: u64,
}

impl KindSet {
    pub const EMPTY: Self = Self { bits: 0 };

    const fn bit(kind: TokenKind) -> u64 {
        1 << kind as u8
    }

    pub const fn new<const N: usize>(kinds: [TokenKind; N]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < N {
            bits |= Self::bit(kinds[i]);
            i += 1;
        }
        Self { bits }
    }

    pub const fn union(self, other: &Self) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn difference(self, other: &Self) -> Self {
        Self { bits: self.bits & !other.bits }
    }

    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.bits & Self::bit(kind) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in declaration order of [`TokenKind`].
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.into_iter().filter(|&kind| self.contains(kind))
    }
}

impl FromIterator<TokenKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        Self { bits: iter.into_iter().fold(0, |bits, kind| bits | Self::bit(kind)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind::*;

    #[test]
    fn contains() {
        const SET: KindSet = KindSet::new([BREAK, PERIOD, ETC]);

        assert!(SET.contains(BREAK));
        assert!(SET.contains(PERIOD));
        assert!(SET.contains(ETC));
        assert!(!SET.contains(WHITESPACE));
        assert!(!SET.contains(WORD));
    }

    #[test]
    fn union_and_difference() {
        let a = KindSet::new([WHITESPACE, BREAK]);
        let b = KindSet::new([BREAK, QMARK]);

        assert_eq!(a.union(&b), KindSet::new([WHITESPACE, BREAK, QMARK]));
        assert_eq!(a.difference(&b), KindSet::new([WHITESPACE]));
        assert!(a.difference(&a).is_empty());
        assert!(!a.is_empty());
    }

    #[test]
    fn iter_in_kind_order() {
        let set: KindSet = [QMARK, BREAK, WORD].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![BREAK, WORD, QMARK]);
    }
}
