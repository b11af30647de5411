use std::fmt;

use sha2::{Digest as _, Sha256};

/// Position independent fingerprint of a segment's content.
///
/// Covers the UTF-8 text of every descendant token, each prefixed with its
/// byte length, together with the number of tokens. Two equal digests always
/// span the same token texts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest {
    hash: [u8; 32],
    tokens: u32,
}

impl Digest {
    pub fn of_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut builder = DigestBuilder::new();
        for text in texts {
            builder.push(text);
        }
        builder.finish()
    }

    pub fn token_count(&self) -> u32 {
        self.tokens
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.hash[..6] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "/{}", self.tokens)
    }
}

pub(crate) struct DigestBuilder {
    hasher: Sha256,
    tokens: u32,
}

impl DigestBuilder {
    pub(crate) fn new() -> Self {
        Self { hasher: Sha256::new(), tokens: 0 }
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.hasher.update((text.len() as u64).to_le_bytes());
        self.hasher.update(text.as_bytes());
        self.tokens += 1;
    }

    pub(crate) fn finish(self) -> Digest {
        Digest { hash: self.hasher.finalize().into(), tokens: self.tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depends_on_text_only() {
        let a = Digest::of_texts(["zero", " ", "one"]);
        let b = Digest::of_texts(["zero", " ", "one"]);
        assert_eq!(a, b);
        assert_eq!(a.token_count(), 3);
    }

    #[test]
    fn differing_text() {
        assert_ne!(Digest::of_texts(["zero", " ", "one"]), Digest::of_texts(["zero", " ", "two"]));
    }

    #[test]
    fn differing_token_count() {
        assert_ne!(Digest::of_texts(["ab"]), Digest::of_texts(["a", "b"]));
    }

    #[test]
    fn differing_boundaries() {
        assert_ne!(Digest::of_texts(["ab", "c"]), Digest::of_texts(["a", "bc"]));
        assert_ne!(Digest::of_texts(["", "abc"]), Digest::of_texts(["abc", ""]));
    }

    #[test]
    fn empty() {
        let empty = Digest::of_texts([]);
        assert_eq!(empty, DigestBuilder::new().finish());
        assert_eq!(empty.token_count(), 0);
        assert_eq!(format!("{empty:?}"), "e3b0c44298fc/0");
    }
}
