use std::fmt;
use std::str::FromStr;

/// Lexical category of a token.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    BREAK,
    WHITESPACE,

    URL,
    EQUALS,
    BAR,
    ENTITY,
    REF_OPEN,
    REF_CLOSE,
    REF_SINGLETON,
    TAG,
    NUMBER,
    BOLD,
    ITALIC,
    JAPAN_PUNCT,
    CJK_WORD,
    WORD,

    TAB_OPEN,
    TAB_CLOSE,
    DBRACK_OPEN,
    DBRACK_CLOSE,
    BRACK_OPEN,
    BRACK_CLOSE,
    PAREN_OPEN,
    PAREN_CLOSE,
    DCURLY_OPEN,
    DCURLY_CLOSE,
    CURLY_OPEN,
    CURLY_CLOSE,

    PERIOD,
    QMARK,
    EPOINT,
    COMMA,
    COLON,
    SCOLON,
    COMMENT_START,
    COMMENT_END,
    DANDA,

    ETC,
}

impl TokenKind {
    pub const ALL: [Self; 38] = [
        Self::BREAK,
        Self::WHITESPACE,
        Self::URL,
        Self::EQUALS,
        Self::BAR,
        Self::ENTITY,
        Self::REF_OPEN,
        Self::REF_CLOSE,
        Self::REF_SINGLETON,
        Self::TAG,
        Self::NUMBER,
        Self::BOLD,
        Self::ITALIC,
        Self::JAPAN_PUNCT,
        Self::CJK_WORD,
        Self::WORD,
        Self::TAB_OPEN,
        Self::TAB_CLOSE,
        Self::DBRACK_OPEN,
        Self::DBRACK_CLOSE,
        Self::BRACK_OPEN,
        Self::BRACK_CLOSE,
        Self::PAREN_OPEN,
        Self::PAREN_CLOSE,
        Self::DCURLY_OPEN,
        Self::DCURLY_CLOSE,
        Self::CURLY_OPEN,
        Self::CURLY_CLOSE,
        Self::PERIOD,
        Self::QMARK,
        Self::EPOINT,
        Self::COMMA,
        Self::COLON,
        Self::SCOLON,
        Self::COMMENT_START,
        Self::COMMENT_END,
        Self::DANDA,
        Self::ETC,
    ];

    /// The lexicon name of the category, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BREAK => "break",
            Self::WHITESPACE => "whitespace",
            Self::URL => "url",
            Self::EQUALS => "equals",
            Self::BAR => "bar",
            Self::ENTITY => "entity",
            Self::REF_OPEN => "ref_open",
            Self::REF_CLOSE => "ref_close",
            Self::REF_SINGLETON => "ref_singleton",
            Self::TAG => "tag",
            Self::NUMBER => "number",
            Self::BOLD => "bold",
            Self::ITALIC => "italic",
            Self::JAPAN_PUNCT => "japan_punct",
            Self::CJK_WORD => "cjk_word",
            Self::WORD => "word",
            Self::TAB_OPEN => "tab_open",
            Self::TAB_CLOSE => "tab_close",
            Self::DBRACK_OPEN => "dbrack_open",
            Self::DBRACK_CLOSE => "dbrack_close",
            Self::BRACK_OPEN => "brack_open",
            Self::BRACK_CLOSE => "brack_close",
            Self::PAREN_OPEN => "paren_open",
            Self::PAREN_CLOSE => "paren_close",
            Self::DCURLY_OPEN => "dcurly_open",
            Self::DCURLY_CLOSE => "dcurly_close",
            Self::CURLY_OPEN => "curly_open",
            Self::CURLY_CLOSE => "curly_close",
            Self::PERIOD => "period",
            Self::QMARK => "qmark",
            Self::EPOINT => "epoint",
            Self::COMMA => "comma",
            Self::COLON => "colon",
            Self::SCOLON => "scolon",
            Self::COMMENT_START => "comment_start",
            Self::COMMENT_END => "comment_end",
            Self::DANDA => "danda",
            Self::ETC => "etc",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(kind.name().parse::<TokenKind>(), Ok(kind), "Kind: {kind:?}");
        }
    }

    #[test]
    fn all_is_in_declaration_order() {
        for (i, kind) in TokenKind::ALL.into_iter().enumerate() {
            assert_eq!(kind as usize, i, "Kind: {kind:?}");
        }
    }

    #[test]
    fn unknown_name() {
        let err = "sentence".parse::<TokenKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown token kind `sentence`");
    }
}
