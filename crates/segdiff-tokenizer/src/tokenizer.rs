use text_size::{TextRange, TextSize};

use crate::Token;
use crate::TokenKind::{self, *};
use crate::cursor::{Cursor, EOF_CHAR};

const PLAIN_PROTOCOLS: [&str; 9] =
    ["bitcoin", "geo", "magnet", "mailto", "news", "sip", "sips", "tel", "urn"];

const SLASHED_PROTOCOLS: [&str; 17] = [
    "http", "https", "ftp", "ftps", "git", "gopher", "irc", "ircs", "mms", "nntp", "redis", "sftp",
    "ssh", "svn", "telnet", "worldwind", "xmpp",
];

/// The set of lexical rules a [`Tokenizer`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lexicon {
    /// MediaWiki markup aware rules.
    #[default]
    Wikitext,
    /// Words, numbers, punctuation and whitespace only.
    Text,
}

/// Splits a text into lossless tokens.
///
/// Every byte of the input ends up in exactly one token, so joining the texts
/// of all produced tokens yields the input again.
pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    lexicon: Lexicon,
    index: u32,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, lexicon: Lexicon) -> Self {
        Self { text, cursor: Cursor::new(text), lexicon, index: 0 }
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }

        let kind = match self.lexicon {
            Lexicon::Wikitext => self.wikitext_kind(),
            Lexicon::Text => self.text_kind(),
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        let token = Token { kind, text: self.text[range].into(), index: self.index, range };
        self.index += 1;
        Some(token)
    }

    fn wikitext_kind(&mut self) -> TokenKind {
        let first = self.cursor.peek();

        if first.is_whitespace() {
            return self.wikitext_whitespace();
        }

        if first.is_ascii_lowercase() || first == '/' {
            if let Some(len) = url_len(self.cursor.rest()) {
                self.cursor.advance_bytes(len);
                return URL;
            }
        }

        match first {
            '=' => {
                self.cursor.advance_while(|c| c == '=');
                EQUALS
            }
            '{' if self.cursor.second() == '|' => self.fixed(2, TAB_OPEN),
            '|' if self.cursor.second() == '}' => self.fixed(2, TAB_CLOSE),
            '|' => self.fixed(1, BAR),
            '&' => match entity_len(self.cursor.rest()) {
                Some(len) => {
                    self.cursor.advance_bytes(len);
                    ENTITY
                }
                None => self.fixed(1, ETC),
            },
            '<' => self.angle(),
            '0'..='9' => {
                self.number();
                NUMBER
            }
            '\'' => {
                if self.cursor.eat("'''") {
                    BOLD
                } else if self.cursor.eat("''") {
                    ITALIC
                } else {
                    self.fixed(1, ETC)
                }
            }
            '\u{3000}'..='\u{303F}' => self.fixed(1, JAPAN_PUNCT),
            c if is_cjk(c) => {
                self.cursor.advance_while(is_cjk);
                CJK_WORD
            }
            c if is_word_start(c) => {
                self.word();
                WORD
            }
            '[' if self.cursor.second() == '[' => self.fixed(2, DBRACK_OPEN),
            ']' if self.cursor.second() == ']' => self.fixed(2, DBRACK_CLOSE),
            '[' => self.fixed(1, BRACK_OPEN),
            ']' => self.fixed(1, BRACK_CLOSE),
            '(' => self.fixed(1, PAREN_OPEN),
            ')' => self.fixed(1, PAREN_CLOSE),
            '{' if self.cursor.second() == '{' => self.fixed(2, DCURLY_OPEN),
            '}' if self.cursor.second() == '}' => self.fixed(2, DCURLY_CLOSE),
            '{' => self.fixed(1, CURLY_OPEN),
            '}' => self.fixed(1, CURLY_CLOSE),
            '.' => self.repeated('.', PERIOD),
            '?' => self.repeated('?', QMARK),
            '!' => self.repeated('!', EPOINT),
            ',' => self.repeated(',', COMMA),
            ':' => self.repeated(':', COLON),
            ';' => self.repeated(';', SCOLON),
            '-' if self.cursor.starts_with("-->") => self.fixed(3, COMMENT_END),
            '।' | '॥' => self.fixed(1, DANDA),
            _ => self.fixed(1, ETC),
        }
    }

    fn text_kind(&mut self) -> TokenKind {
        match self.cursor.peek() {
            c if c.is_whitespace() => {
                let newlines = newline_count(self.cursor.rest());
                self.cursor.advance_while(char::is_whitespace);
                if newlines >= 2 { BREAK } else { WHITESPACE }
            }
            c if is_letter(c) => {
                self.cursor.advance_while(is_letter);
                WORD
            }
            '0'..='9' => {
                self.number();
                NUMBER
            }
            '.' => self.fixed(1, PERIOD),
            '?' => self.fixed(1, QMARK),
            '!' => self.fixed(1, EPOINT),
            ',' => self.fixed(1, COMMA),
            ':' => self.fixed(1, COLON),
            ';' => self.fixed(1, SCOLON),
            _ => self.fixed(1, ETC),
        }
    }

    /// Consumes `chars` characters.
    fn fixed(&mut self, chars: usize, kind: TokenKind) -> TokenKind {
        for _ in 0..chars {
            self.cursor.advance();
        }
        kind
    }

    fn repeated(&mut self, c: char, kind: TokenKind) -> TokenKind {
        self.cursor.advance_while(|it| it == c);
        kind
    }

    /// A paragraph break extends to the last newline of the whitespace run
    /// and needs at least two of them.
    fn wikitext_whitespace(&mut self) -> TokenKind {
        let rest = self.cursor.rest();
        let run_len = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        let run = &rest[..run_len];

        let mut newlines = 0;
        let mut break_len = 0;
        let bytes = run.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' | b'\r' => {
                    i += newline_len(&bytes[i..]);
                    newlines += 1;
                    break_len = i;
                }
                _ => i += 1,
            }
        }

        if newlines >= 2 {
            self.cursor.advance_bytes(break_len);
            return BREAK;
        }

        match self.cursor.peek() {
            '\n' | '\r' => {
                let len = newline_len(run.as_bytes());
                self.cursor.advance_bytes(len);
            }
            _ => self.cursor.advance_while(|c| c.is_whitespace() && c != '\n' && c != '\r'),
        }
        WHITESPACE
    }

    fn angle(&mut self) -> TokenKind {
        let rest = self.cursor.rest();
        let (len, kind) = if let Some(found) = reference(rest) {
            found
        } else if let Some(len) = tag_len(rest) {
            (len, TAG)
        } else if rest.starts_with("<!--") {
            (4, COMMENT_START)
        } else {
            (1, ETC)
        };
        self.cursor.advance_bytes(len);
        kind
    }

    fn number(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit());
        while matches!(self.cursor.peek(), '.' | ',') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
    }

    fn word(&mut self) {
        self.cursor.advance_while(is_word_char);
        while matches!(self.cursor.peek(), '\'' | '’') {
            let next = self.cursor.second();
            if is_word_char(next) {
                self.cursor.advance();
                self.cursor.advance_while(is_word_char);
            } else {
                if next == EOF_CHAR || next.is_whitespace() {
                    self.cursor.advance();
                }
                break;
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Length of the newline sequence at the start of `bytes`: `\n`, `\r`, `\r\n` or `\n\r`.
fn newline_len(bytes: &[u8]) -> usize {
    match bytes {
        [b'\n', b'\r', ..] | [b'\r', b'\n', ..] => 2,
        [b'\n' | b'\r', ..] => 1,
        _ => 0,
    }
}

fn newline_count(text: &str) -> usize {
    let run_len = text.find(|c: char| !c.is_whitespace()).unwrap_or(text.len());
    let bytes = &text.as_bytes()[..run_len];

    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match newline_len(&bytes[i..]) {
            0 => i += 1,
            len => {
                count += 1;
                i += len;
            }
        }
    }
    count
}

fn url_len(text: &str) -> Option<usize> {
    let scheme_len = text.bytes().take_while(u8::is_ascii_lowercase).count();
    let (scheme, after) = text.split_at(scheme_len);

    let prefix = if PLAIN_PROTOCOLS.contains(&scheme) && after.starts_with(':') {
        scheme_len + 1
    } else if SLASHED_PROTOCOLS.contains(&scheme) && after.starts_with("://") {
        scheme_len + 3
    } else if text.starts_with("//") {
        2
    } else {
        return None;
    };

    let mut address = text[prefix..].chars();
    let first = address.next()?;
    if first.is_whitespace() || matches!(first, '/' | '$' | '.' | '?' | '#') {
        return None;
    }

    let tail: usize = address
        .take_while(|&c| !c.is_whitespace() && !matches!(c, '|' | '<' | '>' | '{' | '}'))
        .map(char::len_utf8)
        .sum();

    Some(prefix + first.len_utf8() + tail)
}

fn entity_len(text: &str) -> Option<usize> {
    let bytes = text.strip_prefix('&')?.as_bytes();
    if !bytes.first()?.is_ascii_lowercase() {
        return None;
    }
    let name_len = bytes.iter().take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit()).count();
    (bytes.get(name_len) == Some(&b';')).then_some(name_len + 2)
}

/// `<ref ...>`, `<ref .../>` and `</ref ...>`.
fn reference(text: &str) -> Option<(usize, TokenKind)> {
    let (prefix, closing) = if text.starts_with("</ref") {
        (5, true)
    } else if text.starts_with("<ref") {
        (4, false)
    } else {
        return None;
    };

    let body = &text[prefix..];
    if body.starts_with(is_word_char) {
        return None;
    }

    let close = body.find('>')?;
    let len = prefix + close + 1;
    let kind = if closing {
        REF_CLOSE
    } else if body[..close].ends_with('/') {
        REF_SINGLETON
    } else {
        REF_OPEN
    };
    Some((len, kind))
}

fn tag_len(text: &str) -> Option<usize> {
    let mut rest = text.strip_prefix('<')?;
    rest = rest.strip_prefix('/').unwrap_or(rest);

    let bytes = rest.as_bytes();
    if !bytes.first()?.is_ascii_lowercase() {
        return None;
    }
    let name_len = bytes.iter().take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit()).count();
    if rest[name_len..].starts_with(is_word_char) {
        return None;
    }

    let close = rest[name_len..].find('>')?;
    Some(text.len() - rest.len() + name_len + close + 1)
}

fn is_combined(c: char) -> bool {
    matches!(c,
        '\u{0901}'..='\u{0963}'
        | '\u{0601}'..='\u{061A}'
        | '\u{061C}'..='\u{0669}'
        | '\u{06D5}'..='\u{06EF}'
        | '\u{0980}'..='\u{09FF}')
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7AF}'
        | '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}'
        | '\u{A960}'..='\u{A97F}'
        | '\u{D7B0}'..='\u{D7FF}'
        | '\u{4E00}'..='\u{9FCC}'
        | '\u{3400}'..='\u{4DFF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{2F800}'..='\u{2FA1F}'
        | '\u{3041}'..='\u{3096}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{2E80}'..='\u{2FD5}'
        | '\u{FF5F}'..='\u{FF9F}'
        | '\u{31F0}'..='\u{31FF}'
        | '\u{3220}'..='\u{3243}'
        | '\u{3280}'..='\u{337F}')
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || is_combined(c)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combined(c)
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, lexicon: Lexicon) -> Vec<(TokenKind, String)> {
        Tokenizer::new(text, lexicon).map(|token| (token.kind, token.text.to_string())).collect()
    }

    fn texts(text: &str, lexicon: Lexicon) -> Vec<String> {
        Tokenizer::new(text, lexicon).map(|token| token.text.to_string()).collect()
    }

    #[test]
    fn test_wikitext_split() {
        let input = "As a sentence, this includes punctuation. \n\
                     \n\
                     ==Header!==\n\
                     And then we have another sentence here!\n\
                     https://website.gov?param=value\n\
                     mailto:email@email.mail";

        let expected = [
            "As", " ", "a", " ", "sentence", ",", " ", "this", " ", "includes", " ",
            "punctuation", ".", " \n\n", "==", "Header", "!", "==", "\n", "And", " ", "then",
            " ", "we", " ", "have", " ", "another", " ", "sentence", " ", "here", "!", "\n",
            "https://website.gov?param=value", "\n", "mailto:email@email.mail",
        ];

        assert_eq!(texts(input, Lexicon::Wikitext), expected);
    }

    #[test]
    fn test_text_split() {
        let input = "As a sentence, this includes punctuation. \n\
                     \n\
                     And then we have another sentence here!";

        let expected = [
            "As", " ", "a", " ", "sentence", ",", " ", "this", " ", "includes", " ",
            "punctuation", ".", " \n\n", "And", " ", "then", " ", "we", " ", "have", " ",
            "another", " ", "sentence", " ", "here", "!",
        ];

        assert_eq!(texts(input, Lexicon::Text), expected);
    }

    #[test]
    fn test_single_kinds() {
        let inputs = vec![
            ("word", WORD),
            ("don't", WORD),
            ("dogs'", WORD),
            ("_under_score", WORD),
            ("42", NUMBER),
            ("3.14", NUMBER),
            ("1,000,000", NUMBER),
            ("=", EQUALS),
            ("===", EQUALS),
            ("|", BAR),
            ("{|", TAB_OPEN),
            ("|}", TAB_CLOSE),
            ("&nbsp;", ENTITY),
            ("<ref name=\"a\">", REF_OPEN),
            ("</ref>", REF_CLOSE),
            ("<ref name=\"a\"/>", REF_SINGLETON),
            ("<div class=\"x\">", TAG),
            ("</span>", TAG),
            ("'''", BOLD),
            ("''", ITALIC),
            ("[[", DBRACK_OPEN),
            ("]]", DBRACK_CLOSE),
            ("[", BRACK_OPEN),
            ("]", BRACK_CLOSE),
            ("(", PAREN_OPEN),
            (")", PAREN_CLOSE),
            ("{{", DCURLY_OPEN),
            ("}}", DCURLY_CLOSE),
            ("{", CURLY_OPEN),
            ("}", CURLY_CLOSE),
            ("...", PERIOD),
            ("??", QMARK),
            ("!!!", EPOINT),
            (",", COMMA),
            ("::", COLON),
            (";", SCOLON),
            ("<!--", COMMENT_START),
            ("-->", COMMENT_END),
            ("।", DANDA),
            ("\u{3001}", JAPAN_PUNCT),
            ("日本語", CJK_WORD),
            ("http://example.com/path", URL),
            ("//example.com", URL),
            ("news:comp.lang", URL),
            (" \t", WHITESPACE),
            ("\n", WHITESPACE),
            ("\r\n", WHITESPACE),
            ("\n\n", BREAK),
            ("\n \n", BREAK),
            ("*", ETC),
            ("-", ETC),
        ];

        for (input, expected_kind) in inputs {
            let tokens = kinds(input, Lexicon::Wikitext);
            assert_eq!(tokens.len(), 1, "Input: '{}', tokens: {:?}", input, tokens);
            assert_eq!(tokens[0].0, expected_kind, "Input: '{}'", input);
        }
    }

    #[test]
    fn test_angle_fallbacks() {
        assert_eq!(
            kinds("<3 <reference>", Lexicon::Wikitext),
            vec![
                (ETC, "<".to_owned()),
                (NUMBER, "3".to_owned()),
                (WHITESPACE, " ".to_owned()),
                (TAG, "<reference>".to_owned()),
            ]
        );
        assert_eq!(
            kinds("<Div>", Lexicon::Wikitext),
            vec![
                (ETC, "<".to_owned()),
                (WORD, "Div".to_owned()),
                (ETC, ">".to_owned()),
            ]
        );
    }

    #[test]
    fn test_not_urls() {
        assert_eq!(texts("http:x", Lexicon::Wikitext), ["http", ":", "x"]);
        assert_eq!(texts("news: x", Lexicon::Wikitext), ["news", ":", " ", "x"]);
        assert_eq!(texts("a // b", Lexicon::Wikitext), ["a", " ", "/", "/", " ", "b"]);
    }

    #[test]
    fn test_break_keeps_trailing_indent_separate() {
        assert_eq!(
            kinds("a\n\n  b", Lexicon::Wikitext),
            vec![
                (WORD, "a".to_owned()),
                (BREAK, "\n\n".to_owned()),
                (WHITESPACE, "  ".to_owned()),
                (WORD, "b".to_owned()),
            ]
        );
    }

    #[test]
    fn test_number_does_not_swallow_sentence_end() {
        assert_eq!(texts("It cost 5. Then", Lexicon::Wikitext), [
            "It", " ", "cost", " ", "5", ".", " ", "Then"
        ]);
    }

    #[test]
    fn test_indices_and_ranges() {
        let text = "Héllo, wörld";
        let tokens: Vec<Token> = Tokenizer::new(text, Lexicon::Wikitext).collect();

        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index as usize, i);
            assert_eq!(&text[token.range], &*token.text);
        }
        assert_eq!(tokens.last().map(|token| token.range.end()), Some(TextSize::of(text)));
    }
}
