//! Lexical analysis: source text to tokens.
//!
//! The lexer handles parentheses, vector-literal and quote-family sugar, the
//! dotted-pair marker, and the four quoted literal families (booleans,
//! characters, strings, numbers) plus bare symbols.
//!
//! # Example
//!
//! ```
//! use schemecore::lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("(+ 1 2)");
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::LeftParen);
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Symbol);
//! ```

use crate::error::{LexError, Span};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters that terminate a symbol or number and can never appear inside one
/// unescaped. Mirrors the reader's delimiter set.
pub const SPECIALS: &str = "()[]'`,\"; \t\r\n";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    LeftParen,
    RightParen,
    /// `#(` introducing a vector literal
    VecOpen,
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    /// The `.` dotted-pair marker, only when surrounded by delimiters
    Dot,
    Boolean,
    Character,
    String,
    Number,
    Symbol,
    Eof,
}

/// A hand-rolled, character-at-a-time tokenizer over borrowed source text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    peeked: Option<(usize, char)>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let peeked = chars.next();
        Lexer { source, chars, peeked, line: 1, column: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.peeked.map(|(_, c)| c)
    }

    fn peek_offset(&self) -> usize {
        self.peeked.map(|(i, _)| i).unwrap_or(self.source.len())
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.peeked?;
        self.peeked = self.chars.next();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn here(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.peek_offset(), start_line, start_col)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Produces the next token, or `TokenKind::Eof` once the source is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        let (start, start_line, start_col) = (self.peek_offset(), self.line, self.column);
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", self.here(start, start_line, start_col)));
        };
        match c {
            '(' => {
                self.advance();
                Ok(Token::new(TokenKind::LeftParen, c.to_string(), self.here(start, start_line, start_col)))
            }
            ')' => {
                self.advance();
                Ok(Token::new(TokenKind::RightParen, c.to_string(), self.here(start, start_line, start_col)))
            }
            '[' => self.read_escaped_symbol(start, start_line, start_col),
            '\'' => {
                self.advance();
                Ok(Token::new(TokenKind::Quote, "'", self.here(start, start_line, start_col)))
            }
            '`' => {
                self.advance();
                Ok(Token::new(TokenKind::Quasiquote, "`", self.here(start, start_line, start_col)))
            }
            ',' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::new(TokenKind::UnquoteSplicing, ",@", self.here(start, start_line, start_col)))
                } else {
                    Ok(Token::new(TokenKind::Unquote, ",", self.here(start, start_line, start_col)))
                }
            }
            '"' => self.read_string(start, start_line, start_col),
            '#' => self.read_hash(start, start_line, start_col),
            '.' if self.is_lone_dot() => {
                self.advance();
                Ok(Token::new(TokenKind::Dot, ".", self.here(start, start_line, start_col)))
            }
            _ => self.read_atom(start, start_line, start_col),
        }
    }

    /// A `.` is the dotted-pair marker only when it stands alone as a token
    /// (followed by a delimiter or end of input); otherwise it begins a symbol or
    /// number like `...` or `1.5`.
    fn is_lone_dot(&self) -> bool {
        let mut lookahead = self.chars.clone();
        match lookahead.next() {
            None => true,
            Some((_, c)) => SPECIALS.contains(c),
        }
    }

    fn read_string(&mut self, start: usize, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString { span: self.here(start, start_line, start_col) }),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(LexError::InvalidEscape { ch: other, span: self.here(start, start_line, start_col) })
                    }
                    None => return Err(LexError::UnterminatedString { span: self.here(start, start_line, start_col) }),
                },
                Some(c) => text.push(c),
            }
        }
        Ok(Token::new(TokenKind::String, text, self.here(start, start_line, start_col)))
    }

    /// Reads a `printer::print_symbol`-style bracket-escaped symbol: raw text up
    /// to the matching `]`, with `\` escaping `\`, `[`, `]` inside.
    fn read_escaped_symbol(&mut self, start: usize, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedSymbol { span: self.here(start, start_line, start_col) }),
                Some(']') => break,
                Some('\\') => match self.advance() {
                    Some(c @ ('\\' | '[' | ']')) => text.push(c),
                    Some(other) => {
                        return Err(LexError::InvalidEscape { ch: other, span: self.here(start, start_line, start_col) })
                    }
                    None => return Err(LexError::UnterminatedSymbol { span: self.here(start, start_line, start_col) }),
                },
                Some(c) => text.push(c),
            }
        }
        Ok(Token::new(TokenKind::Symbol, text, self.here(start, start_line, start_col)))
    }

    fn read_hash(&mut self, start: usize, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        self.advance();
        match self.peek() {
            Some('(') => {
                self.advance();
                Ok(Token::new(TokenKind::VecOpen, "#(", self.here(start, start_line, start_col)))
            }
            Some('t') | Some('f') => {
                let b = self.advance().unwrap();
                // allow `#true`/`#false` spellings by consuming the remaining
                // letters of an identifier-shaped tail
                let mut lexeme = format!("#{b}");
                while let Some(c) = self.peek() {
                    if c.is_alphabetic() {
                        lexeme.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(Token::new(TokenKind::Boolean, lexeme, self.here(start, start_line, start_col)))
            }
            Some('\\') => self.read_char(start, start_line, start_col),
            Some(other) => Err(LexError::UnexpectedChar { ch: other, span: self.here(start, start_line, start_col) }),
            None => Err(LexError::UnexpectedChar { ch: '#', span: self.here(start, start_line, start_col) }),
        }
    }

    fn read_char(&mut self, start: usize, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        self.advance();
        let mut text = String::new();
        match self.advance() {
            Some(c) => text.push(c),
            None => return Err(LexError::UnterminatedChar { span: self.here(start, start_line, start_col) }),
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Ok(Token::new(TokenKind::Character, text, self.here(start, start_line, start_col)))
    }

    fn read_atom(&mut self, start: usize, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if SPECIALS.contains(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
        let span = self.here(start, start_line, start_col);
        if text.is_empty() {
            let bad = self.peek().unwrap_or(' ');
            return Err(LexError::UnexpectedChar { ch: bad, span });
        }
        let kind = if is_number(&text) { TokenKind::Number } else { TokenKind::Symbol };
        Ok(Token::new(kind, text, span))
    }

    /// Tokenizes the remaining source eagerly, for callers (the reader, tests)
    /// that want the whole stream up front rather than pulling one token at a time.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            out.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(out)
    }

    pub fn source(&self) -> &'a str {
        self.source
    }
}

/// Whether `text` parses as a Scheme number (optionally signed integer or
/// decimal). Used both by the lexer to classify atoms and by `string->number`'s
/// sibling `string->symbol` escaping rule.
pub fn is_number(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    let start = if bytes[0] == b'+' || bytes[0] == b'-' { 1 } else { 0 };
    if start == text.len() {
        return false;
    }
    let rest = &text[start..];
    rest.parse::<i64>().is_ok() || rest.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_a_simple_combination() {
        assert_eq!(
            kinds("(+ 1 2)"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Symbol,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_quote_family() {
        assert_eq!(
            kinds("'a `a ,a ,@a"),
            vec![
                TokenKind::Quote,
                TokenKind::Symbol,
                TokenKind::Quasiquote,
                TokenKind::Symbol,
                TokenKind::Unquote,
                TokenKind::Symbol,
                TokenKind::UnquoteSplicing,
                TokenKind::Symbol,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dot_is_its_own_token_only_when_standalone() {
        assert_eq!(kinds("(a . b)")[2], TokenKind::Dot);
        assert_eq!(kinds("1.5")[0], TokenKind::Number);
        assert_eq!(kinds("...")[0], TokenKind::Symbol);
    }

    #[test]
    fn vector_open_and_char_and_bool_literals() {
        assert_eq!(kinds("#(1 2)")[0], TokenKind::VecOpen);
        assert_eq!(kinds("#\\a")[0], TokenKind::Character);
        assert_eq!(kinds("#t #f")[0], TokenKind::Boolean);
    }

    #[test]
    fn string_with_escapes() {
        let toks = Lexer::new(r#""a\nb""#).tokenize().unwrap();
        assert_eq!(toks[0].lexeme, "a\nb");
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new("\"abc").tokenize().is_err());
    }

    #[test]
    fn line_comment_is_skipped() {
        assert_eq!(kinds("; comment\n42"), vec![TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn bracket_escaped_symbol_is_a_single_symbol_token() {
        let toks = Lexer::new(r"[has space]").tokenize().unwrap();
        assert_eq!(toks[0].kind, TokenKind::Symbol);
        assert_eq!(toks[0].lexeme, "has space");
        assert_eq!(toks[1].kind, TokenKind::Eof);
    }

    #[test]
    fn bracket_escaped_symbol_honors_backslash_escapes() {
        let toks = Lexer::new(r"[a\[b\]c\\d]").tokenize().unwrap();
        assert_eq!(toks[0].lexeme, r"a[b]c\d");
    }

    #[test]
    fn unterminated_bracket_escaped_symbol_is_an_error() {
        assert!(Lexer::new("[abc").tokenize().is_err());
    }
}
