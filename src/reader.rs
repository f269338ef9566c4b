//! The reader: recursive-descent parsing of a token stream into [`Value`] data.
//!
//! Grammar (informal):
//! ```text
//! datum       := atom | list | vector | quote-sugar
//! list        := '(' datum* ('.' datum)? ')'
//! vector      := '#(' datum* ')'
//! quote-sugar := ''' datum | '`' datum | ',' datum | ',@' datum
//! ```

use crate::config::Config;
use crate::error::{LexError, ReadError, Span};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::Value;

/// Reads one datum at a time from source text.
pub struct Reader<'a> {
    tokens: Vec<Token>,
    pos: usize,
    config: Config,
    _source: &'a str,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, config: Config) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Reader { tokens, pos: 0, config, _source: source })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Reads the next datum, or `None` at end of input.
    pub fn read(&mut self) -> Result<Option<Value>, ReadError> {
        if self.at_eof() {
            return Ok(None);
        }
        self.read_datum().map(Some)
    }

    /// Reads every remaining datum in the stream.
    pub fn read_all(&mut self) -> Result<Vec<Value>, ReadError> {
        let mut out = Vec::new();
        while let Some(v) = self.read()? {
            out.push(v);
        }
        Ok(out)
    }

    fn read_datum(&mut self) -> Result<Value, ReadError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::LeftParen => self.read_list(tok.span),
            TokenKind::VecOpen => self.read_vector(tok.span),
            TokenKind::Quote => Ok(Value::list(vec![Value::symbol("quote"), self.read_datum()?])),
            TokenKind::Quasiquote => Ok(Value::list(vec![Value::symbol("quasiquote"), self.read_datum()?])),
            TokenKind::Unquote => Ok(Value::list(vec![Value::symbol("unquote"), self.read_datum()?])),
            TokenKind::UnquoteSplicing => {
                Ok(Value::list(vec![Value::symbol("unquote-splicing"), self.read_datum()?]))
            }
            TokenKind::Boolean => Ok(Value::Boolean(matches!(tok.lexeme.as_str(), "#t" | "#true"))),
            TokenKind::Character => parse_char(&tok),
            TokenKind::String => Ok(Value::string(tok.lexeme)),
            TokenKind::Number => parse_number(&tok),
            TokenKind::Symbol => Ok(Value::symbol(&tok.lexeme)),
            TokenKind::RightParen => Err(ReadError::UnexpectedToken {
                expected: "a datum".into(),
                found: "')'".into(),
                span: tok.span,
            }),
            TokenKind::Dot => {
                Err(ReadError::UnexpectedToken { expected: "a datum".into(), found: "'.'".into(), span: tok.span })
            }
            TokenKind::Eof => Err(ReadError::UnexpectedEof { context: "a datum".into(), span: tok.span }),
        }
    }

    fn read_list(&mut self, open_span: Span) -> Result<Value, ReadError> {
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RightParen => {
                    self.advance();
                    return Ok(Value::list(items));
                }
                TokenKind::Dot => {
                    if !self.config.dotted {
                        return Err(ReadError::DottedPairDisabled { span: self.peek().span });
                    }
                    self.advance();
                    let tail = self.read_datum()?;
                    match self.advance().kind {
                        TokenKind::RightParen => return Ok(Value::improper_list(items, tail)),
                        _ => return Err(ReadError::IllFormedDottedList { span: open_span }),
                    }
                }
                TokenKind::Eof => return Err(ReadError::UnexpectedEof { context: "a list".into(), span: open_span }),
                _ => items.push(self.read_datum()?),
            }
        }
    }

    fn read_vector(&mut self, open_span: Span) -> Result<Value, ReadError> {
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RightParen => {
                    self.advance();
                    return Ok(Value::Vector(std::rc::Rc::new(std::cell::RefCell::new(items))));
                }
                TokenKind::Eof => return Err(ReadError::UnexpectedEof { context: "a vector".into(), span: open_span }),
                _ => items.push(self.read_datum()?),
            }
        }
    }
}

fn parse_number(tok: &Token) -> Result<Value, ReadError> {
    if let Ok(i) = tok.lexeme.parse::<i64>() {
        return Ok(Value::int(i));
    }
    if let Ok(f) = tok.lexeme.parse::<f64>() {
        return Ok(Value::float(f));
    }
    Err(ReadError::Lex(LexError::MalformedNumber { text: tok.lexeme.clone(), span: tok.span }))
}

fn parse_char(tok: &Token) -> Result<Value, ReadError> {
    let name = tok.lexeme.as_str();
    let ch = match name.to_ascii_lowercase().as_str() {
        "space" => ' ',
        "newline" => '\n',
        "tab" => '\t',
        "nul" | "null" => '\0',
        _ if name.chars().count() == 1 => name.chars().next().unwrap(),
        _ => {
            return Err(ReadError::Lex(LexError::InvalidCharLiteral { text: name.to_string(), span: tok.span }))
        }
    };
    Ok(Value::character(ch))
}

/// Reads every datum in `source` with the given configuration.
pub fn read_all(source: &str, config: Config) -> Result<Vec<Value>, ReadError> {
    Reader::new(source, config)?.read_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_value;

    fn read_one(src: &str) -> Value {
        Reader::new(src, Config::default()).unwrap().read().unwrap().unwrap()
    }

    #[test]
    fn reads_self_evaluating_atoms() {
        assert!(matches!(read_one("42"), Value::Number(_)));
        assert!(matches!(read_one("#t"), Value::Boolean(true)));
        assert!(matches!(read_one("\"hi\""), Value::Str(_)));
    }

    #[test]
    fn reads_nested_list() {
        let v = read_one("(+ 1 (* 2 3))");
        assert_eq!(print_value(&v), "(+ 1 (* 2 3))");
    }

    #[test]
    fn reads_dotted_pair() {
        let v = read_one("(a . b)");
        assert_eq!(print_value(&v), "(a . b)");
    }

    #[test]
    fn rejects_dotted_pair_when_disabled() {
        let cfg = Config { dotted: false, ..Config::default() };
        let err = Reader::new("(a . b)", cfg).unwrap().read().unwrap_err();
        assert!(matches!(err, ReadError::DottedPairDisabled { .. }));
    }

    #[test]
    fn reads_quote_sugar() {
        assert_eq!(print_value(&read_one("'a")), "(quote a)");
        assert_eq!(print_value(&read_one("`(a ,b ,@c)")), "(quasiquote (a (unquote b) (unquote-splicing c)))");
    }

    #[test]
    fn reads_vector_literal() {
        let v = read_one("#(1 2 3)");
        match v {
            Value::Vector(cells) => assert_eq!(cells.borrow().len(), 3),
            _ => panic!("expected vector"),
        }
    }
}
