//! Converts [`Value`]s back to source text. `print_value` is `write`-style
//! (strings quoted, characters as `#\x`); `display_value` is `display`-style
//! (strings and characters printed raw).

use crate::lexer::{is_number, SPECIALS};
use crate::value::Value;

fn fmt_list(p: &crate::value::PairRef, display: bool, out: &mut String) {
    out.push('(');
    let mut first = true;
    let mut cur = Value::Pair(p.clone());
    loop {
        match cur {
            Value::Pair(p) => {
                if !first {
                    out.push(' ');
                }
                first = false;
                let cell = p.borrow();
                out.push_str(&render(&cell.car, display));
                cur = cell.cdr.clone();
            }
            Value::Nil => break,
            other => {
                out.push_str(" . ");
                out.push_str(&render(&other, display));
                break;
            }
        }
    }
    out.push(')');
}

fn render(v: &Value, display: bool) -> String {
    match v {
        Value::Nil => "()".to_string(),
        Value::Undefined => "".to_string(),
        Value::Boolean(true) => "#t".to_string(),
        Value::Boolean(false) => "#f".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Character(c) => {
            if display {
                c.to_string()
            } else {
                format!("#\\{}", char_name(**c))
            }
        }
        Value::Str(s) => {
            if display {
                s.borrow().clone()
            } else {
                format!("\"{}\"", escape_string(&s.borrow()))
            }
        }
        Value::Symbol(s) => print_symbol(s.as_str()),
        Value::Pair(p) => {
            let mut out = String::new();
            fmt_list(p, display, &mut out);
            out
        }
        Value::Vector(items) => {
            let items = items.borrow();
            let body: Vec<String> = items.iter().map(|v| render(v, display)).collect();
            format!("#({})", body.join(" "))
        }
        Value::Promise(_) => "#[promise]".to_string(),
        Value::Callable(c) => format!("#[{}]", describe_callable(c)),
    }
}

fn describe_callable(c: &crate::value::Callable) -> String {
    use crate::value::{Callable, ProcKind};
    match c {
        Callable::BuiltIn(b) => format!("compiled-procedure {}", b.name),
        Callable::SingleOperand(s) => format!("compiled-procedure {}", s.name),
        Callable::Procedure(p) => {
            let kind = match p.kind {
                ProcKind::Lambda => "compound-procedure",
                ProcKind::Mu => "mu-procedure",
                ProcKind::Macro => "macro",
            };
            let name = p.name.borrow();
            if name.is_empty() {
                kind.to_string()
            } else {
                format!("{kind} {name}")
            }
        }
    }
}

fn char_name(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        '\n' => "newline".to_string(),
        '\t' => "tab".to_string(),
        '\0' => "null".to_string(),
        c => c.to_string(),
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Bracket-escapes a symbol's text when re-lexing it would not round-trip to the
/// same token: when it would be read as a number, equals a reserved literal name,
/// looks like a character literal, or contains a lexer delimiter character.
pub fn print_symbol(text: &str) -> String {
    let needs_escape = text.is_empty()
        || is_number(text)
        || matches!(text.to_ascii_lowercase().as_str(), "nil" | "#f" | "#t")
        || text.starts_with("#\\")
        || text.chars().any(|c| SPECIALS.contains(c));
    if !needs_escape {
        return text.to_string();
    }
    let mut escaped = String::new();
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("[{escaped}]")
}

/// `write`-style rendering: machine-readable, strings quoted and escaped.
pub fn print_value(v: &Value) -> String {
    render(v, false)
}

/// `display`-style rendering: human-readable, strings and characters raw.
pub fn display_value(v: &Value) -> String {
    render(v, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::reader::Reader;

    fn roundtrip(src: &str) -> String {
        let v = Reader::new(src, Config::default()).unwrap().read().unwrap().unwrap();
        print_value(&v)
    }

    #[test]
    fn prints_list_and_dotted_pair() {
        assert_eq!(roundtrip("(1 2 3)"), "(1 2 3)");
        assert_eq!(roundtrip("(1 . 2)"), "(1 . 2)");
    }

    #[test]
    fn prints_strings_and_chars_write_style() {
        assert_eq!(print_value(&Value::string("hi")), "\"hi\"");
        assert_eq!(print_value(&Value::character(' ')), "#\\space");
        assert_eq!(display_value(&Value::character('a')), "a");
    }

    #[test]
    fn escapes_symbols_that_would_not_round_trip() {
        assert_eq!(print_symbol("foo"), "foo");
        assert_eq!(print_symbol("42"), "[42]");
        assert_eq!(print_symbol("has space"), "[has\\ space]");
    }
}
