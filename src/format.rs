//! The structural formatter behind `scheme fmt`: reads a source file as data
//! and prints it back out in canonical form, the same "reformat by re-printing
//! the parsed datum" strategy as the original editor's `--reformat`/`--check`
//! flags (`examples/original_source/editor/__main__.py`).

use crate::config::Config;
use crate::error::ReadError;
use crate::printer::print_value;
use crate::reader::read_all;

/// Reformats `source`, one blank line between top-level datums.
pub fn reformat(source: &str, config: Config) -> Result<String, ReadError> {
    let data = read_all(source, config)?;
    let mut out = data.iter().map(print_value).collect::<Vec<_>>().join("\n\n");
    out.push('\n');
    Ok(out)
}

/// Checks whether `source` is already in canonical form, without writing
/// anything back. Used by `scheme fmt --check`.
pub fn is_formatted(source: &str, config: Config) -> Result<bool, ReadError> {
    Ok(reformat(source, config)?.trim_end() == source.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reformat_normalizes_whitespace() {
        let out = reformat("(+   1    2)", Config::default()).unwrap();
        assert_eq!(out, "(+ 1 2)\n");
    }

    #[test]
    fn is_formatted_detects_drift() {
        assert!(!is_formatted("(+   1 2)", Config::default()).unwrap());
        assert!(is_formatted("(+ 1 2)", Config::default()).unwrap());
    }

    #[test]
    fn multiple_top_level_datums_get_blank_line_separation() {
        let out = reformat("(define x 1) (define y 2)", Config::default()).unwrap();
        assert_eq!(out, "(define x 1)\n\n(define y 2)\n");
    }
}
