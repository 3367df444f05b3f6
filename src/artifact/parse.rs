//! Hand-written scanner for the implementors artifact grammar.
//!
//! The grammar is tiny and fixed, so this parses it directly instead of
//! pulling in a JavaScript engine: a prelude declaring an empty object, one
//! assignment per crate, the registration stub, and the closing `})()`.
//! Whitespace between tokens is ignored; string literals are JSON strings.

use crate::types::{CrateName, Implementor, ImplementorTable};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Expected `{expected}` at byte {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },
    #[error("Invalid string literal at byte {offset}: {message}")]
    InvalidString { offset: usize, message: String },
    #[error("Duplicate field `{field}` at byte {offset}")]
    DuplicateField {
        field: &'static str,
        offset: usize,
    },
    #[error("Record at byte {offset} is missing the `{field}` field")]
    MissingField {
        field: &'static str,
        offset: usize,
    },
    #[error("Unknown field `{field}` at byte {offset}")]
    UnknownField { field: String, offset: usize },
    #[error("Malformed registration stub at byte {offset}")]
    MalformedStub { offset: usize },
    #[error("Trailing content at byte {offset}")]
    TrailingContent { offset: usize },
}

/// Parse one artifact into an implementor table.
///
/// Tolerates arbitrary whitespace between tokens, record fields in any
/// order, and trailing commas in record and type lists. A crate assigned
/// twice keeps the later assignment, matching how the script would evaluate.
pub fn parse(input: &str) -> Result<ImplementorTable, ParseError> {
    let mut scanner = Scanner::new(input);

    scanner.eat("(")?;
    scanner.eat_keyword("function")?;
    scanner.eat("(")?;
    scanner.eat(")")?;
    scanner.eat("{")?;
    scanner.eat_keyword("var")?;
    scanner.eat_keyword("implementors")?;
    scanner.eat("=")?;
    scanner.eat("{")?;
    scanner.eat("}")?;
    scanner.eat(";")?;

    let mut table = ImplementorTable::new();
    while scanner.peek_keyword("implementors") {
        assignment(&mut scanner, &mut table)?;
    }

    stub(&mut scanner)?;

    scanner.eat("}")?;
    scanner.eat(")")?;
    scanner.eat("(")?;
    scanner.eat(")")?;

    scanner.skip_ws();
    if !scanner.at_end() {
        return Err(ParseError::TrailingContent {
            offset: scanner.pos,
        });
    }
    Ok(table)
}

fn assignment(scanner: &mut Scanner, table: &mut ImplementorTable) -> Result<(), ParseError> {
    scanner.eat_keyword("implementors")?;
    scanner.eat("[")?;
    let name = CrateName::new(scanner.string_literal()?);
    scanner.eat("]")?;
    scanner.eat("=")?;
    let records = record_array(scanner)?;
    scanner.eat(";")?;

    if table.set_crate(name.clone(), records).is_some() {
        warn!("Crate '{}' assigned twice; keeping the later section", name);
    }
    Ok(())
}

fn record_array(scanner: &mut Scanner) -> Result<Vec<Implementor>, ParseError> {
    scanner.eat("[")?;
    let mut records = Vec::new();
    loop {
        if scanner.try_eat("]") {
            break;
        }
        records.push(record(scanner)?);
        if !scanner.try_eat(",") {
            scanner.eat("]")?;
            break;
        }
    }
    Ok(records)
}

fn record(scanner: &mut Scanner) -> Result<Implementor, ParseError> {
    scanner.skip_ws();
    let start = scanner.pos;
    scanner.eat("{")?;

    let mut text = None;
    let mut synthetic = None;
    let mut types = None;
    loop {
        if scanner.try_eat("}") {
            break;
        }
        scanner.skip_ws();
        let offset = scanner.pos;
        let Some(field) = scanner.identifier() else {
            return Err(ParseError::Expected {
                expected: "field name",
                offset,
            });
        };
        scanner.eat(":")?;
        match field {
            "text" => {
                if text.is_some() {
                    return Err(ParseError::DuplicateField {
                        field: "text",
                        offset,
                    });
                }
                text = Some(scanner.string_literal()?);
            }
            "synthetic" => {
                if synthetic.is_some() {
                    return Err(ParseError::DuplicateField {
                        field: "synthetic",
                        offset,
                    });
                }
                synthetic = Some(scanner.bool_literal()?);
            }
            "types" => {
                if types.is_some() {
                    return Err(ParseError::DuplicateField {
                        field: "types",
                        offset,
                    });
                }
                types = Some(string_array(scanner)?);
            }
            other => {
                return Err(ParseError::UnknownField {
                    field: other.to_string(),
                    offset,
                });
            }
        }
        if !scanner.try_eat(",") {
            scanner.eat("}")?;
            break;
        }
    }

    let missing = |field| ParseError::MissingField {
        field,
        offset: start,
    };
    Ok(Implementor::new(
        text.ok_or_else(|| missing("text"))?,
        synthetic.ok_or_else(|| missing("synthetic"))?,
        types.ok_or_else(|| missing("types"))?,
    ))
}

fn string_array(scanner: &mut Scanner) -> Result<Vec<String>, ParseError> {
    scanner.eat("[")?;
    let mut items = Vec::new();
    loop {
        if scanner.try_eat("]") {
            break;
        }
        items.push(scanner.string_literal()?);
        if !scanner.try_eat(",") {
            scanner.eat("]")?;
            break;
        }
    }
    Ok(items)
}

/// The registration stub, compared token by token. Any mismatch reports
/// [`ParseError::MalformedStub`] at the offending byte.
fn stub(scanner: &mut Scanner) -> Result<(), ParseError> {
    let result: Result<(), ParseError> = (|| {
        scanner.eat_keyword("if")?;
        scanner.eat("(")?;
        scanner.eat_keyword("window")?;
        scanner.eat(".")?;
        scanner.eat_keyword("register_implementors")?;
        scanner.eat(")")?;
        scanner.eat("{")?;
        scanner.eat_keyword("window")?;
        scanner.eat(".")?;
        scanner.eat_keyword("register_implementors")?;
        scanner.eat("(")?;
        scanner.eat_keyword("implementors")?;
        scanner.eat(")")?;
        scanner.eat(";")?;
        scanner.eat("}")?;
        scanner.eat_keyword("else")?;
        scanner.eat("{")?;
        scanner.eat_keyword("window")?;
        scanner.eat(".")?;
        scanner.eat_keyword("pending_implementors")?;
        scanner.eat("=")?;
        scanner.eat_keyword("implementors")?;
        scanner.eat(";")?;
        scanner.eat("}")?;
        Ok(())
    })();

    result.map_err(|error| match error {
        ParseError::Expected { offset, .. } => ParseError::MalformedStub { offset },
        other => other,
    })
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume a literal token, or report what was expected instead.
    fn eat(&mut self, token: &'static str) -> Result<(), ParseError> {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: token,
                offset: self.pos,
            })
        }
    }

    fn try_eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Consume an identifier run, or `None` if the next character starts none.
    fn identifier(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        if end == 0 {
            None
        } else {
            self.pos += end;
            Some(&rest[..end])
        }
    }

    /// Consume `keyword` as a whole identifier. `vars` does not match `var`.
    fn eat_keyword(&mut self, keyword: &'static str) -> Result<(), ParseError> {
        self.skip_ws();
        let offset = self.pos;
        match self.identifier() {
            Some(ident) if ident == keyword => Ok(()),
            _ => {
                self.pos = offset;
                Err(ParseError::Expected {
                    expected: keyword,
                    offset,
                })
            }
        }
    }

    fn peek_keyword(&mut self, keyword: &str) -> bool {
        self.skip_ws();
        let offset = self.pos;
        let matched = matches!(self.identifier(), Some(ident) if ident == keyword);
        self.pos = offset;
        matched
    }

    fn bool_literal(&mut self) -> Result<bool, ParseError> {
        self.skip_ws();
        let offset = self.pos;
        match self.identifier() {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            _ => {
                self.pos = offset;
                Err(ParseError::Expected {
                    expected: "true or false",
                    offset,
                })
            }
        }
    }

    /// Extract a double-quoted span and decode it as a JSON string.
    fn string_literal(&mut self) -> Result<String, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.input.as_bytes();
        if bytes.get(start) != Some(&b'"') {
            return Err(ParseError::Expected {
                expected: "\"",
                offset: start,
            });
        }

        // Quote and backslash are ASCII, so scanning bytes cannot split a
        // UTF-8 sequence.
        let mut i = start + 1;
        let end = loop {
            match bytes.get(i) {
                None => {
                    return Err(ParseError::InvalidString {
                        offset: start,
                        message: "unterminated string literal".to_string(),
                    });
                }
                Some(b'\\') => i += 2,
                Some(b'"') => break i,
                Some(_) => i += 1,
            }
        };

        let span = &self.input[start..=end];
        let decoded: String = serde_json::from_str(span).map_err(|error| {
            ParseError::InvalidString {
                offset: start,
                message: error.to_string(),
            }
        })?;
        self.pos = end + 1;
        Ok(decoded)
    }
}
