// Dweve Frost - Nix Flake Documentation Extractor
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String, path and number literals.

use super::expr::is_path_char;
use super::{is_ident_start, Parser};
use crate::ast::{Node, NodeKind, StringPart};
use crate::error::{ParseError, ParseResult};

/// Accumulates string parts, merging adjacent literal text.
#[derive(Default)]
struct PartsBuilder {
    parts: Vec<StringPart>,
    text: String,
}

impl PartsBuilder {
    fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    fn push_interp(&mut self, node: Node) {
        self.flush();
        self.parts.push(StringPart::Interp(node));
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.parts.push(StringPart::Literal(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<StringPart> {
        self.flush();
        self.parts
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

impl Parser {
    /// `${ expr }`, with the cursor on the `$`.
    pub(super) fn parse_interpolation(&mut self) -> ParseResult<Node> {
        let start = self.here();
        self.bump_n(2);
        let inner = self.parse_expr()?;
        self.expect_char('}')?;
        Ok(Node::new(
            NodeKind::Interp(Box::new(inner)),
            self.span_from(start),
        ))
    }

    pub(super) fn parse_string(&mut self) -> ParseResult<Node> {
        let start = self.here();
        self.bump();
        let mut builder = PartsBuilder::default();

        loop {
            match self.peek() {
                None => return Err(ParseError::unterminated_string(start)),
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.bump() {
                        Some(c) => builder.push_char(unescape(c)),
                        None => return Err(ParseError::unterminated_string(start)),
                    }
                }
                Some('$') if self.at("$${") => {
                    self.bump_n(3);
                    builder.push_str("$${");
                }
                Some('$') if self.at("${") => {
                    let interp = self.parse_interpolation()?;
                    builder.push_interp(interp);
                }
                Some(c) => {
                    self.bump();
                    builder.push_char(c);
                }
            }
        }

        Ok(Node::new(
            NodeKind::String(builder.finish()),
            self.span_from(start),
        ))
    }

    /// `'' ... ''`. Indentation is kept as written.
    pub(super) fn parse_indented_string(&mut self) -> ParseResult<Node> {
        let start = self.here();
        self.bump_n(2);
        let mut builder = PartsBuilder::default();

        loop {
            if self.is_eof() {
                return Err(ParseError::unterminated_string(start));
            }
            if self.at("'''") {
                self.bump_n(3);
                builder.push_str("''");
            } else if self.at("''$") {
                self.bump_n(3);
                builder.push_char('$');
            } else if self.at("''\\") {
                self.bump_n(3);
                match self.bump() {
                    Some(c) => builder.push_char(unescape(c)),
                    None => return Err(ParseError::unterminated_string(start)),
                }
            } else if self.at("''") {
                self.bump_n(2);
                break;
            } else if self.at("$${") {
                self.bump_n(3);
                builder.push_str("$${");
            } else if self.at("${") {
                let interp = self.parse_interpolation()?;
                builder.push_interp(interp);
            } else if let Some(c) = self.bump() {
                builder.push_char(c);
            }
        }

        Ok(Node::new(
            NodeKind::String(builder.finish()),
            self.span_from(start),
        ))
    }

    /// Path literal. Interpolated paths (`./${name}.nix`) become strings.
    pub(super) fn parse_path(&mut self) -> ParseResult<Node> {
        let start = self.here();

        if self.peek() == Some('<') {
            let mut text = String::new();
            while let Some(c) = self.bump() {
                text.push(c);
                if c == '>' {
                    break;
                }
            }
            return Ok(Node::new(NodeKind::Path(text), self.span_from(start)));
        }

        let mut builder = PartsBuilder::default();
        let mut interpolated = false;
        if self.peek() == Some('~') {
            self.bump();
            builder.push_char('~');
        }
        loop {
            match self.peek() {
                Some(c) if is_path_char(c) || c == '/' => {
                    self.bump();
                    builder.push_char(c);
                }
                Some('$') if self.at("${") => {
                    interpolated = true;
                    let interp = self.parse_interpolation()?;
                    builder.push_interp(interp);
                }
                _ => break,
            }
        }

        let kind = if interpolated {
            NodeKind::String(builder.finish())
        } else {
            NodeKind::Path(builder.text)
        };
        Ok(Node::new(kind, self.span_from(start)))
    }

    pub(super) fn parse_number(&mut self) -> ParseResult<Node> {
        let start = self.here();
        let mut text = String::new();
        let mut is_float = false;

        self.take_digits(&mut text);
        if self.at_fraction(&text) {
            is_float = true;
            self.bump();
            text.push('.');
            self.take_digits(&mut text);

            if self.exponent_at(0) {
                if let Some(e) = self.bump() {
                    text.push(e);
                }
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    self.bump();
                    text.push(sign);
                }
                self.take_digits(&mut text);
            }
        }

        let kind = if is_float {
            text.parse::<f64>()
                .map(NodeKind::Float)
                .map_err(|_| ParseError::invalid_number(&text, start))?
        } else {
            text.parse::<i64>()
                .map(NodeKind::Int)
                .map_err(|_| ParseError::invalid_number(&text, start))?
        };
        Ok(Node::new(kind, self.span_from(start)))
    }

    /// Whether a `.` at the cursor continues `integer` as a float.
    ///
    /// `1.5`, `1.` and `1.e3` are floats; in `1.x` the dot is left for the
    /// caller. Only integers without a leading zero take a bare dot.
    fn at_fraction(&self, integer: &str) -> bool {
        if self.peek() != Some('.') {
            return false;
        }
        match self.peek_at(1) {
            Some(c) if c.is_ascii_digit() => true,
            _ if integer.starts_with('0') => false,
            _ if self.exponent_at(1) => true,
            Some(c) => !(is_ident_start(c) || matches!(c, '.' | '/')),
            None => true,
        }
    }

    /// Whether an exponent such as `e5` or `E-2` starts `offset` characters
    /// after the cursor.
    fn exponent_at(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset), Some('e' | 'E'))
            && match self.peek_at(offset + 1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self
                    .peek_at(offset + 2)
                    .is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.bump();
            text.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Node, NodeKind, StringPart};
    use crate::error::ParseErrorKind;
    use crate::parser::parse;

    fn expr(source: &str) -> Node {
        let root = parse(source).unwrap();
        let NodeKind::Root(wrapper) = root.kind else {
            panic!("expected Root");
        };
        let NodeKind::Expr(inner) = wrapper.kind else {
            panic!("expected Expr");
        };
        *inner
    }

    fn literal(s: &str) -> StringPart {
        StringPart::Literal(s.to_string())
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(expr(r#""hello""#).kind, NodeKind::String(vec![literal("hello")]));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(expr(r#""""#).kind, NodeKind::String(Vec::new()));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            expr(r#""a\n\"b\"\${c}""#).kind,
            NodeKind::String(vec![literal("a\n\"b\"${c}")])
        );
    }

    #[test]
    fn test_string_interpolation() {
        let NodeKind::String(parts) = expr(r#""lib-${version}.tar""#).kind else {
            panic!("expected String");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], literal("lib-"));
        let StringPart::Interp(interp) = &parts[1] else {
            panic!("expected interpolation");
        };
        assert!(matches!(interp.kind, NodeKind::Interp(_)));
        assert_eq!(parts[2], literal(".tar"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("\"abc").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_indented_string_escapes() {
        let node = expr("''\n  a '''quoted''' ''${x} ''\\n\n''");
        assert_eq!(
            node.kind,
            NodeKind::String(vec![literal("\n  a ''quoted'' ${x} \n\n")])
        );
    }

    #[test]
    fn test_indented_string_interpolation() {
        let NodeKind::String(parts) = expr("''echo ${pkgs.hello}''").kind else {
            panic!("expected String");
        };
        assert_eq!(parts.len(), 2);
        assert!(matches!(parts[1], StringPart::Interp(_)));
    }

    #[test]
    fn test_unterminated_indented_string() {
        let err = parse("''never closed").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn test_interpolated_path_is_string() {
        let NodeKind::String(parts) = expr("./hosts/${name}.nix").kind else {
            panic!("expected String");
        };
        assert_eq!(parts[0], literal("./hosts/"));
        assert_eq!(parts[2], literal(".nix"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(expr("0").kind, NodeKind::Int(0));
        assert_eq!(expr("1024").kind, NodeKind::Int(1024));
        assert_eq!(expr("2.5e3").kind, NodeKind::Float(2500.0));
        assert_eq!(expr(".5").kind, NodeKind::Float(0.5));
    }

    #[test]
    fn test_trailing_dot_is_float() {
        assert_eq!(expr("1.").kind, NodeKind::Float(1.0));
        assert_eq!(expr("1.e2").kind, NodeKind::Float(100.0));

        let NodeKind::List(items) = expr("[ 1. 2 ]").kind else {
            panic!("expected List");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, NodeKind::Float(1.0));
        assert_eq!(items[1].kind, NodeKind::Int(2));
    }

    #[test]
    fn test_integer_overflow() {
        let err = parse("99999999999999999999").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
    }
}
