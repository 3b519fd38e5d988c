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

//! Recursive-descent parser for Nix expressions.
//!
//! The parser works directly on characters; there is no separate token
//! stream. Whitespace and comments ("trivia") are skipped before every
//! token, and the comments encountered are buffered so that attribute
//! bindings can claim the ones that document them.
//!
//! # Grammar (informal, loosest binding first)
//!
//! ```text
//! expr        = function | let | if | with | assert | implies
//! function    = (ident | formals | ident "@" formals | formals "@" ident) ":" expr
//! implies     = or ("->" implies)?
//! or          = and ("||" and)*
//! and         = equality ("&&" equality)*
//! equality    = compare (("==" | "!=") compare)*
//! compare     = update (("<" | "<=" | ">" | ">=") update)*
//! update      = not ("//" update)?
//! not         = "!" not | additive
//! additive    = mul (("+" | "-") mul)*
//! mul         = concat (("*" | "/") concat)*
//! concat      = has ("++" concat)?
//! has         = negate ("?" attrpath)*
//! negate      = "-" negate | application
//! application = select select*
//! select      = atom ("." attrpath ("or" select)?)?
//! ```

mod bindings;
mod expr;
mod literals;

use crate::ast::Node;
use crate::comment::Comment;
use crate::error::{ParseError, ParseResult};
use crate::limits::Limits;
use crate::span::{SourcePos, Span};

/// Parse Nix source with default [`Limits`].
///
/// # Examples
///
/// ```
/// use frost_core::{parse, NodeKind};
///
/// let root = parse("{ x = 1; }").unwrap();
/// assert!(matches!(root.kind, NodeKind::Root(_)));
/// ```
pub fn parse(source: &str) -> ParseResult<Node> {
    parse_with_limits(source, &Limits::default())
}

/// Parse Nix source with explicit limits.
pub fn parse_with_limits(source: &str, limits: &Limits) -> ParseResult<Node> {
    if source.len() > limits.max_file_size {
        return Err(ParseError::security(
            format!(
                "source size {} exceeds maximum {}",
                source.len(),
                limits.max_file_size
            ),
            SourcePos::start(),
        ));
    }

    let mut parser = Parser::new(source, limits.clone());
    parser.parse_root()
}

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "assert", "with", "let", "in", "rec", "inherit",
];

pub(crate) fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '-')
}

/// Saved parser state for backtracking.
struct Checkpoint {
    pos: usize,
    cursor: SourcePos,
    last_end: SourcePos,
    pending: Vec<Comment>,
    depth: usize,
}

pub(crate) struct Parser {
    chars: Vec<char>,
    pos: usize,
    /// Position of `chars[pos]`.
    cursor: SourcePos,
    /// Position just past the last consumed non-trivia character.
    last_end: SourcePos,
    /// Comments skipped since the last binding boundary.
    pending: Vec<Comment>,
    depth: usize,
    limits: Limits,
}

impl Parser {
    fn new(source: &str, limits: Limits) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            chars: source.chars().collect(),
            pos: 0,
            cursor: SourcePos::start(),
            last_end: SourcePos::start(),
            pending: Vec::new(),
            depth: 0,
            limits,
        }
    }

    fn parse_root(&mut self) -> ParseResult<Node> {
        use crate::ast::NodeKind;

        self.skip_trivia();
        let expr = self.parse_expr()?;
        self.skip_trivia();
        if !self.is_eof() {
            return Err(self.unexpected("end of input"));
        }

        let expr_span = expr.span;
        let wrapper = Node::new(NodeKind::Expr(Box::new(expr)), expr_span);
        Ok(Node::new(
            NodeKind::Root(Box::new(wrapper)),
            Span::new(SourcePos::start(), self.cursor),
        ))
    }

    // ==================== Cursor ====================

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn at(&self, s: &str) -> bool {
        let mut offset = 0;
        for expected in s.chars() {
            if self.peek_at(offset) != Some(expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.cursor.next_line();
        } else {
            self.cursor.advance_cols(c.len_utf8());
        }
        Some(c)
    }

    /// Consume one character of a token.
    fn bump(&mut self) -> Option<char> {
        let c = self.advance()?;
        self.last_end = self.cursor;
        Some(c)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn here(&self) -> SourcePos {
        self.cursor
    }

    fn span_from(&self, start: SourcePos) -> Span {
        Span::new(start, self.last_end)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            cursor: self.cursor,
            last_end: self.last_end,
            pending: self.pending.clone(),
            depth: self.depth,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.cursor = checkpoint.cursor;
        self.last_end = checkpoint.last_end;
        self.pending = checkpoint.pending;
        self.depth = checkpoint.depth;
    }

    /// Run `f` one nesting level deeper, enforcing the depth limit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(ParseError::security(
                format!(
                    "nesting depth exceeds maximum {}",
                    self.limits.max_nesting_depth
                ),
                self.here(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reject an expression whose tree would be taller than the limit.
    fn check_height(&self, height: usize) -> ParseResult<()> {
        if height > self.limits.max_expression_height {
            return Err(ParseError::security(
                format!(
                    "expression height exceeds maximum {}",
                    self.limits.max_expression_height
                ),
                self.here(),
            ));
        }
        Ok(())
    }

    // ==================== Trivia ====================

    /// Skip whitespace and comments, buffering comments in `pending`.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    let start = self.here();
                    let from = self.pos;
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                    let raw: String = self.chars[from..self.pos].iter().collect();
                    let span = Span::new(start, self.here());
                    self.pending.push(Comment::from_source(&raw, span));
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    if self.skip_block_comment().is_err() {
                        // Leave the cursor on the unterminated comment; the
                        // caller reports it as an unexpected character.
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let checkpoint_pos = self.pos;
        let checkpoint_cursor = self.cursor;
        let start = self.here();
        self.advance();
        self.advance();
        loop {
            if self.is_eof() {
                self.pos = checkpoint_pos;
                self.cursor = checkpoint_cursor;
                return Err(ParseError::unterminated_comment(start));
            }
            if self.at("*/") {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        let raw: String = self.chars[checkpoint_pos..self.pos].iter().collect();
        let span = Span::new(start, self.here());
        self.pending.push(Comment::from_source(&raw, span));
        Ok(())
    }

    // ==================== Words ====================

    /// The identifier starting at the cursor, without consuming it.
    fn peek_word(&self) -> Option<String> {
        let first = self.peek()?;
        if !is_ident_start(first) {
            return None;
        }
        let mut end = self.pos + 1;
        while end < self.chars.len() && is_ident_char(self.chars[end]) {
            end += 1;
        }
        Some(self.chars[self.pos..end].iter().collect())
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek_word().as_deref() == Some(keyword)
    }

    fn eat_word(&mut self) -> Option<String> {
        let word = self.peek_word()?;
        self.bump_n(word.chars().count());
        Some(word)
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        self.skip_trivia();
        if self.at_keyword(keyword) {
            self.bump_n(keyword.len());
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", keyword)))
        }
    }

    fn expect_char(&mut self, expected: char) -> ParseResult<()> {
        self.skip_trivia();
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    // ==================== Errors ====================

    fn unexpected(&self, expected: &str) -> ParseError {
        if self.at("/*") {
            return ParseError::unterminated_comment(self.here());
        }
        match self.peek() {
            None => ParseError::eof(
                format!("unexpected end of input, expected {}", expected),
                self.here(),
            ),
            Some(c) => ParseError::syntax(
                format!("unexpected '{}', expected {}", c, expected),
                self.here(),
            ),
        }
    }
}
