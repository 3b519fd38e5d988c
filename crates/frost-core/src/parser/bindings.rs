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

//! Binding lists, attribute paths and comment attachment.
//!
//! A binding owns two groups of comments:
//!
//! - leading comments: everything between the previous binding (or the
//!   opening `{` / `let`) and the start of this binding;
//! - trailing comments: comments that start on the same line as the
//!   binding's terminating `;`.
//!
//! Leading comments come first in [`Binding::comments`].

use super::Parser;
use crate::ast::{AttrName, Binding, Node, NodeKind, StringPart};
use crate::comment::Comment;
use crate::error::ParseResult;
use crate::span::Span;

/// What ends a binding list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Terminator {
    /// `}` of an attribute set.
    Brace,
    /// `in` of a let expression.
    In,
}

/// The text of a string with no interpolation.
fn literal_text(parts: &[StringPart]) -> Option<String> {
    match parts {
        [] => Some(String::new()),
        [StringPart::Literal(text)] => Some(text.clone()),
        _ => None,
    }
}

impl Parser {
    /// Parse bindings up to `terminator`. The caller clears `pending` once
    /// the opening `{` or `let` is consumed.
    pub(super) fn parse_bindings(&mut self, terminator: Terminator) -> ParseResult<Vec<Node>> {
        let mut bindings = Vec::new();

        loop {
            self.skip_trivia();
            let done = match terminator {
                Terminator::Brace => self.peek() == Some('}'),
                Terminator::In => self.at_keyword("in"),
            };
            if done {
                break;
            }
            if self.is_eof() {
                return Err(self.unexpected(match terminator {
                    Terminator::Brace => "'}'",
                    Terminator::In => "'in'",
                }));
            }

            let leading = std::mem::take(&mut self.pending);
            let (mut binding, span) = self.parse_binding()?;

            self.pending.clear();
            self.skip_trivia();
            let trailing_count = self
                .pending
                .iter()
                .take_while(|comment| comment.span.start().line() == span.end().line())
                .count();
            let trailing: Vec<Comment> = self.pending.drain(..trailing_count).collect();

            let comments = binding.comments_mut();
            comments.extend(leading);
            comments.extend(trailing);

            bindings.push(Node::new(NodeKind::Binding(binding), span));
        }

        self.pending.clear();
        Ok(bindings)
    }

    fn parse_binding(&mut self) -> ParseResult<(Binding, Span)> {
        let start = self.here();

        if self.at_keyword("inherit") {
            self.bump_n("inherit".len());
            self.skip_trivia();

            let from = if self.peek() == Some('(') {
                self.bump();
                let source = self.parse_expr()?;
                self.expect_char(')')?;
                Some(Box::new(source))
            } else {
                None
            };

            let mut names = Vec::new();
            loop {
                self.skip_trivia();
                if self.peek() == Some(';') {
                    break;
                }
                let name_start = self.here();
                let name = self.parse_attr_name()?;
                names.push(Node::new(
                    NodeKind::Identifier(vec![name]),
                    self.span_from(name_start),
                ));
            }
            self.expect_char(';')?;

            return Ok((
                Binding::Inherit {
                    from,
                    names,
                    comments: Vec::new(),
                },
                self.span_from(start),
            ));
        }

        let name = self.parse_attrpath()?;
        self.expect_char('=')?;
        let value = self.parse_expr()?;
        self.expect_char(';')?;

        Ok((
            Binding::Assign {
                name: Box::new(name),
                value: Box::new(value),
                comments: Vec::new(),
            },
            self.span_from(start),
        ))
    }

    /// `a.b."c".${d}` as an identifier node.
    pub(super) fn parse_attrpath(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        let start = self.here();
        let mut parts = vec![self.parse_attr_name()?];

        loop {
            self.skip_trivia();
            if self.peek() != Some('.') {
                break;
            }
            self.bump();
            self.skip_trivia();
            parts.push(self.parse_attr_name()?);
        }

        Ok(Node::new(NodeKind::Identifier(parts), self.span_from(start)))
    }

    fn parse_attr_name(&mut self) -> ParseResult<AttrName> {
        match self.peek() {
            Some('"') => {
                let string = self.parse_string()?;
                if let NodeKind::String(parts) = &string.kind {
                    if let Some(text) = literal_text(parts) {
                        return Ok(AttrName::Literal(text));
                    }
                }
                Ok(AttrName::Dynamic(Box::new(string)))
            }
            Some('$') if self.at("${") => {
                let interp = self.parse_interpolation()?;
                Ok(AttrName::Dynamic(Box::new(interp)))
            }
            _ => match self.eat_word() {
                Some(word) => Ok(AttrName::Literal(word)),
                None => Err(self.unexpected("attribute name")),
            },
        }
    }
}
