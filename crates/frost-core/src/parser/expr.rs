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

//! Expressions: functions, keyword forms, operators, application and atoms.

use super::{is_ident_start, is_keyword, Parser};
use crate::ast::{AttrName, FnParams, Node, NodeKind, Operator};
use crate::error::ParseResult;
use crate::span::{SourcePos, Span};

type Level = fn(&mut Parser) -> ParseResult<Node>;

/// Characters allowed after the `:` of a URI.
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '%' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '-' | '_' | '.' | '!'
                | '~' | '*' | '\''
        )
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

pub(super) fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+')
}

impl Parser {
    pub(super) fn parse_expr(&mut self) -> ParseResult<Node> {
        self.nested(|p| p.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        let start = self.here();

        if let Some(word) = self.peek_word() {
            match word.as_str() {
                "let" => return self.parse_let(start),
                "if" => return self.parse_conditional(start),
                "with" => return self.parse_with(start),
                "assert" => return self.parse_assert(start),
                _ => {}
            }
        }

        if let Some(function) = self.try_parse_function(start)? {
            return Ok(function);
        }

        self.parse_implies()
    }

    // ==================== Functions ====================

    fn try_parse_function(&mut self, start: SourcePos) -> ParseResult<Option<Node>> {
        let starts_function = match self.peek() {
            Some('{') => true,
            Some(c) if is_ident_start(c) => self
                .peek_word()
                .map(|word| !is_keyword(&word))
                .unwrap_or(false),
            _ => false,
        };
        if !starts_function {
            return Ok(None);
        }

        let checkpoint = self.checkpoint();
        match self.parse_fn_header() {
            Ok(Some(params)) => {
                let body = self.parse_expr()?;
                Ok(Some(Node::new(
                    NodeKind::Function {
                        params: Box::new(params),
                        body: Box::new(body),
                    },
                    self.span_from(start),
                )))
            }
            Ok(None) | Err(_) => {
                self.restore(checkpoint);
                Ok(None)
            }
        }
    }

    /// Parse function parameters through the `:`. Returns `None` when the
    /// input turns out not to be a function header.
    fn parse_fn_header(&mut self) -> ParseResult<Option<Node>> {
        let start = self.here();

        if self.peek() == Some('{') {
            let (params, ellipsis) = self.parse_formals()?;
            self.skip_trivia();
            let bind = if self.peek() == Some('@') {
                self.bump();
                self.skip_trivia();
                match self.parse_plain_identifier() {
                    Some(ident) => Some(Box::new(ident)),
                    None => return Ok(None),
                }
            } else {
                None
            };
            let params = Node::new(
                NodeKind::FnParams(FnParams::Destructured {
                    params,
                    bind,
                    ellipsis,
                }),
                self.span_from(start),
            );
            self.skip_trivia();
            if self.peek() != Some(':') {
                return Ok(None);
            }
            self.bump();
            return Ok(Some(params));
        }

        let ident = match self.parse_plain_identifier() {
            Some(ident) => ident,
            None => return Ok(None),
        };
        let ident_end = self.pos;
        self.skip_trivia();

        match self.peek() {
            Some('@') => {
                self.bump();
                self.skip_trivia();
                if self.peek() != Some('{') {
                    return Ok(None);
                }
                let (params, ellipsis) = self.parse_formals()?;
                let params = Node::new(
                    NodeKind::FnParams(FnParams::Destructured {
                        params,
                        bind: Some(Box::new(ident)),
                        ellipsis,
                    }),
                    self.span_from(start),
                );
                self.skip_trivia();
                if self.peek() != Some(':') {
                    return Ok(None);
                }
                self.bump();
                Ok(Some(params))
            }
            Some(':') => {
                // `scheme:rest` without whitespace is a URI, not a lambda.
                let glued = self.pos == ident_end;
                if glued && self.peek_at(1).is_some_and(is_uri_char) {
                    return Ok(None);
                }
                let span = ident.span;
                self.bump();
                Ok(Some(Node::new(
                    NodeKind::FnParams(FnParams::Identifier(Box::new(ident))),
                    span,
                )))
            }
            _ => Ok(None),
        }
    }

    /// `{ a, b ? default, ... }`
    fn parse_formals(&mut self) -> ParseResult<(Vec<Node>, bool)> {
        self.expect_char('{')?;
        let mut params = Vec::new();
        let mut ellipsis = false;

        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            if self.at("...") {
                self.bump_n(3);
                ellipsis = true;
                self.expect_char('}')?;
                break;
            }

            let start = self.here();
            let name = self
                .parse_plain_identifier()
                .ok_or_else(|| self.unexpected("parameter name"))?;
            self.skip_trivia();
            let default = if self.peek() == Some('?') {
                self.bump();
                Some(Box::new(self.parse_expr()?))
            } else {
                None
            };
            params.push(Node::new(
                NodeKind::FnParam {
                    name: Box::new(name),
                    default,
                },
                self.span_from(start),
            ));

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        Ok((params, ellipsis))
    }

    /// A single non-keyword identifier.
    fn parse_plain_identifier(&mut self) -> Option<Node> {
        let word = self.peek_word()?;
        if is_keyword(&word) {
            return None;
        }
        let start = self.here();
        self.bump_n(word.chars().count());
        Some(Node::new(
            NodeKind::Identifier(vec![AttrName::Literal(word)]),
            self.span_from(start),
        ))
    }

    // ==================== Keyword forms ====================

    fn parse_let(&mut self, start: SourcePos) -> ParseResult<Node> {
        self.bump_n(3);
        self.pending.clear();
        self.skip_trivia();

        if self.peek() == Some('{') {
            // Legacy `let { ...; body = ...; }`
            self.bump();
            self.pending.clear();
            let bindings = self.parse_bindings(super::bindings::Terminator::Brace)?;
            self.expect_char('}')?;
            return Ok(Node::new(
                NodeKind::Attrs {
                    recursive: true,
                    bindings,
                },
                self.span_from(start),
            ));
        }

        let bindings = self.parse_bindings(super::bindings::Terminator::In)?;
        self.expect_keyword("in")?;
        let body = self.parse_expr()?;
        Ok(Node::new(
            NodeKind::LetIn {
                bindings,
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    fn parse_conditional(&mut self, start: SourcePos) -> ParseResult<Node> {
        self.bump_n(2);
        let condition = self.parse_expr()?;
        self.expect_keyword("then")?;
        let consequent = self.parse_expr()?;
        self.expect_keyword("else")?;
        let alternative = self.parse_expr()?;
        Ok(Node::new(
            NodeKind::Conditional {
                condition: Box::new(condition),
                consequent: Box::new(consequent),
                alternative: Box::new(alternative),
            },
            self.span_from(start),
        ))
    }

    fn parse_with(&mut self, start: SourcePos) -> ParseResult<Node> {
        self.bump_n(4);
        let scope = self.parse_expr()?;
        self.expect_char(';')?;
        let body = self.parse_expr()?;
        Ok(Node::new(
            NodeKind::With {
                scope: Box::new(scope),
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    fn parse_assert(&mut self, start: SourcePos) -> ParseResult<Node> {
        self.bump_n(6);
        let condition = self.parse_expr()?;
        self.expect_char(';')?;
        let body = self.parse_expr()?;
        Ok(Node::new(
            NodeKind::Assert {
                condition: Box::new(condition),
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    // ==================== Operators ====================

    /// The operator at the cursor and its length in characters.
    fn peek_operator(&self) -> Option<(Operator, usize)> {
        const TABLE: &[(&str, Operator)] = &[
            ("->", Operator::Implies),
            ("||", Operator::Or),
            ("&&", Operator::And),
            ("==", Operator::EqEq),
            ("!=", Operator::NotEq),
            ("<=", Operator::Lte),
            (">=", Operator::Gte),
            ("//", Operator::Update),
            ("++", Operator::Concat),
            ("<", Operator::Lt),
            (">", Operator::Gt),
            ("+", Operator::Add),
            ("-", Operator::Sub),
            ("*", Operator::Mul),
            ("/", Operator::Div),
            ("!", Operator::Not),
            ("?", Operator::Has),
        ];
        TABLE
            .iter()
            .find(|(symbol, _)| self.at(symbol))
            .map(|(symbol, op)| (*op, symbol.len()))
    }

    fn operator_node(&mut self, op: Operator, len: usize) -> Node {
        let start = self.here();
        self.bump_n(len);
        Node::new(NodeKind::Operator(op), self.span_from(start))
    }

    fn binary(op: Node, left: Node, right: Node) -> Node {
        let span = Span::new(left.span.start(), right.span.end());
        Node::new(
            NodeKind::BinaryExpr {
                op: Box::new(op),
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    fn left_assoc(&mut self, ops: &[Operator], next: Level) -> ParseResult<Node> {
        let mut left = next(self)?;
        let mut height = None;
        loop {
            self.skip_trivia();
            match self.peek_operator() {
                Some((op, len)) if ops.contains(&op) => {
                    let op = self.operator_node(op, len);
                    let right = next(self)?;
                    let below = height.unwrap_or_else(|| left.height()).max(right.height());
                    self.check_height(below + 1)?;
                    height = Some(below + 1);
                    left = Self::binary(op, left, right);
                }
                _ => return Ok(left),
            }
        }
    }

    /// `first op x op y` folded as `first op (x op y)`.
    fn fold_right(&self, first: Node, links: Vec<(Node, Node)>) -> ParseResult<Node> {
        let mut links = links.into_iter().rev();
        let Some((mut op, mut right)) = links.next() else {
            return Ok(first);
        };
        let mut height = right.height();
        for (prev_op, left) in links {
            height = height.max(left.height()) + 1;
            self.check_height(height)?;
            right = Self::binary(op, left, right);
            op = prev_op;
        }
        self.check_height(height.max(first.height()) + 1)?;
        Ok(Self::binary(op, first, right))
    }

    fn right_assoc(&mut self, op: Operator, next: Level) -> ParseResult<Node> {
        let first = next(self)?;
        let mut links = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek_operator() {
                Some((found, len)) if found == op => {
                    let op = self.operator_node(found, len);
                    links.push((op, next(self)?));
                }
                _ => break,
            }
        }
        self.fold_right(first, links)
    }

    fn parse_implies(&mut self) -> ParseResult<Node> {
        self.right_assoc(Operator::Implies, Self::parse_or)
    }

    fn parse_or(&mut self) -> ParseResult<Node> {
        self.left_assoc(&[Operator::Or], Self::parse_and)
    }

    fn parse_and(&mut self) -> ParseResult<Node> {
        self.left_assoc(&[Operator::And], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Node> {
        self.left_assoc(&[Operator::EqEq, Operator::NotEq], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Node> {
        self.left_assoc(
            &[Operator::Lt, Operator::Lte, Operator::Gt, Operator::Gte],
            Self::parse_update,
        )
    }

    fn parse_update(&mut self) -> ParseResult<Node> {
        self.right_assoc(Operator::Update, Self::parse_not)
    }

    fn parse_not(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        if let Some((Operator::Not, len)) = self.peek_operator() {
            let start = self.here();
            let op = self.operator_node(Operator::Not, len);
            let value = self.nested(Self::parse_not)?;
            return Ok(Node::new(
                NodeKind::UnaryExpr {
                    op: Box::new(op),
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ParseResult<Node> {
        self.left_assoc(&[Operator::Add, Operator::Sub], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Node> {
        self.left_assoc(&[Operator::Mul, Operator::Div], Self::parse_concat)
    }

    fn parse_concat(&mut self) -> ParseResult<Node> {
        self.right_assoc(Operator::Concat, Self::parse_has)
    }

    /// `expr ? a.b.c`; the right side is an identifier node.
    fn parse_has(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_negate()?;
        let mut height = None;
        loop {
            self.skip_trivia();
            match self.peek_operator() {
                Some((Operator::Has, len)) => {
                    let op = self.operator_node(Operator::Has, len);
                    self.skip_trivia();
                    let path = self.parse_attrpath()?;
                    let below = height.unwrap_or_else(|| left.height()).max(path.height());
                    self.check_height(below + 1)?;
                    height = Some(below + 1);
                    left = Self::binary(op, left, path);
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_negate(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        if let Some((Operator::Sub, len)) = self.peek_operator() {
            let start = self.here();
            let op = self.operator_node(Operator::Sub, len);
            let value = self.nested(Self::parse_negate)?;
            return Ok(Node::new(
                NodeKind::UnaryExpr {
                    op: Box::new(op),
                    value: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        self.parse_application()
    }

    // ==================== Application and selection ====================

    fn parse_application(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        let start = self.here();
        let callee = self.parse_select()?;

        let mut args = Vec::new();
        loop {
            self.skip_trivia();
            if !self.at_argument_start() {
                break;
            }
            args.push(self.parse_select()?);
        }

        if args.is_empty() {
            return Ok(callee);
        }

        let is_import = matches!(
            &callee.kind,
            NodeKind::Identifier(parts)
                if matches!(parts.as_slice(), [AttrName::Literal(name)] if name == "import")
        );
        if is_import {
            let mut rest = args.into_iter();
            if let Some(first) = rest.next() {
                let import_span = Span::new(start, first.span.end());
                let import = Node::new(NodeKind::Import(Box::new(first)), import_span);
                let rest: Vec<Node> = rest.collect();
                if rest.is_empty() {
                    return Ok(import);
                }
                return Ok(Node::new(
                    NodeKind::FnCall {
                        callee: Box::new(import),
                        args: rest,
                    },
                    self.span_from(start),
                ));
            }
            return Ok(callee);
        }

        Ok(Node::new(
            NodeKind::FnCall {
                callee: Box::new(callee),
                args,
            },
            self.span_from(start),
        ))
    }

    /// Whether the cursor starts another function argument.
    fn at_argument_start(&self) -> bool {
        match self.peek() {
            Some('(' | '[' | '{' | '"') => true,
            Some('\'') => self.at("''"),
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) || self.at_path_start(),
            Some('/' | '~' | '<') => self.at_path_start(),
            Some(c) if is_ident_start(c) => match self.peek_word() {
                Some(word) if word == "rec" => true,
                Some(word) => !is_keyword(&word),
                None => false,
            },
            _ => false,
        }
    }

    /// `a.b or c.d or e`: each default is itself a selection, and the
    /// chain continues only while the default has an attribute path.
    fn parse_select(&mut self) -> ParseResult<Node> {
        let (first, mut selected) = self.parse_selection()?;
        let mut links = Vec::new();
        while selected {
            self.skip_trivia();
            if !self.at_keyword("or") {
                break;
            }
            let op = self.operator_node(Operator::Fallback, 2);
            let (default, has_path) = self.parse_selection()?;
            links.push((op, default));
            selected = has_path;
        }
        self.fold_right(first, links)
    }

    /// An atom with an optional `.attrpath`; the flag is set when a path
    /// was present.
    fn parse_selection(&mut self) -> ParseResult<(Node, bool)> {
        self.skip_trivia();
        let start = self.here();
        let target = self.parse_atom()?;

        self.skip_trivia();
        if !self.at_select_dot() {
            return Ok((target, false));
        }
        self.bump();
        self.skip_trivia();
        let path = self.parse_attrpath()?;

        let selected = match target.kind {
            NodeKind::Identifier(mut parts) => {
                let span = Span::new(target.span.start(), path.span.end());
                if let NodeKind::Identifier(rest) = path.kind {
                    parts.extend(rest);
                }
                Node::new(NodeKind::Identifier(parts), span)
            }
            kind => {
                let target = Node::new(kind, target.span);
                Node::new(
                    NodeKind::Select {
                        target: Box::new(target),
                        path: Box::new(path),
                    },
                    self.span_from(start),
                )
            }
        };

        Ok((selected, true))
    }

    fn at_select_dot(&self) -> bool {
        self.peek() == Some('.')
            && !matches!(self.peek_at(1), Some('/' | '.'))
            && !self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
    }

    // ==================== Atoms ====================

    fn parse_atom(&mut self) -> ParseResult<Node> {
        self.nested(|p| p.parse_atom_inner())
    }

    fn parse_atom_inner(&mut self) -> ParseResult<Node> {
        self.skip_trivia();
        let start = self.here();

        match self.peek() {
            None => Err(self.unexpected("expression")),
            Some('(') => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect_char(')')?;
                Ok(Node::new(
                    NodeKind::SubExpr(Box::new(inner)),
                    self.span_from(start),
                ))
            }
            Some('[') => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    self.skip_trivia();
                    if self.peek() == Some(']') {
                        self.bump();
                        break;
                    }
                    if self.is_eof() {
                        return Err(self.unexpected("']'"));
                    }
                    items.push(self.parse_select()?);
                }
                Ok(Node::new(NodeKind::List(items), self.span_from(start)))
            }
            Some('{') => self.parse_attrs(start, false),
            Some('"') => self.parse_string(),
            Some('\'') if self.at("''") => self.parse_indented_string(),
            Some(_) if self.at_path_start() => self.parse_path(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('.') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.parse_number()
            }
            Some(c) if is_ident_start(c) => self.parse_word_atom(start),
            Some(_) => Err(self.unexpected("expression")),
        }
    }

    fn parse_word_atom(&mut self, start: SourcePos) -> ParseResult<Node> {
        if self.at_uri() {
            return self.parse_uri();
        }

        let word = self.peek_word().unwrap_or_default();
        match word.as_str() {
            "rec" => {
                self.bump_n(3);
                self.skip_trivia();
                if self.peek() != Some('{') {
                    return Err(self.unexpected("'{' after 'rec'"));
                }
                self.parse_attrs(start, true)
            }
            "true" | "false" | "null" => {
                self.bump_n(word.len());
                let kind = match word.as_str() {
                    "true" => NodeKind::Bool(true),
                    "false" => NodeKind::Bool(false),
                    _ => NodeKind::Null,
                };
                Ok(Node::new(kind, self.span_from(start)))
            }
            w if is_keyword(w) => Err(self.unexpected("expression")),
            _ => {
                self.eat_word();
                Ok(Node::new(
                    NodeKind::Identifier(vec![AttrName::Literal(word)]),
                    self.span_from(start),
                ))
            }
        }
    }

    pub(super) fn parse_attrs(&mut self, start: SourcePos, recursive: bool) -> ParseResult<Node> {
        self.expect_char('{')?;
        // Comments before the brace belong to the enclosing binding.
        self.pending.clear();
        let bindings = self.parse_bindings(super::bindings::Terminator::Brace)?;
        self.expect_char('}')?;
        Ok(Node::new(
            NodeKind::Attrs {
                recursive,
                bindings,
            },
            self.span_from(start),
        ))
    }

    // ==================== Paths and URIs ====================

    pub(super) fn at_path_start(&self) -> bool {
        if self.at("./") || self.at("../") || self.at("~/") {
            return true;
        }
        match self.peek() {
            Some('/') => self.peek_at(1).is_some_and(is_path_char),
            Some('<') => self.at_search_path(),
            Some(c) if is_path_char(c) => {
                let mut offset = 0;
                while self.peek_at(offset).is_some_and(is_path_char) {
                    offset += 1;
                }
                self.peek_at(offset) == Some('/')
                    && self.peek_at(offset + 1).is_some_and(is_path_char)
            }
            _ => false,
        }
    }

    fn at_search_path(&self) -> bool {
        let mut offset = 1;
        while let Some(c) = self.peek_at(offset) {
            if c == '>' {
                return offset > 1;
            }
            if !(is_path_char(c) || c == '/') {
                return false;
            }
            offset += 1;
        }
        false
    }

    fn at_uri(&self) -> bool {
        let mut offset = 0;
        while self.peek_at(offset).is_some_and(is_scheme_char) {
            offset += 1;
        }
        offset > 0
            && self.peek_at(offset) == Some(':')
            && self.peek_at(offset + 1).is_some_and(is_uri_char)
    }

    fn parse_uri(&mut self) -> ParseResult<Node> {
        use crate::ast::StringPart;

        let start = self.here();
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !is_uri_char(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
        Ok(Node::new(
            NodeKind::String(vec![StringPart::Literal(text)]),
            self.span_from(start),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{AttrName, FnParams, Node, NodeKind, Operator, StringPart};
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

    fn ident_path(node: &Node) -> Vec<String> {
        node.literal_attr_path()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn binary_op(node: &Node) -> Operator {
        match &node.kind {
            NodeKind::BinaryExpr { op, .. } => match op.kind {
                NodeKind::Operator(op) => op,
                _ => panic!("operator leaf expected"),
            },
            other => panic!("expected BinaryExpr, got {}", other.name()),
        }
    }

    #[test]
    fn test_identifier_lambda() {
        let node = expr("x: x");
        let NodeKind::Function { params, body } = node.kind else {
            panic!("expected Fn");
        };
        assert!(matches!(params.kind, NodeKind::FnParams(FnParams::Identifier(_))));
        assert_eq!(ident_path(&body), vec!["x"]);
    }

    #[test]
    fn test_uri_is_string() {
        let node = expr("github:snowfallorg/frost");
        assert_eq!(
            node.kind,
            NodeKind::String(vec![StringPart::Literal("github:snowfallorg/frost".into())])
        );
    }

    #[test]
    fn test_destructured_lambda() {
        let node = expr("{ lib, pkgs ? null, ... }@args: lib");
        let NodeKind::Function { params, .. } = node.kind else {
            panic!("expected Fn");
        };
        let NodeKind::FnParams(FnParams::Destructured {
            params,
            bind,
            ellipsis,
        }) = params.kind
        else {
            panic!("expected destructured params");
        };
        assert_eq!(params.len(), 2);
        assert!(ellipsis);
        assert_eq!(ident_path(&bind.unwrap()), vec!["args"]);
        let NodeKind::FnParam { default, .. } = &params[1].kind else {
            panic!("expected FnParam");
        };
        assert_eq!(default.as_ref().unwrap().kind, NodeKind::Null);
    }

    #[test]
    fn test_bind_before_formals() {
        let node = expr("args @ { a }: a");
        let NodeKind::Function { params, .. } = node.kind else {
            panic!("expected Fn");
        };
        assert!(matches!(
            params.kind,
            NodeKind::FnParams(FnParams::Destructured { bind: Some(_), .. })
        ));
    }

    #[test]
    fn test_empty_braces_are_attrs() {
        assert!(matches!(expr("{ }").kind, NodeKind::Attrs { .. }));
    }

    #[test]
    fn test_precedence() {
        let node = expr("1 + 2 * 3");
        assert_eq!(binary_op(&node), Operator::Add);
        let NodeKind::BinaryExpr { right, .. } = &node.kind else {
            unreachable!()
        };
        assert_eq!(binary_op(right), Operator::Mul);
    }

    #[test]
    fn test_update_is_right_associative() {
        let node = expr("a // b // c");
        let NodeKind::BinaryExpr { left, right, .. } = &node.kind else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(ident_path(left), vec!["a"]);
        assert_eq!(binary_op(right), Operator::Update);
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let node = expr("a - b - c");
        let NodeKind::BinaryExpr { left, right, .. } = &node.kind else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(binary_op(left), Operator::Sub);
        assert_eq!(ident_path(right), vec!["c"]);
    }

    #[test]
    fn test_unary_operators() {
        let node = expr("!-x");
        let NodeKind::UnaryExpr { op, value } = node.kind else {
            panic!("expected UnaryExpr");
        };
        assert_eq!(op.kind, NodeKind::Operator(Operator::Not));
        assert!(matches!(
            value.kind,
            NodeKind::UnaryExpr { ref op, .. } if op.kind == NodeKind::Operator(Operator::Sub)
        ));
    }

    #[test]
    fn test_select_extends_identifier() {
        let node = expr("lib.strings.concatMapStrings");
        assert_eq!(ident_path(&node), vec!["lib", "strings", "concatMapStrings"]);
    }

    #[test]
    fn test_select_with_default() {
        let node = expr("config.foo or { }");
        assert_eq!(binary_op(&node), Operator::Fallback);
    }

    #[test]
    fn test_fallback_chain_is_right_associative() {
        let node = expr("a.x or b.y or c");
        let NodeKind::BinaryExpr { left, right, .. } = &node.kind else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(ident_path(left), vec!["a", "x"]);
        assert_eq!(binary_op(right), Operator::Fallback);
    }

    #[test]
    fn test_implication_is_right_associative() {
        let node = expr("a -> b -> c");
        let NodeKind::BinaryExpr { left, right, .. } = &node.kind else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(ident_path(left), vec!["a"]);
        assert_eq!(binary_op(right), Operator::Implies);
    }

    #[test]
    fn test_select_on_expression() {
        let node = expr("(import ./lib.nix).mkThing");
        let NodeKind::Select { target, path } = node.kind else {
            panic!("expected Select");
        };
        assert!(matches!(target.kind, NodeKind::SubExpr(_)));
        assert_eq!(ident_path(&path), vec!["mkThing"]);
    }

    #[test]
    fn test_has_attr() {
        let node = expr("attrs ? a.b");
        assert_eq!(binary_op(&node), Operator::Has);
        let NodeKind::BinaryExpr { right, .. } = &node.kind else {
            unreachable!()
        };
        assert_eq!(ident_path(right), vec!["a", "b"]);
    }

    #[test]
    fn test_application() {
        let node = expr("f x \"y\" [ 1 ]");
        let NodeKind::FnCall { callee, args } = node.kind else {
            panic!("expected FnCall");
        };
        assert_eq!(ident_path(&callee), vec!["f"]);
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_import() {
        let node = expr("import ./default.nix");
        let NodeKind::Import(value) = node.kind else {
            panic!("expected Import");
        };
        assert_eq!(value.kind, NodeKind::Path("./default.nix".into()));
    }

    #[test]
    fn test_import_with_arguments() {
        let node = expr("import <nixpkgs> { }");
        let NodeKind::FnCall { callee, args } = node.kind else {
            panic!("expected FnCall");
        };
        assert!(matches!(callee.kind, NodeKind::Import(_)));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_paths() {
        assert_eq!(expr("./a/b.nix").kind, NodeKind::Path("./a/b.nix".into()));
        assert_eq!(expr("../x").kind, NodeKind::Path("../x".into()));
        assert_eq!(expr("/etc/hosts").kind, NodeKind::Path("/etc/hosts".into()));
        assert_eq!(expr("~/cfg").kind, NodeKind::Path("~/cfg".into()));
        assert_eq!(expr("<nixpkgs>").kind, NodeKind::Path("<nixpkgs>".into()));
        assert_eq!(expr("nixpkgs/lib").kind, NodeKind::Path("nixpkgs/lib".into()));
    }

    #[test]
    fn test_division_is_not_a_path() {
        assert_eq!(binary_op(&expr("a / b")), Operator::Div);
    }

    #[test]
    fn test_conditional() {
        let node = expr("if a then 1 else 2");
        assert!(matches!(node.kind, NodeKind::Conditional { .. }));
    }

    #[test]
    fn test_with_and_assert() {
        let node = expr("with lib; assert true; x");
        let NodeKind::With { body, .. } = node.kind else {
            panic!("expected With");
        };
        assert!(matches!(body.kind, NodeKind::Assert { .. }));
    }

    #[test]
    fn test_let_in() {
        let node = expr("let a = 1; b = 2; in a + b");
        let NodeKind::LetIn { bindings, .. } = node.kind else {
            panic!("expected LetIn");
        };
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("true").kind, NodeKind::Bool(true));
        assert_eq!(expr("null").kind, NodeKind::Null);
        assert_eq!(expr("3.5").kind, NodeKind::Float(3.5));
        assert_eq!(expr("-7").kind.name(), "UnaryExpr");
    }

    #[test]
    fn test_keyword_is_not_an_expression() {
        assert!(parse("then").is_err());
    }

    #[test]
    fn test_rec_attrs() {
        let node = expr("rec { a = 1; b = a; }");
        assert!(matches!(node.kind, NodeKind::Attrs { recursive: true, .. }));
    }

    #[test]
    fn test_list_items_are_select_level() {
        let node = expr("[ a.b c ]");
        let NodeKind::List(items) = node.kind else {
            panic!("expected List");
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0].kind, NodeKind::Identifier(parts) if parts.len() == 2));
        assert!(matches!(&items[1].kind, NodeKind::Identifier(parts)
            if parts == &vec![AttrName::Literal("c".into())]));
    }
}
