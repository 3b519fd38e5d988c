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

//! Syntax tree for Nix expressions.
//!
//! The tree is a strict ownership hierarchy: every [`Node`] owns its
//! children and carries the [`Span`] of the source text it was parsed from.
//! The set of node kinds is closed; consumers match on [`NodeKind`]
//! exhaustively.

use crate::comment::Comment;
use crate::span::Span;
use std::fmt;

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Boxed constructor, for building child links.
    pub fn boxed(kind: NodeKind, span: Span) -> Box<Self> {
        Box::new(Self::new(kind, span))
    }

    /// The literal parts of an identifier path, or `None` if this node is
    /// not an identifier or any part is computed.
    pub fn literal_attr_path(&self) -> Option<Vec<&str>> {
        match &self.kind {
            NodeKind::Identifier(parts) => parts
                .iter()
                .map(|part| match part {
                    AttrName::Literal(name) => Some(name.as_str()),
                    AttrName::Dynamic(_) => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Root(inner)
            | NodeKind::Expr(inner)
            | NodeKind::SubExpr(inner)
            | NodeKind::Interp(inner)
            | NodeKind::Import(inner) => vec![&**inner],
            NodeKind::Function { params, body } => vec![&**params, &**body],
            NodeKind::FnParams(FnParams::Identifier(ident)) => vec![&**ident],
            NodeKind::FnParams(FnParams::Destructured { params, bind, .. }) => {
                bind.iter().map(|b| &**b).chain(params).collect()
            }
            NodeKind::FnParam { name, default } => {
                std::iter::once(&**name).chain(default.as_deref()).collect()
            }
            NodeKind::LetIn { bindings, body } => {
                bindings.iter().chain(std::iter::once(&**body)).collect()
            }
            NodeKind::Attrs { bindings, .. } => bindings.iter().collect(),
            NodeKind::Binding(Binding::Assign { name, value, .. }) => vec![&**name, &**value],
            NodeKind::Binding(Binding::Inherit { from, names, .. }) => {
                from.as_deref().into_iter().chain(names).collect()
            }
            NodeKind::FnCall { callee, args } => {
                std::iter::once(&**callee).chain(args).collect()
            }
            NodeKind::String(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    StringPart::Interp(interp) => Some(interp),
                    StringPart::Literal(_) => None,
                })
                .collect(),
            NodeKind::Conditional {
                condition,
                consequent,
                alternative,
            } => vec![&**condition, &**consequent, &**alternative],
            NodeKind::With { scope, body } => vec![&**scope, &**body],
            NodeKind::Assert { condition, body } => vec![&**condition, &**body],
            NodeKind::BinaryExpr { op, left, right } => vec![&**op, &**left, &**right],
            NodeKind::UnaryExpr { op, value } => vec![&**op, &**value],
            NodeKind::Select { target, path } => vec![&**target, &**path],
            NodeKind::List(items) => items.iter().collect(),
            NodeKind::Identifier(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    AttrName::Dynamic(expr) => Some(&**expr),
                    AttrName::Literal(_) => None,
                })
                .collect(),
            NodeKind::Operator(_)
            | NodeKind::Null
            | NodeKind::Bool(_)
            | NodeKind::Int(_)
            | NodeKind::Float(_)
            | NodeKind::Path(_) => Vec::new(),
        }
    }

    /// Number of nodes on the longest path from this node to a leaf.
    ///
    /// Computed with an explicit stack, so it is safe on any tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.children().into_iter().map(|child| (child, level + 1)));
        }
        height
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Top of a parsed file; holds the [`NodeKind::Expr`] wrapper.
    Root(Box<Node>),
    /// Expression wrapper directly below the root.
    Expr(Box<Node>),
    /// Parenthesized expression.
    SubExpr(Box<Node>),
    /// `params: body`
    Function { params: Box<Node>, body: Box<Node> },
    /// Parameter list of a function.
    FnParams(FnParams),
    /// One destructured parameter, optionally defaulted: `name ? default`.
    FnParam {
        name: Box<Node>,
        default: Option<Box<Node>>,
    },
    /// `let bindings in body`
    LetIn { bindings: Vec<Node>, body: Box<Node> },
    /// `{ bindings }` or `rec { bindings }`.
    Attrs { recursive: bool, bindings: Vec<Node> },
    /// A binding inside an attribute set or let block.
    Binding(Binding),
    /// Function application: `callee arg1 arg2`.
    FnCall { callee: Box<Node>, args: Vec<Node> },
    /// String or indented string, possibly interpolated. URIs are plain strings.
    String(Vec<StringPart>),
    /// `${ expr }`
    Interp(Box<Node>),
    /// `if condition then consequent else alternative`
    Conditional {
        condition: Box<Node>,
        consequent: Box<Node>,
        alternative: Box<Node>,
    },
    /// `with scope; body`
    With { scope: Box<Node>, body: Box<Node> },
    /// `assert condition; body`
    Assert { condition: Box<Node>, body: Box<Node> },
    /// Binary expression; `op` is an [`NodeKind::Operator`] leaf.
    BinaryExpr {
        op: Box<Node>,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Unary expression (`!x`, `-x`); `op` is an [`NodeKind::Operator`] leaf.
    UnaryExpr { op: Box<Node>, value: Box<Node> },
    /// Operator token.
    Operator(Operator),
    /// Attribute selection on a non-identifier target: `(expr).a.b`.
    Select { target: Box<Node>, path: Box<Node> },
    /// `[ items ]`
    List(Vec<Node>),
    /// `import value`
    Import(Box<Node>),
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Identifier or attribute path: `x`, `lib.strings.concat`, `a."b".${c}`.
    Identifier(Vec<AttrName>),
    /// Path literal: `./foo.nix`, `/etc`, `~/x`, `<nixpkgs>`.
    Path(String),
}

impl NodeKind {
    /// Short kind name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root(_) => "Root",
            NodeKind::Expr(_) => "Expr",
            NodeKind::SubExpr(_) => "SubExpr",
            NodeKind::Function { .. } => "Fn",
            NodeKind::FnParams(_) => "FnParams",
            NodeKind::FnParam { .. } => "FnParam",
            NodeKind::LetIn { .. } => "LetIn",
            NodeKind::Attrs { .. } => "Attrs",
            NodeKind::Binding(_) => "Attr",
            NodeKind::FnCall { .. } => "FnCall",
            NodeKind::String(_) => "String",
            NodeKind::Interp(_) => "Interp",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::With { .. } => "With",
            NodeKind::Assert { .. } => "Assert",
            NodeKind::BinaryExpr { .. } => "BinaryExpr",
            NodeKind::UnaryExpr { .. } => "UnaryExpr",
            NodeKind::Operator(_) => "Operator",
            NodeKind::Select { .. } => "Select",
            NodeKind::List(_) => "List",
            NodeKind::Import(_) => "Import",
            NodeKind::Null => "Null",
            NodeKind::Bool(_) => "Bool",
            NodeKind::Int(_) => "Int",
            NodeKind::Float(_) => "Float",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Path(_) => "Path",
        }
    }
}

/// Function parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FnParams {
    /// `x: ...`; holds an identifier node.
    Identifier(Box<Node>),
    /// `{ a, b ? 1, ... } @ args: ...`
    Destructured {
        params: Vec<Node>,
        bind: Option<Box<Node>>,
        ellipsis: bool,
    },
}

/// The two binding forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// `name.path = value;`; `name` is an identifier node.
    Assign {
        name: Box<Node>,
        value: Box<Node>,
        comments: Vec<Comment>,
    },
    /// `inherit (from) names;`; each name is an identifier node.
    Inherit {
        from: Option<Box<Node>>,
        names: Vec<Node>,
        comments: Vec<Comment>,
    },
}

impl Binding {
    /// Comments attached to this binding, in source order.
    pub fn comments(&self) -> &[Comment] {
        match self {
            Binding::Assign { comments, .. } | Binding::Inherit { comments, .. } => comments,
        }
    }

    pub(crate) fn comments_mut(&mut self) -> &mut Vec<Comment> {
        match self {
            Binding::Assign { comments, .. } | Binding::Inherit { comments, .. } => comments,
        }
    }
}

/// One segment of an attribute path.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrName {
    /// Plain identifier or non-interpolated string.
    Literal(String),
    /// `${expr}` or an interpolated string; holds the expression node.
    Dynamic(Box<Node>),
}

/// A piece of a string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Literal(String),
    /// An [`NodeKind::Interp`] node.
    Interp(Node),
}

/// Operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    EqEq,
    NotEq,
    Add,
    Sub,
    Mul,
    Div,
    Update,
    Concat,
    /// `or` default in a selection: `a.b or c`.
    Fallback,
    /// `?`
    Has,
    Or,
    And,
    Implies,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Not => "!",
            Operator::EqEq => "==",
            Operator::NotEq => "!=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Update => "//",
            Operator::Concat => "++",
            Operator::Fallback => "or",
            Operator::Has => "?",
            Operator::Or => "||",
            Operator::And => "&&",
            Operator::Implies => "->",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
