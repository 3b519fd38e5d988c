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

//! Syntax tree traversal.
//!
//! The visitor pattern separates the walk from what is done at
//! each node. Implementors of [`AstVisitor`] override only the hooks they
//! need; [`traverse`] handles the structure.
//!
//! # Order
//!
//! The walk is pre-order: [`AstVisitor::enter`] and the kind-specific hook
//! run for a node before any of its children. Children are visited in
//! source order:
//!
//! | Kind          | Children                                  |
//! |---------------|-------------------------------------------|
//! | `Function`    | params, body                              |
//! | `FnParams`    | identifier, or `@`-binding then params    |
//! | `FnParam`     | name, default                             |
//! | `LetIn`       | bindings, body                            |
//! | `Attrs`       | bindings                                  |
//! | `Binding`     | name, value / source, names               |
//! | `FnCall`      | callee, args                              |
//! | `String`      | interpolations                            |
//! | `Conditional` | condition, consequent, alternative        |
//! | `BinaryExpr`  | op, left, right                           |
//! | `UnaryExpr`   | op, value                                 |
//! | `Select`      | target, path                              |
//! | `Identifier`  | dynamic parts                             |
//!
//! # Example
//!
//! ```
//! use frost_core::{parse, traverse, AstVisitor, Binding, Node, VisitorContext};
//! use std::convert::Infallible;
//!
//! #[derive(Default)]
//! struct Names(Vec<String>);
//!
//! impl AstVisitor for Names {
//!     type Error = Infallible;
//!
//!     fn visit_binding(
//!         &mut self,
//!         _node: &Node,
//!         binding: &Binding,
//!         _ctx: &VisitorContext,
//!     ) -> Result<(), Self::Error> {
//!         if let Binding::Assign { name, .. } = binding {
//!             if let Some(path) = name.literal_attr_path() {
//!                 self.0.push(path.join("."));
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let root = parse("{ a = 1; b.c = { d = 2; }; }").unwrap();
//! let mut names = Names::default();
//! traverse(&root, &mut names).unwrap();
//! assert_eq!(names.0, ["a", "b.c", "d"]);
//! ```

use crate::ast::{Binding, FnParams, Node, NodeKind};
use std::collections::BTreeMap;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitorContext {
    /// Distance from the node passed to [`traverse`] (0 for that node).
    pub depth: usize,
}

impl VisitorContext {
    /// Context for a direct child.
    pub fn child(&self) -> Self {
        Self {
            depth: self.depth + 1,
        }
    }
}

/// Hooks called while walking a syntax tree.
///
/// All methods default to doing nothing.
pub trait AstVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called for every node, before the kind-specific hook.
    fn enter(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_root(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_expr(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_sub_expr(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_function(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_fn_params(
        &mut self,
        _node: &Node,
        _params: &FnParams,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_fn_param(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_let_in(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_attrs(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each binding in an attribute set or let block.
    fn visit_binding(
        &mut self,
        _node: &Node,
        _binding: &Binding,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_fn_call(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_string(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_interp(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_conditional(
        &mut self,
        _node: &Node,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_with(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_assert(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_binary(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_unary(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_operator(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_select(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_list(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_import(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `null`, booleans, integers and floats.
    fn visit_literal(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_identifier(
        &mut self,
        _node: &Node,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_path(&mut self, _node: &Node, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk `node` and all of its descendants, calling visitor hooks.
///
/// The walk keeps its own work stack, so deep trees do not consume call
/// stack.
pub fn traverse<V: AstVisitor>(node: &Node, visitor: &mut V) -> Result<(), V::Error> {
    let mut pending = vec![(node, VisitorContext::default())];
    while let Some((node, ctx)) = pending.pop() {
        visit(node, visitor, &ctx)?;
        let child = ctx.child();
        pending.extend(node.children().into_iter().rev().map(|n| (n, child)));
    }
    Ok(())
}

/// Run the hooks for a single node.
fn visit<V: AstVisitor>(node: &Node, visitor: &mut V, ctx: &VisitorContext) -> Result<(), V::Error> {
    visitor.enter(node, ctx)?;

    match &node.kind {
        NodeKind::Root(_) => visitor.visit_root(node, ctx),
        NodeKind::Expr(_) => visitor.visit_expr(node, ctx),
        NodeKind::SubExpr(_) => visitor.visit_sub_expr(node, ctx),
        NodeKind::Function { .. } => visitor.visit_function(node, ctx),
        NodeKind::FnParams(params) => visitor.visit_fn_params(node, params, ctx),
        NodeKind::FnParam { .. } => visitor.visit_fn_param(node, ctx),
        NodeKind::LetIn { .. } => visitor.visit_let_in(node, ctx),
        NodeKind::Attrs { .. } => visitor.visit_attrs(node, ctx),
        NodeKind::Binding(binding) => visitor.visit_binding(node, binding, ctx),
        NodeKind::FnCall { .. } => visitor.visit_fn_call(node, ctx),
        NodeKind::String(_) => visitor.visit_string(node, ctx),
        NodeKind::Interp(_) => visitor.visit_interp(node, ctx),
        NodeKind::Conditional { .. } => visitor.visit_conditional(node, ctx),
        NodeKind::With { .. } => visitor.visit_with(node, ctx),
        NodeKind::Assert { .. } => visitor.visit_assert(node, ctx),
        NodeKind::BinaryExpr { .. } => visitor.visit_binary(node, ctx),
        NodeKind::UnaryExpr { .. } => visitor.visit_unary(node, ctx),
        NodeKind::Operator(_) => visitor.visit_operator(node, ctx),
        NodeKind::Select { .. } => visitor.visit_select(node, ctx),
        NodeKind::List(_) => visitor.visit_list(node, ctx),
        NodeKind::Import(_) => visitor.visit_import(node, ctx),
        NodeKind::Null | NodeKind::Bool(_) | NodeKind::Int(_) | NodeKind::Float(_) => {
            visitor.visit_literal(node, ctx)
        }
        NodeKind::Identifier(_) => visitor.visit_identifier(node, ctx),
        NodeKind::Path(_) => visitor.visit_path(node, ctx),
    }
}

/// Statistics collector visitor for testing and analysis.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Number of nodes visited.
    pub node_count: usize,
    /// Number of bindings visited.
    pub binding_count: usize,
    /// Maximum depth reached.
    pub max_depth: usize,
    /// Visits per node kind name.
    pub by_kind: BTreeMap<&'static str, usize>,
}

impl AstVisitor for StatsCollector {
    type Error = std::convert::Infallible;

    fn enter(&mut self, node: &Node, ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.node_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        *self.by_kind.entry(node.kind.name()).or_insert(0) += 1;
        Ok(())
    }

    fn visit_binding(
        &mut self,
        _node: &Node,
        _binding: &Binding,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.binding_count += 1;
        Ok(())
    }
}
