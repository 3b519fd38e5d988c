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

//! Collection of documentable bindings from a syntax tree.

use frost_core::{join_comments, traverse, AstVisitor, Binding, Node, Span, VisitorContext};
use std::convert::Infallible;

/// A `name = value;` binding whose name path is entirely literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBinding {
    /// Final segment of the name path.
    pub name: String,
    /// Span of the whole name path.
    pub name_span: Span,
    /// Attached comments, newline-joined.
    pub comment: String,
}

#[derive(Default)]
struct BindingCollector {
    bindings: Vec<DocBinding>,
}

impl AstVisitor for BindingCollector {
    type Error = Infallible;

    fn visit_binding(
        &mut self,
        _node: &Node,
        binding: &Binding,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        let Binding::Assign { name, .. } = binding else {
            return Ok(());
        };
        let Some(path) = name.literal_attr_path() else {
            return Ok(());
        };
        if let Some(last) = path.last() {
            self.bindings.push(DocBinding {
                name: (*last).to_string(),
                name_span: name.span,
                comment: join_comments(binding.comments()),
            });
        }
        Ok(())
    }
}

/// All literal assignments in `root`, in source (pre-order) order.
pub fn collect_bindings(root: &Node) -> Vec<DocBinding> {
    let mut collector = BindingCollector::default();
    match traverse(root, &mut collector) {
        Ok(()) => collector.bindings,
        Err(never) => match never {},
    }
}
