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

//! Nix parser, syntax tree and traversal.
//!
//! This crate turns Nix source into a position-annotated syntax tree with
//! comments attached to the attribute bindings they document:
//!
//! - [`parse`] / [`parse_with_limits`]: recursive-descent parser
//! - [`Node`] / [`NodeKind`]: the closed set of syntax tree nodes
//! - [`traverse`] / [`AstVisitor`]: pre-order walk with per-kind hooks
//! - [`SourcePos`] / [`Span`]: 1-based line and column positions
//!
//! ```
//! use frost_core::{parse, traverse, StatsCollector};
//!
//! let root = parse("{\n  # Identity.\n  id = x: x;\n}").unwrap();
//! let mut stats = StatsCollector::default();
//! traverse(&root, &mut stats).unwrap();
//! assert_eq!(stats.binding_count, 1);
//! ```

mod ast;
mod comment;
mod error;
mod limits;
mod parser;
mod span;
pub mod traverse;

pub use ast::{AttrName, Binding, FnParams, Node, NodeKind, Operator, StringPart};
pub use comment::{join_comments, Comment, CommentStyle};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits};
pub use span::{SourcePos, Span};
pub use traverse::{traverse, AstVisitor, StatsCollector, VisitorContext};
