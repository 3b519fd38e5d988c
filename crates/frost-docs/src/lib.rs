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

//! Documentation recovery for Nix library members.
//!
//! The evaluator reports each library member's name, attribute path and,
//! when it can, the file position of its declaration. This crate turns
//! that listing into documentation entries by parsing the referenced
//! sources and reading the comments attached to the declaring binding.
//!
//! - Members with a location are resolved by [`match_by_location`].
//! - Members without one are searched for under the library root by
//!   [`scan_fallback`].
//! - [`build_documentation_map`] runs both over one shared [`AstCache`].
//!
//! ```no_run
//! use frost_docs::{build_documentation_map, LibMember};
//! use std::path::Path;
//!
//! let members: Vec<LibMember> = serde_json::from_str("[]").unwrap();
//! let docs = build_documentation_map(&members, Some(Path::new("lib"))).unwrap();
//! for entry in docs.values() {
//!     println!("{}: {}", entry.member.dotted_path(), entry.comment);
//! }
//! ```

mod bindings;
mod builder;
mod cache;
mod error;
mod matcher;
mod member;
mod scanner;

pub use bindings::{collect_bindings, DocBinding};
pub use builder::{build_documentation_map, build_documentation_map_with_cache};
pub use cache::{AstCache, CacheStatistics, FsLoader, SourceLoader};
pub use error::{DocsError, DocsResult};
pub use matcher::match_by_location;
pub use member::{DocEntry, DocumentationMap, LibMember, Location, MemberKey, ValueKind};
pub use scanner::{scan_fallback, ScanOutcome};
