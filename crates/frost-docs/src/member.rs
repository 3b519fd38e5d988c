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

//! Library members and documentation entries.
//!
//! Field names follow the JSON the evaluator emits for each member:
//!
//! ```json
//! { "name": "mkOpt", "path": ["options"], "type": "lambda",
//!   "location": { "file": "/src/lib/default.nix", "line": 12, "column": 3 } }
//! ```

use frost_core::SourcePos;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Value type reported by `builtins.typeOf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Lambda,
    Set,
    List,
    String,
    Path,
    Int,
    Float,
    Bool,
    Null,
    #[serde(other)]
    Other,
}

/// Declaration site reported by `builtins.unsafeGetAttrPos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// The reported position as a source position.
    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }
}

/// A named value under a flake's library namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibMember {
    pub name: String,
    /// Enclosing attribute path, not including `name`.
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    #[serde(default)]
    pub location: Option<Location>,
}

impl LibMember {
    pub fn key(&self) -> MemberKey {
        MemberKey {
            path: self.path.clone(),
            name: self.name.clone(),
        }
    }

    /// `path` and `name` joined with dots, e.g. `options.mkOpt`.
    pub fn dotted_path(&self) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        parts.push(&self.name);
        parts.join(".")
    }
}

/// Member identity: at most one entry exists per key.
///
/// Ordering is by path, then name, which fixes the output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberKey {
    pub path: Vec<String>,
    pub name: String,
}

/// A member together with its recovered documentation.
///
/// Serializes flat: the member's fields followed by `comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    #[serde(flatten)]
    pub member: LibMember,
    pub comment: String,
}

/// Documentation entries keyed by member identity.
pub type DocumentationMap = BTreeMap<MemberKey, DocEntry>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_from_evaluator_json() {
        let member: LibMember = serde_json::from_value(json!({
            "name": "mkOpt",
            "path": ["options"],
            "type": "lambda",
            "location": { "file": "/src/lib/default.nix", "line": 12, "column": 3 }
        }))
        .unwrap();

        assert_eq!(member.kind, ValueKind::Lambda);
        assert_eq!(member.dotted_path(), "options.mkOpt");
        let location = member.location.unwrap();
        assert_eq!(location.pos(), SourcePos::new(12, 3));
    }

    #[test]
    fn test_member_without_location() {
        let member: LibMember = serde_json::from_value(json!({
            "name": "enabled",
            "path": [],
            "type": "set",
            "location": null
        }))
        .unwrap();
        assert!(member.location.is_none());
        assert_eq!(member.dotted_path(), "enabled");
    }

    #[test]
    fn test_unknown_type_tag() {
        let member: LibMember = serde_json::from_value(json!({
            "name": "x",
            "path": [],
            "type": "thunk",
            "location": null
        }))
        .unwrap();
        assert_eq!(member.kind, ValueKind::Other);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = DocEntry {
            member: LibMember {
                name: "id".into(),
                path: vec!["fn".into()],
                kind: ValueKind::Lambda,
                location: None,
            },
            comment: "Identity.".into(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "id",
                "path": ["fn"],
                "type": "lambda",
                "location": null,
                "comment": "Identity."
            })
        );
    }

    #[test]
    fn test_key_ordering() {
        let a = MemberKey {
            path: vec![],
            name: "z".into(),
        };
        let b = MemberKey {
            path: vec!["a".into()],
            name: "a".into(),
        };
        assert!(a < b);
    }
}
