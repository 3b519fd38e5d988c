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

//! Fallback scanner for members the evaluator could not locate.
//!
//! Every `*.nix` file under the library root is visited in lexicographic
//! path order. Within one file the first binding named like a member is
//! used; a later file defining the same member replaces the earlier entry
//! and a duplicate warning is logged.

use crate::bindings::collect_bindings;
use crate::cache::{AstCache, SourceLoader};
use crate::error::{DocsError, DocsResult};
use crate::member::{DocEntry, DocumentationMap, LibMember, Location};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result of a fallback scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub entries: DocumentationMap,
    /// Dotted paths of members found in more than one file, one per
    /// replaced entry.
    pub duplicates: Vec<String>,
}

/// Search the library tree for bindings named like `members`.
///
/// Without a library root nothing is scanned and a warning is logged.
/// Entries carry the member with its location set to the file and the
/// start of the binding's name.
pub fn scan_fallback<L: SourceLoader>(
    library_root: Option<&Path>,
    members: &[LibMember],
    cache: &mut AstCache<L>,
) -> DocsResult<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    if members.is_empty() {
        return Ok(outcome);
    }

    let Some(root) = library_root else {
        warn!(
            "Library attributes without location information are not supported outside of Snowfall Lib."
        );
        return Ok(outcome);
    };

    let files = nix_files(root)?;
    debug!(root = %root.display(), files = files.len(), members = members.len(), "Scanning library sources");

    for file in files {
        let bindings = collect_bindings(cache.get_or_parse(&file)?);

        for member in members {
            let Some(binding) = bindings.iter().find(|b| b.name == member.name) else {
                continue;
            };

            let key = member.key();
            if outcome.entries.contains_key(&key) {
                let dotted = member.dotted_path();
                warn!("Found duplicate definition of {}", dotted);
                outcome.duplicates.push(dotted);
            }

            let start = binding.name_span.start();
            let mut located = member.clone();
            located.location = Some(Location {
                file: file.clone(),
                line: start.line(),
                column: start.column(),
            });
            outcome.entries.insert(
                key,
                DocEntry {
                    member: located,
                    comment: binding.comment.clone(),
                },
            );
        }
    }

    Ok(outcome)
}

/// All `*.nix` files below `root`, sorted by path.
fn nix_files(root: &Path) -> DocsResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| DocsError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            message: e.to_string(),
        })?;
        let is_nix = entry.path().extension().is_some_and(|ext| ext == "nix");
        if entry.file_type().is_file() && is_nix {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::ValueKind;
    use std::fs;
    use tempfile::TempDir;

    fn unlocated(name: &str) -> LibMember {
        LibMember {
            name: name.to_string(),
            path: Vec::new(),
            kind: ValueKind::Set,
            location: None,
        }
    }

    fn write(dir: &Path, relative: &str, source: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, source).unwrap();
    }

    #[test]
    fn test_without_root_scans_nothing() {
        let mut cache = AstCache::new();
        let outcome = scan_fallback(None, &[unlocated("a")], &mut cache).unwrap();
        assert!(outcome.entries.is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sets_location_to_binding_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "default.nix", "{\n  # Always on.\n  enabled = { enable = true; };\n}");

        let mut cache = AstCache::new();
        let outcome = scan_fallback(Some(dir.path()), &[unlocated("enabled")], &mut cache).unwrap();

        let entry = outcome.entries.values().next().unwrap();
        assert_eq!(entry.comment, "Always on.");
        let location = entry.member.location.as_ref().unwrap();
        assert_eq!(location.file, dir.path().join("default.nix"));
        assert_eq!((location.line, location.column), (3, 3));
    }

    #[test]
    fn test_first_binding_in_file_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.nix", "{\n  # outer\n  x = { # inner\n    x = 1; };\n}");

        let mut cache = AstCache::new();
        let outcome = scan_fallback(Some(dir.path()), &[unlocated("x")], &mut cache).unwrap();
        assert_eq!(outcome.entries.values().next().unwrap().comment, "outer");
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_later_file_replaces_earlier() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.nix", "{\n  # from a\n  x = 1;\n}");
        write(dir.path(), "b.nix", "{\n  # from b\n  x = 2;\n}");

        let mut cache = AstCache::new();
        let outcome = scan_fallback(Some(dir.path()), &[unlocated("x")], &mut cache).unwrap();

        assert_eq!(outcome.duplicates, ["x"]);
        assert_eq!(outcome.entries.values().next().unwrap().comment, "from b");
    }

    #[test]
    fn test_only_nix_files_are_read() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.md", "not nix {");
        write(dir.path(), "nested/deep/x.nix", "{ x = 1; }");

        let mut cache = AstCache::new();
        let outcome = scan_fallback(Some(dir.path()), &[unlocated("x")], &mut cache).unwrap();
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("lib");
        let mut cache = AstCache::new();
        assert!(matches!(
            scan_fallback(Some(&missing), &[unlocated("x")], &mut cache),
            Err(DocsError::Io { .. })
        ));
    }

    #[test]
    fn test_unparsable_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.nix", "{ x = ; }");
        let mut cache = AstCache::new();
        assert!(matches!(
            scan_fallback(Some(dir.path()), &[unlocated("x")], &mut cache),
            Err(DocsError::Parse { .. })
        ));
    }
}
