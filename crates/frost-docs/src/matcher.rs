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

//! Location matcher: members with a reported declaration site.
//!
//! A member matches a binding in the file its location names when both
//! hold:
//!
//! 1. the binding's final name segment equals the member's name, and
//! 2. the reported (line, column) lies inside the binding's name path span.
//!
//! The second condition tells apart several bindings of the same name in
//! one file. Other files are never searched.

use crate::bindings::collect_bindings;
use crate::cache::{AstCache, SourceLoader};
use crate::error::DocsResult;
use crate::member::{DocEntry, DocumentationMap, LibMember};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// Match located members against the bindings of their files.
///
/// Members without a location are skipped. A member whose file has no
/// matching binding gets no entry; that is not an error.
pub fn match_by_location<L: SourceLoader>(
    members: &[LibMember],
    cache: &mut AstCache<L>,
) -> DocsResult<DocumentationMap> {
    let mut by_file: BTreeMap<&Path, Vec<&LibMember>> = BTreeMap::new();
    for member in members {
        match &member.location {
            Some(location) => by_file.entry(location.file.as_path()).or_default().push(member),
            None => trace!(member = %member.dotted_path(), "Skipping member without location"),
        }
    }

    let mut entries = DocumentationMap::new();
    for (file, file_members) in by_file {
        let bindings = collect_bindings(cache.get_or_parse(file)?);

        for member in file_members {
            let Some(location) = &member.location else {
                continue;
            };
            let pos = location.pos();
            let found = bindings
                .iter()
                .find(|binding| binding.name == member.name && binding.name_span.contains(pos));

            match found {
                Some(binding) => {
                    entries.insert(
                        member.key(),
                        DocEntry {
                            member: member.clone(),
                            comment: binding.comment.clone(),
                        },
                    );
                }
                None => debug!(
                    member = %member.dotted_path(),
                    file = %file.display(),
                    %pos,
                    "No binding at reported location"
                ),
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use crate::member::{Location, ValueKind};
    use frost_core::Limits;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MemoryLoader {
        files: HashMap<PathBuf, String>,
    }

    impl SourceLoader for MemoryLoader {
        fn load(&mut self, path: &Path, _limits: &Limits) -> DocsResult<String> {
            self.files.get(path).cloned().ok_or_else(|| {
                DocsError::io_error(path, std::io::Error::from(std::io::ErrorKind::NotFound))
            })
        }
    }

    fn cache(files: &[(&str, &str)]) -> AstCache<MemoryLoader> {
        let mut loader = MemoryLoader::default();
        for (path, source) in files {
            loader.files.insert(PathBuf::from(path), source.to_string());
        }
        AstCache::with_loader(loader)
    }

    fn member(name: &str, file: &str, line: usize, column: usize) -> LibMember {
        LibMember {
            name: name.to_string(),
            path: Vec::new(),
            kind: ValueKind::Lambda,
            location: Some(Location {
                file: PathBuf::from(file),
                line,
                column,
            }),
        }
    }

    #[test]
    fn test_position_disambiguates_same_name() {
        let source = "{\n  # first\n  foo = 1;\n  nested = {\n    # second\n    foo = 2;\n  };\n}";
        let mut cache = cache(&[("/lib/default.nix", source)]);

        let members = [member("foo", "/lib/default.nix", 6, 5)];
        let entries = match_by_location(&members, &mut cache).unwrap();

        assert_eq!(entries.len(), 1);
        let entry = entries.values().next().unwrap();
        assert_eq!(entry.comment, "second");
    }

    #[test]
    fn test_trailing_comment() {
        let mut cache = cache(&[("/lib/a.nix", "{\n  foo = 0;\n  bar = 1; # hello\n}")]);
        let members = [member("bar", "/lib/a.nix", 3, 3)];
        let entries = match_by_location(&members, &mut cache).unwrap();
        assert_eq!(entries[&members[0].key()].comment, "hello");
    }

    #[test]
    fn test_name_must_match() {
        let mut cache = cache(&[("/lib/a.nix", "{\n  foo = 1;\n}")]);
        let members = [member("bar", "/lib/a.nix", 2, 3)];
        let entries = match_by_location(&members, &mut cache).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_position_outside_name_does_not_match() {
        // Column 9 is the value, not the name.
        let mut cache = cache(&[("/lib/a.nix", "{\n  foo = 1;\n}")]);
        let members = [member("foo", "/lib/a.nix", 2, 9)];
        assert!(match_by_location(&members, &mut cache).unwrap().is_empty());
    }

    #[test]
    fn test_column_counts_bytes_of_earlier_text() {
        // The evaluator reports byte columns; `f` starts at byte column 24.
        let mut cache = cache(&[("/lib/a.nix", "{\n  label = \"日本語\"; f = 1;\n}")]);
        let members = [member("f", "/lib/a.nix", 2, 24)];
        let entries = match_by_location(&members, &mut cache).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_shared_file_parsed_once() {
        let mut cache = cache(&[("/lib/a.nix", "{\n  a = 1;\n  b = 2;\n}")]);
        let members = [
            member("a", "/lib/a.nix", 2, 3),
            member("b", "/lib/a.nix", 3, 3),
        ];
        let entries = match_by_location(&members, &mut cache).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(cache.statistics().parses, 1);
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let mut cache = cache(&[]);
        let members = [member("a", "/missing.nix", 1, 1)];
        assert!(matches!(
            match_by_location(&members, &mut cache),
            Err(DocsError::Io { .. })
        ));
    }

    #[test]
    fn test_members_without_location_are_skipped() {
        let mut cache = cache(&[]);
        let mut unlocated = member("a", "/x.nix", 1, 1);
        unlocated.location = None;
        let entries = match_by_location(&[unlocated], &mut cache).unwrap();
        assert!(entries.is_empty());
        assert!(cache.is_empty());
    }
}
