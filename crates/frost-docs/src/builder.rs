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

//! Documentation map construction.

use crate::cache::{AstCache, SourceLoader};
use crate::error::DocsResult;
use crate::matcher::match_by_location;
use crate::member::{DocumentationMap, LibMember};
use crate::scanner::scan_fallback;
use std::path::Path;
use tracing::debug;

/// Build the documentation map for `members` with a fresh cache.
///
/// Members with a location go through the location matcher; the rest are
/// searched for under `library_root`. See
/// [`build_documentation_map_with_cache`].
pub fn build_documentation_map(
    members: &[LibMember],
    library_root: Option<&Path>,
) -> DocsResult<DocumentationMap> {
    let mut cache = AstCache::new();
    build_documentation_map_with_cache(members, library_root, &mut cache)
}

/// Build the documentation map, reading sources through `cache`.
///
/// A file needed by both passes is parsed once. Members that neither pass
/// can place are absent from the result.
pub fn build_documentation_map_with_cache<L: SourceLoader>(
    members: &[LibMember],
    library_root: Option<&Path>,
    cache: &mut AstCache<L>,
) -> DocsResult<DocumentationMap> {
    let (located, unlocated): (Vec<LibMember>, Vec<LibMember>) = members
        .iter()
        .cloned()
        .partition(|member| member.location.is_some());

    debug!(
        located = located.len(),
        unlocated = unlocated.len(),
        "Building documentation map"
    );

    let mut entries = match_by_location(&located, cache)?;
    if !unlocated.is_empty() {
        let outcome = scan_fallback(library_root, &unlocated, cache)?;
        entries.extend(outcome.entries);
    }

    debug!(
        entries = entries.len(),
        parses = cache.statistics().parses,
        "Documentation map built"
    );
    Ok(entries)
}
