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

//! Lib-docs command - documentation from a saved member listing

use super::{read_file, source_limits};
use crate::error::CliError;
use crate::output::write_collection;
use colored::Colorize;
use frost_docs::{build_documentation_map_with_cache, AstCache, DocEntry, LibMember};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Recover documentation for the members listed in `members`.
///
/// `members` holds the JSON array the evaluator reports for a flake's
/// library. Entries go to `output/lib/entry-N.json` when an output
/// directory is given, otherwise to stdout as one pretty-printed array.
pub fn lib_docs(
    members: &Path,
    lib_root: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let content = read_file(members)?;
    let listing: Vec<LibMember> =
        serde_json::from_str(&content).map_err(|e| CliError::invalid_json(members, e))?;

    let mut cache = AstCache::new().with_limits(source_limits());
    let docs = build_documentation_map_with_cache(&listing, lib_root, &mut cache)?;
    let stats = cache.statistics();
    info!(
        members = listing.len(),
        documented = docs.len(),
        parsed = stats.parses,
        "Recovered library documentation"
    );

    match output {
        Some(dir) => {
            let lib_dir = write_collection(dir, "lib", "entry", docs.values())?;
            println!("{} {}", "✓".green().bold(), lib_dir.display());
            println!("  Members: {}", listing.len());
            println!("  Documented: {}", docs.len());
        }
        None => {
            let entries: Vec<&DocEntry> = docs.values().collect();
            let json = serde_json::to_string_pretty(&entries).map_err(CliError::json_format)?;
            writeln!(io::stdout(), "{json}").map_err(|e| CliError::io_error("<stdout>", e))?;
        }
    }
    Ok(())
}
