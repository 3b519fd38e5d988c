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

//! Build command - render a documentation site with the Frost UI flake

use super::{collect_site, current_dir, source_limits, write_site, GlobalOptions};
use crate::error::CliError;
use colored::Colorize;
use frost_nix::prelude::string_literal;
use frost_nix::{Evaluate, FlakeRef, NixEvaluator};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// UI flake used when `--ui` is not given.
pub const DEFAULT_UI_FLAKE: &str = "github:snowfallorg/frost-ui";

/// Expression yielding the UI package's derivation path, configured with
/// the generated data directory and the URL base path.
fn ui_derivation_expression(ui: &str, base: &str, data_dir: &Path) -> String {
    format!(
        "let
  frost-ui = prelude.get-flake {ui};
  package = frost-ui.packages.${{prelude.system}}.frost-ui.override {{
    frost-base = {base};
    frost-data = /. + {data};
  }};
in
package.drvPath
",
        ui = string_literal(ui),
        base = string_literal(base),
        data = string_literal(&data_dir.to_string_lossy()),
    )
}

/// Generate data for `flake` and build the UI site into `output`.
pub fn build(
    flake: Option<&str>,
    output: &Path,
    base: &str,
    ui: &str,
    options: GlobalOptions,
) -> Result<(), CliError> {
    let cwd = current_dir()?;
    let flake_ref = FlakeRef::resolve(flake, &cwd);
    info!(flake = %flake_ref, "Build");

    let evaluator = NixEvaluator::new().with_show_trace(options.show_trace);
    let data = collect_site(&evaluator, &flake_ref, source_limits())?;

    // Removed on drop, after the build has copied it into the store.
    let data_dir = tempfile::Builder::new()
        .prefix("frost-")
        .tempdir()
        .map_err(|e| CliError::io_error(std::env::temp_dir(), e))?;
    write_site(data_dir.path(), &data)?;

    let derivation: String =
        evaluator.eval(&ui_derivation_expression(ui, base, data_dir.path()))?;
    debug!(%derivation, "UI derivation");

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::io_error(parent, e))?;
    }
    evaluator.build(&format!("{derivation}^*"), output)?;

    println!("{} {}", "✓".green().bold(), output.display());
    Ok(())
}
