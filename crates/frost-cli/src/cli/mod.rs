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

//! CLI command definitions and argument parsing.

use crate::commands::{self, GlobalOptions};
use crate::error::CliError;
use clap::Subcommand;
use std::path::PathBuf;

/// Frost commands.
///
/// ```text
/// Commands
/// ├── generate  evaluate a flake and write JSON data
/// ├── build     generate, then build the UI site with Nix
/// └── lib-docs  recover library docs from a saved member listing
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Generate static data for a Nix flake
    ///
    /// Evaluates the flake and writes its apps, packages, options, library
    /// documentation and metadata as JSON files.
    Generate {
        /// Flake reference (defaults to the current directory)
        #[arg(value_name = "FLAKE")]
        flake: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "./frost-output")]
        output: PathBuf,
    },

    /// Build documentation for a Nix flake
    ///
    /// Generates the flake's data into a temporary directory and builds the
    /// Frost UI with it, linking the result at the output path.
    Build {
        /// Flake reference (defaults to the current directory)
        #[arg(value_name = "FLAKE")]
        flake: Option<String>,

        /// Output link path
        #[arg(short, long, default_value = "./frost-docs")]
        output: PathBuf,

        /// URL base path the site is served from
        #[arg(short, long, default_value = "/")]
        base: String,

        /// Flake reference of the Frost UI
        #[arg(long, default_value = commands::DEFAULT_UI_FLAKE)]
        ui: String,
    },

    /// Extract library documentation without evaluating
    ///
    /// Reads a JSON array of library members (as produced by the
    /// evaluator) and recovers their documentation comments from source.
    LibDocs {
        /// JSON file listing library members
        #[arg(short, long, value_name = "FILE")]
        members: PathBuf,

        /// Library directory scanned for members without a location
        #[arg(short, long, value_name = "DIR")]
        lib_root: Option<PathBuf>,

        /// Output directory (defaults to JSON on stdout)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if evaluation, source parsing or writing output fails.
    pub fn execute(self, options: GlobalOptions) -> Result<(), CliError> {
        match self {
            Commands::Generate { flake, output } => {
                commands::generate(flake.as_deref(), &output, options)
            }
            Commands::Build {
                flake,
                output,
                base,
                ui,
            } => commands::build(flake.as_deref(), &output, &base, &ui, options),
            Commands::LibDocs {
                members,
                lib_root,
                output,
            } => commands::lib_docs(&members, lib_root.as_deref(), output.as_deref()),
        }
    }
}
