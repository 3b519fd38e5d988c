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

//! Frost Command Line Interface

use clap::Parser;
use frost_cli::cli::Commands;
use frost_cli::commands::GlobalOptions;
use frost_cli::logging;
use std::process::ExitCode;

/// Frost - documentation generator for Nix flakes
///
/// # Examples
///
/// ```bash
/// # Generate data for the flake in the current directory
/// frost generate
///
/// # Build a documentation site for a remote flake
/// frost build github:snowfallorg/cowsay --base /docs
///
/// # Recover library docs from a saved member listing
/// frost lib-docs --members members.json --lib-root ./lib
/// ```
#[derive(Parser)]
#[command(name = "frost")]
#[command(author, version, about = "Frost - documentation generator for Nix flakes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show a trace when a Nix command fails
    #[arg(long, global = true)]
    show_trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = GlobalOptions {
        show_trace: cli.show_trace,
    };
    match cli.command.execute(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
