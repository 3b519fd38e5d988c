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

//! CLI command implementations

mod build;
mod generate;
mod lib_docs;

pub use build::{build, DEFAULT_UI_FLAKE};
pub use generate::{collect_site, generate, write_site, ModuleNames, SiteData};
pub use lib_docs::lib_docs;

use crate::error::CliError;
use frost_core::Limits;
use std::env;
use std::fs;
use std::path::Path;

/// Default maximum size of any single input file (64 MB).
/// Can be overridden via the FROST_MAX_FILE_SIZE environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Options that apply to every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    /// Pass `--show-trace` to Nix.
    pub show_trace: bool,
}

/// Maximum input file size from `FROST_MAX_FILE_SIZE`, or the default.
fn max_file_size() -> u64 {
    env::var("FROST_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Parse limits for Nix sources read during a run.
pub fn source_limits() -> Limits {
    Limits {
        max_file_size: usize::try_from(max_file_size()).unwrap_or(usize::MAX),
        ..Limits::default()
    }
}

/// Read a file from disk, rejecting files over the size limit before
/// reading them.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// The working directory, used to resolve relative flake references.
fn current_dir() -> Result<std::path::PathBuf, CliError> {
    env::current_dir().map_err(|e| CliError::io_error(".", e))
}
