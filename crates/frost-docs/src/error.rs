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

//! Error types for documentation extraction.
//!
//! Every variant is fatal for a run: a file the extractor needed could not
//! be read or parsed, so the documentation it would have produced is
//! unknown. Non-fatal conditions (missing library root, duplicate
//! definitions) are logged instead.

use frost_core::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a documentation map.
#[derive(Error, Debug, Clone)]
pub enum DocsError {
    /// A source file or directory could not be read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A source file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
    },

    /// A source file is not valid Nix.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// The parser's diagnostic
        #[source]
        source: ParseError,
    },
}

impl DocsError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, source: ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Result type for documentation extraction.
pub type DocsResult<T> = Result<T, DocsError>;
