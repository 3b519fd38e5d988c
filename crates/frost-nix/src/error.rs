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

//! Error types for evaluator invocations.

use std::io;
use thiserror::Error;

/// Errors raised while running the Nix evaluator.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// The `nix` program could not be started.
    #[error("Failed to run '{program}': {message}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// The error message
        message: String,
    },

    /// `nix` ran but exited unsuccessfully.
    #[error("Nix command failed ({status}): {stderr}")]
    Failed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The evaluator's output was not the JSON shape expected.
    #[error("Failed to decode evaluator output: {message}")]
    Json { message: String },
}

impl EvalError {
    pub fn spawn_error(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            message: source.to_string(),
        }
    }

    pub fn json_error(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
        }
    }
}

/// Result type for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
