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

//! Security limits for Nix parsing.

/// Configurable limits for parser security.
///
/// These limits bound the resources consumed while parsing a single file.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum source size in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum expression nesting depth (default: 128).
    pub max_nesting_depth: usize,
    /// Maximum height of the tree built for one expression (default: 1024).
    ///
    /// Operator chains such as `a // b // c` are parsed in a loop rather
    /// than by recursion, so this bounds them where the nesting depth
    /// does not.
    pub max_expression_height: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_nesting_depth: 128,
            max_expression_height: 1024,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_nesting_depth: usize::MAX,
            max_expression_height: usize::MAX,
        }
    }
}
