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

//! Per-run syntax tree cache.
//!
//! One [`AstCache`] is created per documentation run and passed by `&mut`
//! to the location matcher and the fallback scanner, so a file reached by
//! both is read and parsed exactly once. Trees are kept until the cache is
//! dropped; nothing is persisted.

use crate::error::{DocsError, DocsResult};
use frost_core::{parse_with_limits, Limits, Node};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Source of file contents for the cache.
pub trait SourceLoader {
    /// Read the file at `path`, rejecting files larger than
    /// `limits.max_file_size`.
    fn load(&mut self, path: &Path, limits: &Limits) -> DocsResult<String>;
}

/// Reads sources from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&mut self, path: &Path, limits: &Limits) -> DocsResult<String> {
        let metadata = fs::metadata(path).map_err(|e| DocsError::io_error(path, e))?;
        let max = limits.max_file_size as u64;
        if metadata.len() > max {
            return Err(DocsError::file_too_large(path, metadata.len(), max));
        }
        fs::read_to_string(path).map_err(|e| DocsError::io_error(path, e))
    }
}

/// Cache performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to load the file.
    pub misses: u64,
    /// Successful parses.
    pub parses: u64,
}

/// Memo from file path to parsed tree.
#[derive(Debug)]
pub struct AstCache<L: SourceLoader = FsLoader> {
    loader: L,
    limits: Limits,
    trees: HashMap<PathBuf, Node>,
    stats: CacheStatistics,
}

impl AstCache<FsLoader> {
    /// Cache reading from the filesystem with default limits.
    pub fn new() -> Self {
        Self::with_loader(FsLoader)
    }
}

impl Default for AstCache<FsLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SourceLoader> AstCache<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            limits: Limits::default(),
            trees: HashMap::new(),
            stats: CacheStatistics::default(),
        }
    }

    /// Replace the parse limits used for files not yet cached.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The tree for `path`, reading and parsing the file on first use.
    ///
    /// A failed read or parse is not cached; the error is returned and the
    /// next call retries.
    pub fn get_or_parse(&mut self, path: &Path) -> DocsResult<&Node> {
        if self.trees.contains_key(path) {
            self.stats.hits += 1;
            trace!(path = %path.display(), "AST cache hit");
        } else {
            self.stats.misses += 1;
            let source = self.loader.load(path, &self.limits)?;
            let tree = parse_with_limits(&source, &self.limits)
                .map_err(|e| DocsError::parse_error(path, e))?;
            self.stats.parses += 1;
            debug!(path = %path.display(), bytes = source.len(), "Parsed Nix source");
            self.trees.insert(path.to_path_buf(), tree);
        }
        Ok(&self.trees[path])
    }

    /// Whether `path` has already been parsed.
    pub fn contains(&self, path: &Path) -> bool {
        self.trees.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Get current cache statistics.
    pub fn statistics(&self) -> CacheStatistics {
        self.stats.clone()
    }
}
