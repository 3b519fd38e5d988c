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

//! Writing generated JSON artifacts.
//!
//! The output directory holds one sub-directory per collection
//! (`apps`, `packages`, `options`, `lib`, `meta`, `shells`). A collection
//! is emptied before it is written so stale files from earlier runs never
//! survive.

use crate::error::CliError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Remove `dir` and everything under it, then recreate it empty.
pub fn clear_collection(dir: &Path) -> Result<(), CliError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(CliError::io_error(dir, e)),
    }
    fs::create_dir_all(dir).map_err(|e| CliError::io_error(dir, e))
}

/// Serialize `value` as compact JSON into `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_vec(value).map_err(CliError::json_format)?;
    fs::write(path, json).map_err(|e| CliError::io_error(path, e))
}

/// Clear `root/name` and write each item as `<prefix>-<index>.json`.
///
/// Returns the collection directory.
pub fn write_collection<'a, T, I>(
    root: &Path,
    name: &str,
    prefix: &str,
    items: I,
) -> Result<PathBuf, CliError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let dir = root.join(name);
    clear_collection(&dir)?;

    let mut count = 0usize;
    for (index, item) in items.into_iter().enumerate() {
        write_json(&dir.join(format!("{prefix}-{index}.json")), item)?;
        count += 1;
    }
    debug!(collection = name, count, "Wrote collection");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_collection_replaces_stale_files() {
        let root = TempDir::new().unwrap();
        let items = vec![json!({ "a": 1 }), json!({ "a": 2 }), json!({ "a": 3 })];
        write_collection(root.path(), "lib", "entry", &items).unwrap();
        write_collection(root.path(), "lib", "entry", &items[..1]).unwrap();

        let files: Vec<_> = fs::read_dir(root.path().join("lib")).unwrap().collect();
        assert_eq!(files.len(), 1);

        let written: Value =
            serde_json::from_slice(&fs::read(root.path().join("lib/entry-0.json")).unwrap()).unwrap();
        assert_eq!(written, json!({ "a": 1 }));
    }

    #[test]
    fn test_clear_creates_missing_directory() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("shells");
        clear_collection(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
