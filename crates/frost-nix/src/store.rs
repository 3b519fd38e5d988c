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

//! Nix store path helpers.
//!
//! A store path has the form `/nix/store/<hash>-<name>[/<rest>]`, where
//! `<hash>` is 32 word characters and `<name>` contains no `/`.

const STORE_DIR: &str = "/nix/store/";
const HASH_LEN: usize = 32;

/// Split a store path into the part after `<hash>-<name>/`.
///
/// Returns `Some("")` for a bare store object and `None` when `path` is
/// not a store path at all.
fn store_relative(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(STORE_DIR)?;
    let hash = rest.as_bytes().get(..HASH_LEN)?;
    if !hash.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_') {
        return None;
    }

    let rest = rest[HASH_LEN..].strip_prefix('-')?;
    let (name, tail) = match rest.split_once('/') {
        Some((name, tail)) => (name, Some(tail)),
        None => (rest, None),
    };
    if name.is_empty() {
        return None;
    }

    match tail {
        None => Some(""),
        Some("") => None,
        Some(tail) => Some(tail),
    }
}

/// Whether `path` points into the Nix store.
pub fn is_store_path(path: &str) -> bool {
    store_relative(path).is_some()
}

/// Remove the `/nix/store/<hash>-<name>` prefix from a store path.
///
/// Paths outside the store are returned unchanged.
///
/// ```
/// use frost_nix::strip_store_path;
///
/// let path = "/nix/store/00000000000000000000000000000000-source/lib/default.nix";
/// assert_eq!(strip_store_path(path), "lib/default.nix");
/// assert_eq!(strip_store_path("/home/user/flake"), "/home/user/flake");
/// ```
pub fn strip_store_path(path: &str) -> &str {
    store_relative(path).unwrap_or(path)
}
