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

//! Snowfall Lib project configuration.

use crate::flake::FlakeRef;
use crate::store::{is_store_path, strip_store_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

const DEFAULT_LIB_DIR: &str = "lib";

/// `_snowfall.config` of a Snowfall Lib flake.
///
/// Only the fields needed to locate library sources are typed; the rest
/// are kept so the configuration can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowfallConfig {
    /// Flake source root, usually a store path.
    pub root: String,
    /// Library directory relative to `root`.
    #[serde(rename = "lib-dir", default, skip_serializing_if = "Option::is_none")]
    pub lib_dir: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SnowfallConfig {
    /// Directory holding the flake's library sources.
    ///
    /// For a local flake the evaluator reports `root` inside the store
    /// copy; it is mapped back onto the working tree so the scanned files
    /// are the ones the user edits.
    pub fn library_root(&self, flake: &FlakeRef) -> PathBuf {
        let root = if flake.is_local_path() && is_store_path(&self.root) {
            PathBuf::from(flake.resolved()).join(strip_store_path(&self.root))
        } else {
            PathBuf::from(&self.root)
        };
        root.join(self.lib_dir.as_deref().unwrap_or(DEFAULT_LIB_DIR))
    }
}
