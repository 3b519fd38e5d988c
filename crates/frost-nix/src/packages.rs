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

//! Package and app summaries.
//!
//! The evaluator reports one record per (system, name); summaries group
//! them by name, in first-seen order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Positions inside nixpkgs' trivial builders point at the builder, not
/// at the package.
const TRIVIAL_BUILDERS: &str = "/pkgs/build-support/trivial-builders/";

/// Package `meta` as far as the summary needs it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMeta {
    pub available: Option<bool>,
    pub broken: Option<bool>,
    pub insecure: Option<bool>,
    pub unfree: Option<bool>,
    pub unsupported: Option<bool>,
    pub outputs_to_install: Option<Vec<String>>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub license: Option<Value>,
    pub homepage: Option<Value>,
    pub maintainers: Option<Vec<Value>>,
    pub snowfall: Option<Value>,
    pub position: Option<String>,
}

/// `packages.<system>.<name>` as reported by the evaluator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemPackage {
    pub system: String,
    pub name: String,
    #[serde(default)]
    pub meta: Option<PackageMeta>,
}

/// `apps.<system>.<name>` as reported by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemApp {
    pub system: String,
    pub name: String,
}

/// One package across all systems that provide it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub name: String,
    pub systems: Vec<String>,
    pub available: bool,
    pub broken: bool,
    pub insecure: bool,
    pub unfree: bool,
    pub unsupported: bool,
    pub outputs: Vec<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub license: Option<Value>,
    pub homepage: Option<Value>,
    pub maintainers: Vec<Value>,
    pub snowfall: Value,
    pub position: Option<String>,
}

impl PackageSummary {
    /// Summary fields come from the first system seen.
    fn from_meta(name: String, meta: PackageMeta) -> Self {
        Self {
            name,
            systems: Vec::new(),
            available: meta.available.unwrap_or(true),
            broken: meta.broken.unwrap_or(false),
            insecure: meta.insecure.unwrap_or(false),
            unfree: meta.unfree.unwrap_or(false),
            unsupported: meta.unsupported.unwrap_or(false),
            outputs: meta.outputs_to_install.unwrap_or_default(),
            description: meta.description,
            long_description: meta.long_description,
            license: meta.license,
            homepage: meta.homepage,
            maintainers: meta.maintainers.unwrap_or_default(),
            snowfall: meta.snowfall.unwrap_or_else(|| Value::Object(Map::new())),
            position: meta
                .position
                .filter(|position| !position.contains(TRIVIAL_BUILDERS)),
        }
    }
}

/// One app across all systems that provide it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSummary {
    pub name: String,
    pub systems: Vec<String>,
}

/// Group per-system package records by name.
pub fn summarize_packages(packages: Vec<SystemPackage>) -> Vec<PackageSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<PackageSummary> = Vec::new();

    for package in packages {
        let slot = match index.get(&package.name) {
            Some(&slot) => slot,
            None => {
                index.insert(package.name.clone(), summaries.len());
                summaries.push(PackageSummary::from_meta(
                    package.name,
                    package.meta.unwrap_or_default(),
                ));
                summaries.len() - 1
            }
        };
        summaries[slot].systems.push(package.system);
    }

    summaries
}

/// Group per-system app records by name.
pub fn summarize_apps(apps: Vec<SystemApp>) -> Vec<AppSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<AppSummary> = Vec::new();

    for app in apps {
        let slot = *index.entry(app.name.clone()).or_insert_with(|| {
            summaries.push(AppSummary {
                name: app.name.clone(),
                systems: Vec::new(),
            });
            summaries.len() - 1
        });
        summaries[slot].systems.push(app.system);
    }

    summaries
}
