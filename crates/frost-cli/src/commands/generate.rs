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

//! Generate command - evaluate a flake and write its documentation data

use super::{current_dir, source_limits, GlobalOptions};
use crate::error::CliError;
use crate::output::{clear_collection, write_collection, write_json};
use colored::Colorize;
use frost_core::Limits;
use frost_docs::{build_documentation_map_with_cache, AstCache, DocumentationMap};
use frost_nix::{
    summarize_apps, summarize_packages, AppSummary, Evaluate, Flake, FlakeRef, ModuleClass,
    NixEvaluator, OptionsQuery, PackageSummary, SnowfallConfig,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Module names per module class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleNames {
    pub nixos: Vec<String>,
    pub darwin: Vec<String>,
    pub home: Vec<String>,
}

/// Everything written for one flake.
#[derive(Debug, Clone)]
pub struct SiteData {
    pub flake: FlakeRef,
    pub snowfall: Option<SnowfallConfig>,
    pub nix_config: Value,
    pub description: Value,
    pub lib: DocumentationMap,
    pub packages: Vec<PackageSummary>,
    pub apps: Vec<AppSummary>,
    pub options: Vec<Value>,
    pub modules: ModuleNames,
}

#[derive(Serialize)]
struct Meta<'a> {
    snowfall: &'a Option<SnowfallConfig>,
    flake: FlakeMeta<'a>,
    modules: &'a ModuleNames,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlakeMeta<'a> {
    uri: Option<&'a str>,
    resolved: &'a str,
    nix_config: &'a Value,
    description: &'a Value,
}

/// Query the evaluator for everything the site needs and recover library
/// documentation from the flake's sources.
pub fn collect_site<E: Evaluate>(
    evaluator: &E,
    flake_ref: &FlakeRef,
    limits: Limits,
) -> Result<SiteData, CliError> {
    let flake = Flake::new(evaluator, flake_ref);

    let outputs = flake.outputs()?;
    debug!(?outputs, "Flake outputs");

    let snowfall = flake.snowfall_config()?;
    debug!(snowfall = snowfall.is_some(), "Snowfall Lib config");

    let nix_config = flake.output("nixConfig")?;
    let description = flake.output("description")?;

    let members = flake.lib_members()?;
    let library_root = snowfall
        .as_ref()
        .map(|config| config.library_root(flake_ref));
    let mut cache = AstCache::new().with_limits(limits);
    let lib = build_documentation_map_with_cache(&members, library_root.as_deref(), &mut cache)?;
    info!(
        members = members.len(),
        documented = lib.len(),
        "Recovered library documentation"
    );

    let packages = summarize_packages(flake.packages()?);
    let options = flake.module_options(&OptionsQuery::for_flake(flake_ref))?;
    let apps = summarize_apps(flake.apps()?);

    let modules = ModuleNames {
        nixos: flake.modules(ModuleClass::Nixos)?,
        darwin: flake.modules(ModuleClass::Darwin)?,
        home: flake.modules(ModuleClass::Home)?,
    };

    Ok(SiteData {
        flake: flake_ref.clone(),
        snowfall,
        nix_config,
        description,
        lib,
        packages,
        apps,
        options,
        modules,
    })
}

/// Write every collection of `data` under `dir`.
pub fn write_site(dir: &Path, data: &SiteData) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|e| CliError::io_error(dir, e))?;

    write_collection(dir, "apps", "app", &data.apps)?;
    write_collection(dir, "packages", "package", &data.packages)?;
    write_collection(dir, "options", "option", &data.options)?;
    write_collection(dir, "lib", "entry", data.lib.values())?;

    let meta_dir = dir.join("meta");
    clear_collection(&meta_dir)?;
    let meta = Meta {
        snowfall: &data.snowfall,
        flake: FlakeMeta {
            uri: data.flake.uri(),
            resolved: data.flake.resolved(),
            nix_config: &data.nix_config,
            description: &data.description,
        },
        modules: &data.modules,
    };
    write_json(&meta_dir.join("data.json"), &meta)?;

    clear_collection(&dir.join("shells"))?;
    Ok(())
}

/// Evaluate `flake` and write its documentation data to `output`.
pub fn generate(flake: Option<&str>, output: &Path, options: GlobalOptions) -> Result<(), CliError> {
    let cwd = current_dir()?;
    let flake_ref = FlakeRef::resolve(flake, &cwd);
    info!(flake = %flake_ref, "Generate");

    let evaluator = NixEvaluator::new().with_show_trace(options.show_trace);
    let data = collect_site(&evaluator, &flake_ref, source_limits())?;
    write_site(output, &data)?;

    println!("{} {}", "✓".green().bold(), output.display());
    println!("  Library entries: {}", data.lib.len());
    println!("  Packages: {}", data.packages.len());
    println!("  Apps: {}", data.apps.len());
    println!("  Options: {}", data.options.len());
    Ok(())
}
