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

//! Typed queries against a flake's outputs.
//!
//! Every query loads the flake with `prelude.get-flake` and evaluates one
//! expression; results are decoded from the evaluator's JSON.

use crate::error::EvalResult;
use crate::eval::Evaluate;
use crate::packages::{SystemApp, SystemPackage};
use crate::prelude::string_literal;
use crate::snowfall::SnowfallConfig;
use frost_docs::LibMember;
use serde_json::Value;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const LIB_MEMBERS: &str = include_str!("queries/lib-members.nix");
const PACKAGES: &str = include_str!("queries/packages.nix");
const APPS: &str = include_str!("queries/apps.nix");
const MODULE_OPTIONS: &str = include_str!("queries/module-options.nix");

/// A flake reference as given on the command line, plus its resolved form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlakeRef {
    uri: Option<String>,
    resolved: String,
}

impl FlakeRef {
    /// Resolve `uri` against `cwd`.
    ///
    /// No URI means the working directory itself. References starting with
    /// `.` become absolute paths; anything else (`github:...`, `/abs/path`)
    /// is kept verbatim.
    pub fn resolve(uri: Option<&str>, cwd: &Path) -> Self {
        let resolved = match uri {
            None => cwd.to_string_lossy().into_owned(),
            Some(uri) if uri.starts_with('.') => {
                normalize(&cwd.join(uri)).to_string_lossy().into_owned()
            }
            Some(uri) => uri.to_string(),
        };
        Self {
            uri: uri.map(str::to_string),
            resolved,
        }
    }

    /// The reference exactly as the user wrote it.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn resolved(&self) -> &str {
        &self.resolved
    }

    /// Whether the flake lives on the local filesystem.
    pub fn is_local_path(&self) -> bool {
        self.resolved.starts_with('/') || self.resolved.starts_with('.')
    }
}

impl fmt::Display for FlakeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved)
    }
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Module output classes: `nixosModules`, `darwinModules`, `homeModules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleClass {
    Nixos,
    Darwin,
    Home,
}

impl ModuleClass {
    pub const ALL: [ModuleClass; 3] = [ModuleClass::Nixos, ModuleClass::Darwin, ModuleClass::Home];

    /// Name of the flake output holding modules of this class.
    pub fn output_name(self) -> &'static str {
        match self {
            ModuleClass::Nixos => "nixosModules",
            ModuleClass::Darwin => "darwinModules",
            ModuleClass::Home => "homeModules",
        }
    }
}

/// Where option declarations link to in generated documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsQuery {
    pub channel_name: String,
    pub module_url: String,
}

impl OptionsQuery {
    /// Channel and link base used for `flake`.
    ///
    /// Local flakes link into their own directory; remote ones get a
    /// placeholder link base.
    pub fn for_flake(flake: &FlakeRef) -> Self {
        if flake.is_local_path() {
            Self {
                channel_name: "<flake>".to_string(),
                module_url: format!("{}/", flake.resolved()),
            }
        } else {
            Self {
                channel_name: flake.resolved().to_string(),
                module_url: "<link>/".to_string(),
            }
        }
    }
}

/// Query handle for one flake.
pub struct Flake<'a, E: Evaluate> {
    evaluator: &'a E,
    flake: &'a FlakeRef,
}

impl<'a, E: Evaluate> Flake<'a, E> {
    pub fn new(evaluator: &'a E, flake: &'a FlakeRef) -> Self {
        Self { evaluator, flake }
    }

    pub fn reference(&self) -> &FlakeRef {
        self.flake
    }

    /// Wrap `body` so it can refer to the loaded flake as `flake`.
    fn query(&self, body: &str) -> String {
        format!(
            "let\n  flake = prelude.get-flake {};\nin\n{}\n",
            string_literal(self.flake.resolved()),
            body
        )
    }

    /// Apply a query function file to `{ flake; ... }`.
    fn call(&self, function: &str, extra_args: &str) -> String {
        self.query(&format!("({}) {{ inherit flake; {} }}", function.trim_end(), extra_args))
    }

    /// Names of the flake's top-level outputs.
    pub fn outputs(&self) -> EvalResult<Vec<String>> {
        self.evaluator.eval(&self.query("builtins.attrNames flake"))
    }

    /// One output as JSON, `null` when absent.
    pub fn output(&self, name: &str) -> EvalResult<Value> {
        self.evaluator
            .eval_json(&self.query(&format!("flake.{} or null", string_literal(name))))
    }

    /// Attribute names of one output, empty when absent.
    pub fn output_attrs(&self, name: &str) -> EvalResult<Vec<String>> {
        self.evaluator.eval(&self.query(&format!(
            "builtins.attrNames (flake.{} or {{ }})",
            string_literal(name)
        )))
    }

    /// Module names exported for `class`.
    pub fn modules(&self, class: ModuleClass) -> EvalResult<Vec<String>> {
        self.output_attrs(class.output_name())
    }

    /// `_snowfall.config`, if the flake was built with Snowfall Lib.
    pub fn snowfall_config(&self) -> EvalResult<Option<SnowfallConfig>> {
        self.evaluator
            .eval(&self.query("flake._snowfall.config or null"))
    }

    /// Every non-set value under the flake's library, flattened.
    ///
    /// Names starting with `_` are hidden and the top-level
    /// `overrideDerivation` helper is dropped.
    pub fn lib_members(&self) -> EvalResult<Vec<LibMember>> {
        let members: Vec<LibMember> = self.evaluator.eval(&self.call(LIB_MEMBERS, ""))?;
        debug!(
            flake = %self.flake,
            members = members.len(),
            unlocated = members.iter().filter(|m| m.location.is_none()).count(),
            "Loaded library members"
        );
        Ok(members)
    }

    /// One record per (system, package).
    pub fn packages(&self) -> EvalResult<Vec<SystemPackage>> {
        self.evaluator.eval(&self.call(PACKAGES, ""))
    }

    /// One record per (system, app).
    pub fn apps(&self) -> EvalResult<Vec<SystemApp>> {
        self.evaluator.eval(&self.call(APPS, ""))
    }

    /// Documented NixOS module options, sorted with `enable*` and
    /// `package*` options first.
    pub fn module_options(&self, options: &OptionsQuery) -> EvalResult<Vec<Value>> {
        let args = format!(
            "channel-name = {}; module-url = {};",
            string_literal(&options.channel_name),
            string_literal(&options.module_url)
        );
        self.evaluator.eval(&self.call(MODULE_OPTIONS, &args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::prelude::with_prelude;
    use serde_json::json;
    use std::cell::RefCell;

    /// Answers with the first canned value whose marker occurs in the body.
    struct CannedEvaluator {
        answers: Vec<(&'static str, Value)>,
        seen: RefCell<Vec<String>>,
    }

    impl CannedEvaluator {
        fn new(answers: Vec<(&'static str, Value)>) -> Self {
            Self {
                answers,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Evaluate for CannedEvaluator {
        fn eval_json(&self, body: &str) -> EvalResult<Value> {
            self.seen.borrow_mut().push(body.to_string());
            self.answers
                .iter()
                .find(|(marker, _)| body.contains(marker))
                .map(|(_, value)| value.clone())
                .ok_or_else(|| EvalError::Failed {
                    status: "exit status: 1".into(),
                    stderr: format!("no canned answer for {body}"),
                })
        }
    }

    fn local() -> FlakeRef {
        FlakeRef::resolve(Some("./site"), Path::new("/home/user/project"))
    }

    #[test]
    fn test_resolve_relative() {
        let flake = FlakeRef::resolve(Some("../other/./flake"), Path::new("/home/user/project"));
        assert_eq!(flake.resolved(), "/home/user/other/flake");
        assert_eq!(flake.uri(), Some("../other/./flake"));
        assert!(flake.is_local_path());
    }

    #[test]
    fn test_resolve_defaults_to_cwd() {
        let flake = FlakeRef::resolve(None, Path::new("/srv/flake"));
        assert_eq!(flake.resolved(), "/srv/flake");
        assert_eq!(flake.uri(), None);
    }

    #[test]
    fn test_remote_reference_is_kept() {
        let flake = FlakeRef::resolve(Some("github:snowfallorg/cowsay"), Path::new("/tmp"));
        assert_eq!(flake.resolved(), "github:snowfallorg/cowsay");
        assert!(!flake.is_local_path());
    }

    #[test]
    fn test_outputs_query_loads_flake() {
        let evaluator = CannedEvaluator::new(vec![("attrNames flake", json!(["lib", "packages"]))]);
        let flake_ref = local();
        let outputs = Flake::new(&evaluator, &flake_ref).outputs().unwrap();

        assert_eq!(outputs, ["lib", "packages"]);
        let seen = evaluator.seen.borrow();
        assert!(seen[0].contains("prelude.get-flake \"/home/user/project/site\""));
    }

    #[test]
    fn test_modules_use_class_output() {
        let evaluator = CannedEvaluator::new(vec![("darwinModules", json!(["dock"]))]);
        let flake_ref = local();
        let modules = Flake::new(&evaluator, &flake_ref)
            .modules(ModuleClass::Darwin)
            .unwrap();
        assert_eq!(modules, ["dock"]);
    }

    #[test]
    fn test_lib_members_decode() {
        let evaluator = CannedEvaluator::new(vec![(
            "get-members",
            json!([
                { "name": "mkOpt", "path": [], "type": "lambda",
                  "location": { "file": "/src/lib/default.nix", "line": 12, "column": 3 } },
                { "name": "enabled", "path": [], "type": "set", "location": null }
            ]),
        )]);
        let flake_ref = local();
        let members = Flake::new(&evaluator, &flake_ref).lib_members().unwrap();

        assert_eq!(members.len(), 2);
        assert!(members[0].location.is_some());
        assert!(members[1].location.is_none());
    }

    #[test]
    fn test_missing_snowfall_config() {
        let evaluator = CannedEvaluator::new(vec![("_snowfall.config", Value::Null)]);
        let flake_ref = local();
        let config = Flake::new(&evaluator, &flake_ref).snowfall_config().unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let evaluator = CannedEvaluator::new(vec![("attrNames flake", json!({ "not": "a list" }))]);
        let flake_ref = local();
        assert!(matches!(
            Flake::new(&evaluator, &flake_ref).outputs(),
            Err(EvalError::Json { .. })
        ));
    }

    #[test]
    fn test_module_options_arguments() {
        let evaluator = CannedEvaluator::new(vec![("module-url", json!([]))]);
        let flake_ref = local();
        let query = OptionsQuery::for_flake(&flake_ref);
        Flake::new(&evaluator, &flake_ref)
            .module_options(&query)
            .unwrap();

        let seen = evaluator.seen.borrow();
        assert!(seen[0].contains("channel-name = \"<flake>\";"));
        assert!(seen[0].contains("module-url = \"/home/user/project/site/\";"));
    }

    #[test]
    fn test_options_query_for_remote_flake() {
        let flake_ref = FlakeRef::resolve(Some("github:owner/repo"), Path::new("/"));
        let query = OptionsQuery::for_flake(&flake_ref);
        assert_eq!(query.channel_name, "github:owner/repo");
        assert_eq!(query.module_url, "<link>/");
    }

    #[test]
    fn test_generated_queries_are_valid_nix() {
        let evaluator = CannedEvaluator::new(vec![("", json!([]))]);
        let flake_ref = local();
        let flake = Flake::new(&evaluator, &flake_ref);
        flake.outputs().unwrap();
        flake.output_attrs("packages").unwrap();
        flake.lib_members().unwrap();
        flake.packages().unwrap();
        flake.apps().unwrap();
        flake
            .module_options(&OptionsQuery::for_flake(&flake_ref))
            .unwrap();

        for body in evaluator.seen.borrow().iter() {
            let expression = with_prelude(body);
            if let Err(e) = frost_core::parse(&expression) {
                panic!("{e}\n{expression}");
            }
        }
    }
}
