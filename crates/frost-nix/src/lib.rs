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

//! Nix evaluator client for Frost.
//!
//! Everything Frost learns about a flake without reading its sources comes
//! from `nix eval`: output names, library members with their declaration
//! sites, packages, apps, module options and the Snowfall Lib
//! configuration.
//!
//! ```no_run
//! use frost_nix::{Flake, FlakeRef, NixEvaluator};
//! use std::path::Path;
//!
//! let evaluator = NixEvaluator::new();
//! let flake_ref = FlakeRef::resolve(Some("."), Path::new("/home/user/dotfiles"));
//! let flake = Flake::new(&evaluator, &flake_ref);
//! for member in flake.lib_members().unwrap() {
//!     println!("{}", member.dotted_path());
//! }
//! ```

mod error;
mod eval;
mod flake;
mod packages;
pub mod prelude;
mod snowfall;
mod store;

pub use error::{EvalError, EvalResult};
pub use eval::{Evaluate, NixEvaluator};
pub use flake::{Flake, FlakeRef, ModuleClass, OptionsQuery};
pub use packages::{
    summarize_apps, summarize_packages, AppSummary, PackageMeta, PackageSummary, SystemApp,
    SystemPackage,
};
pub use snowfall::SnowfallConfig;
pub use store::{is_store_path, strip_store_path};
