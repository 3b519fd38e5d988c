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

//! Frost CLI library.
//!
//! The `frost` binary documents a Nix flake:
//!
//! - **generate**: evaluate the flake and write its data as JSON
//! - **build**: generate, then build the Frost UI site with Nix
//! - **lib-docs**: recover library documentation from a saved member
//!   listing, without running Nix
//!
//! ```no_run
//! use frost_cli::commands::lib_docs;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), frost_cli::error::CliError> {
//! lib_docs(Path::new("members.json"), Some(Path::new("lib")), None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
