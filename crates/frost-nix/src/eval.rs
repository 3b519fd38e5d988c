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

//! Running `nix eval` and `nix build`.

use crate::error::{EvalError, EvalResult};
use crate::prelude::with_prelude;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, trace};

/// Something that can evaluate a Nix expression body to JSON.
///
/// The body is evaluated after the prelude, so it may use `prelude.*`.
pub trait Evaluate {
    fn eval_json(&self, body: &str) -> EvalResult<Value>;

    /// Evaluate and decode into `T`.
    fn eval<T: DeserializeOwned>(&self, body: &str) -> EvalResult<T>
    where
        Self: Sized,
    {
        serde_json::from_value(self.eval_json(body)?).map_err(EvalError::json_error)
    }
}

/// Evaluator backed by the `nix` command.
#[derive(Debug, Clone)]
pub struct NixEvaluator {
    program: String,
    show_trace: bool,
}

impl Default for NixEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl NixEvaluator {
    pub fn new() -> Self {
        Self {
            program: "nix".to_string(),
            show_trace: false,
        }
    }

    /// Use a different executable in place of `nix`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pass `--show-trace` to every invocation.
    pub fn with_show_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for `nix eval` on a full expression.
    fn eval_args(&self, expression: &str) -> Vec<String> {
        let mut args = vec![
            "eval".to_string(),
            "--json".to_string(),
            "--impure".to_string(),
        ];
        if self.show_trace {
            args.push("--show-trace".to_string());
        }
        args.push("--expr".to_string());
        args.push(expression.to_string());
        args
    }

    /// Realise `installable` and link the result at `out_link`.
    pub fn build(&self, installable: &str, out_link: &Path) -> EvalResult<()> {
        let mut command = Command::new(&self.program);
        command.arg("build").arg(installable).arg("--out-link").arg(out_link);
        if self.show_trace {
            command.arg("--show-trace");
        }
        debug!(installable, out_link = %out_link.display(), "Running nix build");
        self.run(command).map(|_| ())
    }

    fn run(&self, mut command: Command) -> EvalResult<Output> {
        let output = command
            .output()
            .map_err(|e| EvalError::spawn_error(&self.program, e))?;
        if !output.status.success() {
            return Err(EvalError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Evaluate for NixEvaluator {
    fn eval_json(&self, body: &str) -> EvalResult<Value> {
        let expression = with_prelude(body);
        trace!(%expression, "Evaluating Nix expression");

        let mut command = Command::new(&self.program);
        command.args(self.eval_args(&expression));
        let output = self.run(command)?;

        debug!(bytes = output.stdout.len(), "nix eval finished");
        serde_json::from_slice(&output.stdout).map_err(EvalError::json_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_args() {
        let args = NixEvaluator::new().with_show_trace(true).eval_args("1");
        assert_eq!(args, ["eval", "--json", "--impure", "--show-trace", "--expr", "1"]);

        let args = NixEvaluator::new().eval_args("1");
        assert!(!args.iter().any(|a| a == "--show-trace"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let evaluator = NixEvaluator::new().with_program("frost-test-no-such-program");
        assert!(matches!(
            evaluator.eval_json("1"),
            Err(EvalError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let evaluator = NixEvaluator::new().with_program("false");
        assert!(matches!(
            evaluator.eval_json("1"),
            Err(EvalError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_json_output_is_decode_error() {
        // `echo` prints its arguments back, which is not JSON.
        let evaluator = NixEvaluator::new().with_program("echo");
        assert!(matches!(
            evaluator.eval_json("1"),
            Err(EvalError::Json { .. })
        ));
    }
}
