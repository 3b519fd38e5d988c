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

//! Helpers shared by every evaluated expression.
//!
//! Each query is evaluated as `PRELUDE` followed by the query body, so
//! queries can refer to the `prelude` attribute set.

/// `let prelude = { ... }; in`, awaiting the query body.
pub const PRELUDE: &str = r#"let
  prelude = {
    system = builtins.currentSystem;

    flatten = value:
      if builtins.isList value then
        builtins.concatMap prelude.flatten value
      else
        [ value ];

    has-prefix = prefix: text:
      (builtins.substring 0 (builtins.stringLength prefix) text) == prefix;

    map-attrs-to-list = f: attrs:
      builtins.map (name: f name attrs.${name}) (builtins.attrNames attrs);

    name-value-pair = name: value: { inherit name value; };

    filter-attrs = predicate: attrs:
      builtins.listToAttrs
        (builtins.concatMap
          (name:
            if predicate name attrs.${name} then
              [ (prelude.name-value-pair name attrs.${name}) ]
            else
              [ ])
          (builtins.attrNames attrs));

    get-flake = path:
      let
        is-path = (prelude.has-prefix "/" path) || (prelude.has-prefix "." path);
        flake-uri = if is-path then "path:${builtins.toString path}" else path;
      in
      builtins.getFlake flake-uri;
  };
in
"#;

/// Prefix `body` with the prelude.
pub fn with_prelude(body: &str) -> String {
    let mut expression = String::with_capacity(PRELUDE.len() + body.len());
    expression.push_str(PRELUDE);
    expression.push_str(body);
    expression
}

/// Quote `value` as a Nix string literal.
///
/// ```
/// use frost_nix::prelude::string_literal;
///
/// assert_eq!(string_literal("github:owner/repo"), r#""github:owner/repo""#);
/// assert_eq!(string_literal("a\"b${c}"), r#""a\"b\${c}""#);
/// ```
pub fn string_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '$' if chars.peek() == Some(&'{') => quoted.push_str("\\$"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_parses() {
        let expression = with_prelude("prelude.system");
        let root = frost_core::parse(&expression);
        assert!(root.is_ok(), "{root:?}");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(string_literal("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(string_literal("cost $5"), "\"cost $5\"");
    }
}
