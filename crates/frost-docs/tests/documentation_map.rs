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

//! End-to-end documentation map tests over temporary library trees.

use frost_core::Limits;
use frost_docs::{
    build_documentation_map, build_documentation_map_with_cache, scan_fallback, AstCache,
    DocsError, DocsResult, LibMember, Location, SourceLoader, ValueKind,
};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

const LIB_DEFAULT: &str = r#"{ lib, ... }:

let
  inherit (lib) mkOption types;
in
rec {
  ## Create a NixOS module option.
  ##
  ## ```nix
  ## lib.mkOpt nixpkgs.lib.types.str "My default" "Description of my option."
  ## ```
  mkOpt = type: default: description:
    mkOption { inherit type default description; };

  /* Quickly enable an option. */
  enabled = {
    enable = true;
  };

  disabled = { enable = false; }; # Quickly disable an option.

  nested = {
    # Inner helper.
    mkOpt = x: x;
  };
}
"#;

fn lib_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("module")).unwrap();
    fs::write(dir.path().join("default.nix"), LIB_DEFAULT).unwrap();
    fs::write(
        dir.path().join("module/default.nix"),
        "{ lib, ... }:\n{\n  # Merge two lists.\n  concat = a: b: a ++ b;\n}\n",
    )
    .unwrap();
    dir
}

fn located(name: &str, path: &[&str], file: &Path, line: usize, column: usize) -> LibMember {
    LibMember {
        name: name.to_string(),
        path: path.iter().map(|p| p.to_string()).collect(),
        kind: ValueKind::Lambda,
        location: Some(Location {
            file: file.to_path_buf(),
            line,
            column,
        }),
    }
}

fn unlocated(name: &str) -> LibMember {
    LibMember {
        name: name.to_string(),
        path: Vec::new(),
        kind: ValueKind::Set,
        location: None,
    }
}

#[test]
fn test_located_and_unlocated_members() {
    let dir = lib_tree();
    let default = dir.path().join("default.nix");
    let members = vec![
        located("mkOpt", &[], &default, 12, 3),
        unlocated("enabled"),
        unlocated("disabled"),
        unlocated("concat"),
    ];

    let docs = build_documentation_map(&members, Some(dir.path())).unwrap();
    assert_eq!(docs.len(), 4);

    let comment = |name: &str| {
        docs.values()
            .find(|entry| entry.member.name == name)
            .map(|entry| entry.comment.clone())
            .unwrap()
    };
    assert_eq!(
        comment("mkOpt"),
        "Create a NixOS module option.\n\n```nix\nlib.mkOpt nixpkgs.lib.types.str \"My default\" \"Description of my option.\"\n```"
    );
    assert_eq!(comment("enabled"), "Quickly enable an option.");
    assert_eq!(comment("disabled"), "Quickly disable an option.");
    assert_eq!(comment("concat"), "Merge two lists.");

    let concat = docs.values().find(|e| e.member.name == "concat").unwrap();
    let location = concat.member.location.as_ref().unwrap();
    assert_eq!(location.file, dir.path().join("module/default.nix"));
    assert_eq!((location.line, location.column), (4, 3));
}

#[test]
fn test_position_selects_nested_binding() {
    let dir = lib_tree();
    let default = dir.path().join("default.nix");
    let members = vec![located("mkOpt", &["nested"], &default, 24, 5)];

    let docs = build_documentation_map(&members, None).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs.values().next().unwrap().comment, "Inner helper.");
}

#[test]
fn test_trailing_comment_is_documentation() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.nix");
    fs::write(&file, "{\n  bar = 1; # hello\n}\n").unwrap();

    let docs = build_documentation_map(&[located("bar", &[], &file, 2, 3)], None).unwrap();
    assert_eq!(docs.values().next().unwrap().comment, "hello");
}

#[test]
fn test_last_file_wins_with_one_duplicate() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.nix"), "{ baz = 1; # A\n}\n").unwrap();
    fs::write(dir.path().join("b.nix"), "{ baz = 2; # B\n}\n").unwrap();

    let mut cache = AstCache::new();
    let outcome = scan_fallback(Some(dir.path()), &[unlocated("baz")], &mut cache).unwrap();

    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries.values().next().unwrap().comment, "B");
    assert_eq!(outcome.duplicates, ["baz"]);
}

#[test]
fn test_absent_binding_is_not_an_error() {
    let dir = lib_tree();
    let default = dir.path().join("default.nix");
    let members = vec![
        located("missing", &[], &default, 12, 3),
        unlocated("alsoMissing"),
    ];

    let docs = build_documentation_map(&members, Some(dir.path())).unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_missing_library_root_leaves_members_undocumented() {
    let docs = build_documentation_map(&[unlocated("enabled")], None).unwrap();
    assert!(docs.is_empty());
}

#[test]
fn test_parse_failure_aborts_the_run() {
    let dir = lib_tree();
    fs::write(dir.path().join("broken.nix"), "{ a = 1 }").unwrap();

    let err = build_documentation_map(&[unlocated("enabled")], Some(dir.path())).unwrap_err();
    match err {
        DocsError::Parse { path, .. } => assert_eq!(path, dir.path().join("broken.nix")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_output_is_deterministic() {
    let dir = lib_tree();
    let default = dir.path().join("default.nix");
    let members = vec![
        unlocated("concat"),
        located("mkOpt", &[], &default, 12, 3),
        unlocated("enabled"),
    ];

    let render = || {
        let docs = build_documentation_map(&members, Some(dir.path())).unwrap();
        let entries: Vec<_> = docs.values().collect();
        serde_json::to_vec(&entries).unwrap()
    };
    assert_eq!(render(), render());
}

/// Filesystem loader that counts how often it is asked for each file.
#[derive(Clone, Default)]
struct CountingLoader {
    loads: Rc<Cell<usize>>,
}

impl SourceLoader for CountingLoader {
    fn load(&mut self, path: &Path, limits: &Limits) -> DocsResult<String> {
        self.loads.set(self.loads.get() + 1);
        frost_docs::FsLoader.load(path, limits)
    }
}

#[test]
fn test_shared_cache_parses_each_file_once() {
    let dir = lib_tree();
    let default: PathBuf = dir.path().join("default.nix");
    let loader = CountingLoader::default();
    let loads = Rc::clone(&loader.loads);
    let mut cache = AstCache::with_loader(loader);

    // default.nix is reached by both the matcher and the scanner.
    let members = vec![located("mkOpt", &[], &default, 12, 3), unlocated("enabled")];
    let docs = build_documentation_map_with_cache(&members, Some(dir.path()), &mut cache).unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(loads.get(), 2);
    assert_eq!(cache.statistics().parses, 2);
    assert!(cache.statistics().hits >= 1);
}
