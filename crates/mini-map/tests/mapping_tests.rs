// MINI - Sectioned documents with inheritance and derived values
//
// Copyright (c) 2025 The MINI contributors.
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

//! Mapping records straight from files on disk.

use mini_core::MiniErrorKind;
use mini_map::{build_many, build_one, mini_record, MapError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

mini_record! {
    #[derive(Debug, PartialEq)]
    pub struct Creature {
        pub hp: u32,
        pub name: String,
        pub dmg: f64,
        pub flying: Option<bool>,
    }
}

const BESTIARY: &str = "\
[Beast]
hp = 20
name = $this
dmg = ($hp / 4)

[Wolf] : Beast
hp = 12
dmg = ($hp / 4)

[Bat] : Beast
flying = true
";

fn write(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("bestiary.mini");
    fs::write(&path, text).unwrap();
    path
}

// =============================================================================
// build_one
// =============================================================================

#[test]
fn test_build_one_reads_resolved_values() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, BESTIARY);

    let wolf: Creature = build_one("Wolf", &path).unwrap();
    assert_eq!(
        wolf,
        Creature {
            hp: 12,
            name: "Wolf".into(),
            dmg: 3.0,
            flying: None,
        }
    );
}

#[test]
fn test_build_one_inherited_only_section() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, BESTIARY);

    let bat: Creature = build_one("Bat", &path).unwrap();
    assert_eq!(bat.hp, 20);
    assert_eq!(bat.name, "Bat");
    assert_eq!(bat.dmg, 5.0);
    assert_eq!(bat.flying, Some(true));
}

#[test]
fn test_build_one_unknown_section() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, BESTIARY);

    let err = build_one::<Creature>("Dragon", &path).unwrap_err();
    assert!(matches!(err, MapError::SectionNotFound(ref name) if name == "Dragon"));
}

// =============================================================================
// build_many
// =============================================================================

#[test]
fn test_build_many_in_document_order() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, BESTIARY);

    let all: Vec<Creature> = build_many(&path).unwrap();
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Beast", "Wolf", "Bat"]);
}

#[test]
fn test_build_many_kind_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "[A]\nhp = lots\nname = a\ndmg = 1\n");

    let err = build_many::<Creature>(&path).unwrap_err();
    match err {
        MapError::KindMismatch { section, field, expected, found } => {
            assert_eq!(section, "A");
            assert_eq!(field, "hp");
            assert_eq!(expected, "integer (u32)");
            assert_eq!(found, "text");
        }
        other => panic!("unexpected {:?}", other),
    }
}

// =============================================================================
// Load errors propagate unchanged
// =============================================================================

#[test]
fn test_missing_file_is_source_not_found() {
    let dir = TempDir::new().unwrap();
    let err = build_many::<Creature>(dir.path().join("nope.mini")).unwrap_err();
    match err {
        MapError::Document(e) => assert_eq!(e.kind, MiniErrorKind::SourceNotFound),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_unresolvable_inheritance_propagates() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "[A] : B\n[B] : A\n");
    let err = build_one::<Creature>("A", &path).unwrap_err();
    match err {
        MapError::Document(e) => assert_eq!(e.kind, MiniErrorKind::UnresolvableInheritance),
        other => panic!("unexpected {:?}", other),
    }
}
