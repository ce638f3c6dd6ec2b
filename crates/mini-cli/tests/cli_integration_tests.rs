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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const UNITS: &str = "\
[Unit]
hp = 10
name = $this

[Knight] : Unit
armor = 5
dmg = ($hp + $armor) * 2
";

fn mini_cmd() -> Command {
    Command::cargo_bin("mini").expect("Failed to find mini binary")
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    mini_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resave"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    mini_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mini"));
}

// ===== Resave Tests =====

#[test]
fn test_resave_full() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);
    let dest = dir.path().join("out.mini");

    mini_cmd().arg("resave").arg(&src).arg(&dest).assert().success();

    let out = fs::read_to_string(&dest).unwrap();
    assert!(out.contains("[Knight]\n"));
    assert!(out.contains("hp = 10"));
    assert!(out.contains("name = Knight"));
    assert!(out.contains("dmg = 30"));
}

#[test]
fn test_resave_diff() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);
    let dest = dir.path().join("out.mini");

    mini_cmd()
        .args(["resave", "--diff"])
        .arg(&src)
        .arg(&dest)
        .assert()
        .success();

    let out = fs::read_to_string(&dest).unwrap();
    let knight = out.split("[Knight]").nth(1).unwrap();
    assert!(knight.starts_with(" : Unit\n"));
    assert!(!knight.contains("hp = 10"));
    assert!(knight.contains("armor = 5"));
}

#[test]
fn test_resave_refuses_existing_destination() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);
    let dest = write_file(&dir, "out.mini", "keep me");

    mini_cmd()
        .arg("resave")
        .arg(&src)
        .arg(&dest)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("DestinationExists"));

    assert_eq!(fs::read_to_string(&dest).unwrap(), "keep me");
}

#[test]
fn test_resave_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);
    let dest = write_file(&dir, "out.mini", "old");

    mini_cmd()
        .args(["resave", "--force"])
        .arg(&src)
        .arg(&dest)
        .assert()
        .success();

    assert!(fs::read_to_string(&dest).unwrap().starts_with("[Unit]"));
}

#[test]
fn test_resave_missing_source() {
    let dir = TempDir::new().unwrap();
    mini_cmd()
        .arg("resave")
        .arg(dir.path().join("nope.mini"))
        .arg(dir.path().join("out.mini"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("SourceNotFound"));
}

// ===== Validate Tests =====

#[test]
fn test_validate_summary() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .arg("validate")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections: 2"))
        .stdout(predicate::str::contains("Properties: 6"));
}

#[test]
fn test_validate_cycle_fails() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "cycle.mini", "[A] : B\n[B] : A\n");

    mini_cmd()
        .arg("validate")
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnresolvableInheritance"))
        .stderr(predicate::str::contains("A -> B -> A"));
}

// ===== Show Tests =====

#[test]
fn test_show_single_section() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .args(["show", "--section", "Knight"])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Knight]"))
        .stdout(predicate::str::contains("[Unit]").not());
}

#[test]
fn test_show_json() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    let output = mini_cmd().args(["show", "--json"]).arg(&src).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["Knight"]["dmg"], serde_json::json!(30.0));
    assert_eq!(json["Knight"]["name"], "Knight");
}

#[test]
fn test_show_unknown_section() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .args(["show", "--section", "Dragon"])
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("section 'Dragon' not found"));
}

// ===== Set Tests =====

#[test]
fn test_set_writes_diff_in_place() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .arg("set")
        .arg(&src)
        .args(["Knight", "hp", "25"])
        .assert()
        .success();

    let out = fs::read_to_string(&src).unwrap();
    let knight = out.split("[Knight]").nth(1).unwrap();
    assert!(knight.contains("hp = 25"));

    // the parent is untouched
    let unit = out.split("[Knight]").next().unwrap();
    assert!(unit.contains("hp = 10"));
}

#[test]
fn test_set_negative_number() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .arg("set")
        .arg(&src)
        .args(["Unit", "hp", "-3"])
        .assert()
        .success();

    assert!(fs::read_to_string(&src).unwrap().contains("hp = -3"));
}

#[test]
fn test_set_rejects_null() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .arg("set")
        .arg(&src)
        .args(["Unit", "hp", "null"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnsupportedValueKind"));

    assert_eq!(fs::read_to_string(&src).unwrap(), UNITS);
}

#[test]
fn test_set_unknown_section() {
    let dir = TempDir::new().unwrap();
    let src = write_file(&dir, "units.mini", UNITS);

    mini_cmd()
        .arg("set")
        .arg(&src)
        .args(["Dragon", "hp", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownSection"))
        .stderr(predicate::str::contains("no section 'Dragon'"));
}
