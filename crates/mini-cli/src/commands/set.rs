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

//! Set command - change one property and save in place

use super::serialize_mode;
use crate::error::CliError;
use colored::Colorize;
use mini_core::{infer_literal, Document, MiniResult, PropertyValue};
use tracing::debug;

/// Read a command-line value.
///
/// Valid JSON scalars keep their JSON kind, so `"10"` stays text. Anything
/// that is not JSON goes through literal inference. JSON `null`, arrays and
/// objects are `UnsupportedValueKind`.
pub fn parse_value(raw: &str) -> MiniResult<PropertyValue> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => PropertyValue::try_from(json),
        Err(_) => Ok(infer_literal(raw)),
    }
}

/// Set `section.key` in `file` and save it back.
///
/// The file is saved in diff form unless `full` is set.
pub fn set(file: &str, section: &str, key: &str, value: &str, full: bool) -> Result<(), CliError> {
    let value = parse_value(value)?;
    let mut doc = Document::load(file)?;
    debug!(file, section, key, value = %value, "setting property");
    doc.set(section, key, value.clone())?;
    doc.save(serialize_mode(!full))?;
    println!("{} {}.{} = {}", "✓".green().bold(), section, key, value);
    Ok(())
}
