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

//! Show command - print a resolved document

use super::{serialize_mode, write_stdout};
use crate::error::CliError;
use mini_core::{writer, Document, Section};
use serde_json::{Map, Value};

/// Print `file` as MINI text or JSON, optionally limited to one section.
pub fn show(file: &str, section: Option<&str>, diff: bool, json: bool) -> Result<(), CliError> {
    let doc = Document::load(file)?;
    let sections: Vec<&Section> = match section {
        Some(name) => vec![doc
            .section(name)
            .ok_or_else(|| CliError::SectionNotFound(name.to_string()))?],
        None => doc.sections().iter().collect(),
    };

    let output = if json {
        let mut text = serde_json::to_string_pretty(&document_json(&sections))
            .map_err(CliError::json_format)?;
        text.push('\n');
        text
    } else {
        let mode = serialize_mode(diff);
        sections
            .iter()
            .map(|s| writer::section_to_text(s, mode))
            .collect::<Vec<_>>()
            .join("\n")
    };
    write_stdout(&output)
}

/// JSON view of resolved sections: `{ "Section": { "key": value } }`.
pub fn document_json(sections: &[&Section]) -> Value {
    let mut root = Map::new();
    for section in sections {
        let properties: Map<String, Value> = section
            .properties()
            .map(|p| (p.key().to_string(), Value::from(p.value())))
            .collect();
        root.insert(section.name().to_string(), Value::Object(properties));
    }
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_core::parse;
    use serde_json::json;

    #[test]
    fn test_document_json_has_resolved_values() {
        let doc = parse("[Base]\nhp = 10\nname = $this\n[Orc] : Base\nangry = +\n").unwrap();
        let sections: Vec<&Section> = doc.sections().iter().collect();
        assert_eq!(
            document_json(&sections),
            json!({
                "Base": { "hp": 10.0, "name": "Base" },
                "Orc": { "hp": 10.0, "name": "Orc", "angry": true },
            })
        );
    }
}
