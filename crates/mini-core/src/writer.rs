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

//! Text serialization.
//!
//! Two modes are supported:
//!
//! - [`SerializeMode::Full`] writes every property of every section, local
//!   and inherited, under a bare `[name]` header.
//! - [`SerializeMode::Diff`] writes the inheritance list in the header and
//!   only the properties that are local or were modified after being
//!   inherited. Loading the output reproduces the same values.

use crate::document::Document;
use crate::section::Section;

/// Initial buffer capacity for output text.
const INITIAL_OUTPUT_BUFFER_CAPACITY: usize = 4096;

/// How much of each section to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SerializeMode {
    /// Every property, no inheritance list.
    #[default]
    Full,
    /// Inheritance list plus local and modified properties.
    Diff,
}

/// Writer for MINI text.
pub struct DocumentWriter {
    mode: SerializeMode,
    output: String,
}

impl DocumentWriter {
    pub fn new(mode: SerializeMode) -> Self {
        Self {
            mode,
            output: String::with_capacity(INITIAL_OUTPUT_BUFFER_CAPACITY),
        }
    }

    pub fn mode(&self) -> SerializeMode {
        self.mode
    }

    /// Serialize every section in document order, separated by blank lines.
    pub fn write_document(&mut self, doc: &Document) -> String {
        for (i, section) in doc.sections().iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.write_section(section);
        }
        std::mem::take(&mut self.output)
    }

    /// Append one section.
    pub fn write_section(&mut self, section: &Section) {
        self.output.push('[');
        self.output.push_str(section.name());
        self.output.push(']');
        if self.mode == SerializeMode::Diff && !section.parents().is_empty() {
            self.output.push_str(" : ");
            self.output.push_str(&section.parents().join(", "));
        }
        self.output.push('\n');

        for property in section.properties() {
            if self.mode == SerializeMode::Diff && !property.is_diff_visible() {
                continue;
            }
            self.output.push_str(&property.to_string());
            self.output.push('\n');
        }
    }

    /// Take the text written so far.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Serialize a whole document.
pub fn to_text(doc: &Document, mode: SerializeMode) -> String {
    DocumentWriter::new(mode).write_document(doc)
}

/// Serialize a single section.
pub fn section_to_text(section: &Section, mode: SerializeMode) -> String {
    let mut writer = DocumentWriter::new(mode);
    writer.write_section(section);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Annotation, Derivation, Property};

    fn base() -> Section {
        let mut s = Section::new("Base");
        s.insert(Property::new("name", "Base"), true).unwrap();
        s.insert(Property::new("hp", 10), true).unwrap();
        s.insert(Property::new("alive", true), true).unwrap();
        s
    }

    // ==================== Full mode tests ====================

    #[test]
    fn test_full_orders_by_kind() {
        let text = section_to_text(&base(), SerializeMode::Full);
        assert_eq!(text, "[Base]\nalive = true\nhp = 10\nname = Base\n");
    }

    #[test]
    fn test_full_includes_inherited_without_parents() {
        let child = Section::with_parents("Knight", &[&base()]).unwrap();
        let text = section_to_text(&child, SerializeMode::Full);
        assert!(text.starts_with("[Knight]\n"));
        assert!(text.contains("hp = 10\n"));
    }

    #[test]
    fn test_annotation_is_written() {
        let mut s = Section::new("S");
        let annotation = Annotation::new(
            Some("; doubled".into()),
            Some(Derivation::Expression("$hp * 2".into())),
        );
        s.insert(Property::new("dmg", 20).with_annotation(annotation), true)
            .unwrap();
        assert_eq!(
            section_to_text(&s, SerializeMode::Full),
            "[S]\ndmg = 20 ; doubled {$hp * 2}\n"
        );
    }

    // ==================== Diff mode tests ====================

    #[test]
    fn test_diff_writes_parents_and_local_only() {
        let mut child = Section::with_parents("Knight", &[&base()]).unwrap();
        child.insert(Property::new("armor", 5), true).unwrap();
        let text = section_to_text(&child, SerializeMode::Diff);
        assert_eq!(text, "[Knight] : Base\narmor = 5\n");
    }

    #[test]
    fn test_diff_writes_modified_inherited() {
        let mut child = Section::with_parents("Knight", &[&base()]).unwrap();
        child.set("hp", 12);
        let text = section_to_text(&child, SerializeMode::Diff);
        assert_eq!(text, "[Knight] : Base\nhp = 12\n");
    }

    #[test]
    fn test_diff_of_root_section_matches_full() {
        let s = base();
        assert_eq!(
            section_to_text(&s, SerializeMode::Diff),
            section_to_text(&s, SerializeMode::Full)
        );
    }

    #[test]
    fn test_multiple_parents_joined() {
        let a = Section::new("A");
        let b = Section::new("B");
        let c = Section::with_parents("C", &[&a, &b]).unwrap();
        assert_eq!(section_to_text(&c, SerializeMode::Diff), "[C] : A, B\n");
    }

    #[test]
    fn test_default_mode_is_full() {
        assert_eq!(SerializeMode::default(), SerializeMode::Full);
        assert_eq!(DocumentWriter::new(SerializeMode::Diff).mode(), SerializeMode::Diff);
    }
}
