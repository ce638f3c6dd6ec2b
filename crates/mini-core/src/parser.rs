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

//! Document loading: tokenize, order, then build each section.
//!
//! Building a section merges its parents in declaration order, then walks
//! its property lines top to bottom. Each value has its `$` references
//! substituted, is evaluated when it is an expression, and is typed by
//! literal inference before it is declared.

use crate::document::Document;
use crate::error::{MiniError, MiniResult};
use crate::expression::evaluate;
use crate::inheritance::{construction_order, SectionNode};
use crate::lex::{split_blocks, Block, RawProperty};
use crate::limits::Limits;
use crate::property::{expression_source, Annotation, Derivation, Property};
use crate::reference::{forces_evaluation, referenced_sections, resolve_references, SectionScope};
use crate::section::Section;
use crate::value::infer_literal;
use std::collections::HashMap;
use tracing::debug;

/// Options for loading documents.
///
/// # Examples
///
/// ```
/// use mini_core::LoadOptions;
///
/// let opts = LoadOptions::builder()
///     .allow_overwrite(false)
///     .max_sections(100)
///     .build();
/// assert!(!opts.allow_overwrite);
/// assert_eq!(opts.limits.max_sections, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Whether a local declaration may replace an earlier property with the
    /// same key, declared locally or inherited. When false this is a
    /// `DuplicateKey` error. Parents always merge with the later one winning.
    pub allow_overwrite: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            allow_overwrite: true,
        }
    }
}

impl LoadOptions {
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::new()
    }
}

/// Builder for [`LoadOptions`].
#[derive(Debug, Clone)]
pub struct LoadOptionsBuilder {
    limits: Limits,
    allow_overwrite: bool,
}

impl LoadOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_overwrite: true,
        }
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the maximum input size in bytes.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.limits.max_file_size = size;
        self
    }

    /// Set the maximum line length in bytes.
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    pub fn max_sections(mut self, count: usize) -> Self {
        self.limits.max_sections = count;
        self
    }

    pub fn max_properties_per_section(mut self, count: usize) -> Self {
        self.limits.max_properties_per_section = count;
        self
    }

    /// Set whether repeated keys overwrite (default: true).
    pub fn allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    pub fn build(self) -> LoadOptions {
        LoadOptions {
            limits: self.limits,
            allow_overwrite: self.allow_overwrite,
        }
    }
}

impl Default for LoadOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse document text with default options.
///
/// # Examples
///
/// ```
/// let doc = mini_core::parse("[Base]\nhp = 10\n\n[Knight] : Base\narmor = 5\n").unwrap();
/// assert_eq!(doc.section("Knight").and_then(|s| s.get_number("hp")), Some(10.0));
/// ```
pub fn parse(input: &str) -> MiniResult<Document> {
    parse_with_options(input, LoadOptions::default())
}

/// Parse document text.
pub fn parse_with_options(input: &str, options: LoadOptions) -> MiniResult<Document> {
    let sections = build_sections(input, &options)?;
    Ok(Document::from_parts(None, sections, options))
}

/// Build every section of `input`, returned in file order.
pub(crate) fn build_sections(input: &str, options: &LoadOptions) -> MiniResult<Vec<Section>> {
    let blocks = split_blocks(input, &options.limits)?;
    let nodes: Vec<SectionNode<'_>> = blocks.iter().map(dependency_node).collect();
    let order = construction_order(&nodes)?;

    let mut built: HashMap<String, Section> = HashMap::with_capacity(blocks.len());
    for i in order {
        let block = &blocks[i];
        let section = build_section(block, &built, options).map_err(|e| e.with_section(block.name))?;
        debug!(section = block.name, properties = section.len(), "built section");
        built.insert(block.name.to_string(), section);
    }

    Ok(blocks
        .iter()
        .filter_map(|block| built.remove(block.name))
        .collect())
}

fn dependency_node<'a>(block: &'a Block<'a>) -> SectionNode<'a> {
    let mut references = Vec::new();
    for raw in &block.properties {
        let in_comment = raw
            .comment
            .and_then(expression_source)
            .map(referenced_sections)
            .unwrap_or_default();
        for section in referenced_sections(raw.value).into_iter().chain(in_comment) {
            if !references.contains(&section) {
                references.push(section);
            }
        }
    }
    SectionNode {
        name: block.name,
        parents: &block.parents,
        references,
        line: block.line,
    }
}

fn build_section(
    block: &Block<'_>,
    built: &HashMap<String, Section>,
    options: &LoadOptions,
) -> MiniResult<Section> {
    let mut section = Section::new(block.name);
    for parent_name in &block.parents {
        let parent = built.get(parent_name).ok_or_else(|| {
            MiniError::unresolvable(format!("parent '{}' was not built first", parent_name))
        })?;
        section
            .inherit_with(parent, true, built)
            .map_err(|e| e.with_line(block.line))?;
    }

    for raw in &block.properties {
        let property = build_property(raw, &section, built).map_err(|e| e.with_line(raw.line))?;
        section
            .insert(property, options.allow_overwrite)
            .map_err(|e| e.with_line(raw.line))?;
    }
    Ok(section)
}

fn build_property(
    raw: &RawProperty<'_>,
    section: &Section,
    built: &HashMap<String, Section>,
) -> MiniResult<Property> {
    let annotation = raw.comment.map(Annotation::parse).unwrap_or_default();
    let scope = SectionScope::new(section, built);
    let resolution = resolve_references(raw.value, &annotation, &scope)?;

    let mut derivation = resolution.derivation;
    let is_expression = matches!(derivation, Some(Derivation::Expression(_)));
    let text = if is_expression
        || resolution.text.contains('(')
        || forces_evaluation(raw.value, &annotation)
    {
        let result = evaluate(&resolution.text)?;
        if !is_expression {
            derivation = Some(Derivation::Expression(raw.value.to_string()));
        }
        result
    } else {
        resolution.text
    };

    Ok(Property::new(raw.key, infer_literal(&text))
        .with_annotation(Annotation::new(annotation.comment, derivation)))
}
