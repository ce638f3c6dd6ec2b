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

//! `$` reference substitution.
//!
//! Three token forms are recognized inside a raw value:
//!
//! - `$this`: the owning section's name
//! - `$key`: a property already declared in (or inherited by) the owner
//! - `$section.key`: a property of another, already built section
//!
//! Each token is replaced by the literal text of what it names. Substituted
//! text is never rescanned.

use crate::error::{MiniError, MiniResult};
use crate::property::{Annotation, Derivation};
use crate::section::Section;
use crate::value::PropertyValue;
use memchr::memchr;
use std::collections::HashMap;
use tracing::trace;

/// The self-reference keyword.
pub const THIS: &str = "this";

/// Marker that forces evaluation when it appears in a comment.
pub const EXPRESSION_MARKER: &str = "exp";

/// Finds constructed sections by name.
pub trait SectionLookup {
    fn find_section(&self, name: &str) -> Option<&Section>;
}

impl SectionLookup for Vec<Section> {
    fn find_section(&self, name: &str) -> Option<&Section> {
        self.iter().find(|s| s.name() == name)
    }
}

impl SectionLookup for HashMap<String, Section> {
    fn find_section(&self, name: &str) -> Option<&Section> {
        self.get(name)
    }
}

/// The context a value is resolved in: its owning section and the other
/// sections it may reach into.
pub struct SectionScope<'a> {
    pub section: &'a Section,
    pub others: &'a dyn SectionLookup,
}

impl<'a> SectionScope<'a> {
    pub fn new(section: &'a Section, others: &'a dyn SectionLookup) -> Self {
        Self { section, others }
    }

    fn lookup(&self, token: &str) -> MiniResult<&'a PropertyValue> {
        match token.split_once('.') {
            Some((section, key)) if section != self.section.name() => {
                let other = self.others.find_section(section).ok_or_else(|| {
                    MiniError::unknown_reference(format!(
                        "'${}' names section '{}', which is unknown or not built yet",
                        token, section
                    ))
                })?;
                other.value(key).ok_or_else(|| {
                    MiniError::unknown_reference(format!(
                        "'${}': section '{}' has no property '{}'",
                        token, section, key
                    ))
                })
            }
            Some((_, key)) => self.local(token, key),
            None => self.local(token, token),
        }
    }

    fn local(&self, token: &str, key: &str) -> MiniResult<&'a PropertyValue> {
        self.section.value(key).ok_or_else(|| {
            MiniError::unknown_reference(format!(
                "'${}' is not declared before this line in '{}'",
                token,
                self.section.name()
            ))
        })
    }
}

/// Result of substituting every reference in a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The value with every token replaced.
    pub text: String,
    /// The derivation to record on the property.
    pub derivation: Option<Derivation>,
}

fn is_token_end(c: char) -> bool {
    matches!(c, ' ' | '\t' | '+' | '-' | '(' | ')' | '*' | '/' | '^' | ',' | '$')
}

/// Split off the name following a `$`, returning it and the remaining text.
fn split_token(after_dollar: &str) -> (&str, &str) {
    let len = after_dollar.find(is_token_end).unwrap_or(after_dollar.len());
    after_dollar.split_at(len)
}

/// Whether evaluation is forced for a value declared with this annotation.
pub fn forces_evaluation(raw: &str, annotation: &Annotation) -> bool {
    raw.contains('(')
        || annotation.is_expression()
        || annotation
            .comment
            .as_deref()
            .is_some_and(|c| c.contains(EXPRESSION_MARKER) || c.contains('{'))
}

/// An expression derivation supersedes a self-reference; the first expression
/// recorded is kept.
fn merge(current: Option<Derivation>, next: Derivation) -> Option<Derivation> {
    match (current, next) {
        (Some(Derivation::Expression(e)), _) => Some(Derivation::Expression(e)),
        (_, Derivation::Expression(e)) => Some(Derivation::Expression(e)),
        (current, Derivation::SelfReference) => current.or(Some(Derivation::SelfReference)),
    }
}

/// Substitute every `$` token in `raw`.
pub fn resolve_references(
    raw: &str,
    annotation: &Annotation,
    scope: &SectionScope<'_>,
) -> MiniResult<Resolution> {
    let mut text = String::with_capacity(raw.len());
    let mut derivation = annotation.derivation.clone();
    let mut rest = raw;

    while let Some(at) = memchr(b'$', rest.as_bytes()) {
        text.push_str(&rest[..at]);
        let (token, tail) = split_token(&rest[at + 1..]);
        rest = tail;

        if token.is_empty() {
            return Err(MiniError::unknown_reference(format!(
                "'$' without a name in '{}'",
                raw
            )));
        }

        if token == THIS {
            text.push_str(scope.section.name());
            let next = if forces_evaluation(raw, annotation) {
                Derivation::Expression(raw.trim().to_string())
            } else {
                Derivation::SelfReference
            };
            derivation = merge(derivation, next);
        } else {
            let value = scope.lookup(token)?;
            trace!(token, value = %value, owner = scope.section.name(), "substituted reference");
            text.push_str(&value.to_literal());
            derivation = merge(derivation, Derivation::Expression(raw.trim().to_string()));
        }
    }
    text.push_str(rest);

    Ok(Resolution { text, derivation })
}

/// Sections named by `$section.key` tokens in `raw`, in order of appearance.
pub fn referenced_sections(raw: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = raw;
    while let Some(at) = memchr(b'$', rest.as_bytes()) {
        let (token, tail) = split_token(&rest[at + 1..]);
        rest = tail;
        if let Some((section, _)) = token.split_once('.') {
            if !section.is_empty() && !sections.contains(&section) {
                sections.push(section);
            }
        }
    }
    sections
}
