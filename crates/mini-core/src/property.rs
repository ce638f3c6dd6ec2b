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

//! A single typed property with its annotation and provenance.

use crate::value::{PropertyValue, ValueKind};
use std::fmt;

/// Tag written into a comment to mark a self-referencing text value.
pub const SELF_TAG: &str = "slf";

/// How a property's value was derived from its declaration.
///
/// Inheritance re-runs the derivation in the child's context, so a value
/// computed from `$this` or from sibling properties follows its new owner.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Derivation {
    /// Text embedding the owner's name, rebound by name substitution.
    SelfReference,
    /// The raw declaration, re-resolved and re-evaluated.
    Expression(String),
}

/// The trailing comment of a property line, split into free text and an
/// optional derivation tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Comment text including its leading `#` or `;`.
    pub comment: Option<String>,
    pub derivation: Option<Derivation>,
}

impl Annotation {
    pub fn new(comment: Option<String>, derivation: Option<Derivation>) -> Self {
        Self { comment, derivation }
    }

    /// Split a raw comment (`# note {expr}`, `;slf`) into text and derivation.
    ///
    /// The first `{...}` group becomes an expression derivation; otherwise a
    /// standalone `slf` word marks a self-reference. A comment left with only
    /// its marker is dropped.
    pub fn parse(raw: &str) -> Self {
        let mut text = raw.trim().to_string();
        let mut derivation = None;

        if let Some((open, close)) = braced_span(&text) {
            derivation = Some(Derivation::Expression(text[open + 1..close].trim().to_string()));
            text.replace_range(open..=close, "");
        }
        if let Some(at) = find_self_tag(&text) {
            if derivation.is_none() {
                derivation = Some(Derivation::SelfReference);
            }
            text.replace_range(at..at + SELF_TAG.len(), "");
        }

        let text = text.trim_end();
        let body = text.trim_start_matches(['#', ';']).trim();
        let comment = if body.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        Self { comment, derivation }
    }

    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.derivation.is_none()
    }

    pub fn is_expression(&self) -> bool {
        matches!(self.derivation, Some(Derivation::Expression(_)))
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.comment, &self.derivation) {
            (None, None) => Ok(()),
            (Some(c), None) => f.write_str(c),
            (Some(c), Some(Derivation::SelfReference)) => write!(f, "{} {}", c, SELF_TAG),
            (Some(c), Some(Derivation::Expression(e))) => write!(f, "{} {{{}}}", c, e),
            (None, Some(Derivation::SelfReference)) => write!(f, "#{}", SELF_TAG),
            (None, Some(Derivation::Expression(e))) => write!(f, "# {{{}}}", e),
        }
    }
}

/// Positions of the first `{` and the `}` that closes it.
fn braced_span(text: &str) -> Option<(usize, usize)> {
    let open = text.find('{')?;
    let len = text[open..].find('}')?;
    Some((open, open + len))
}

/// The expression tag of a raw comment, without its braces.
///
/// Only this part of a comment is ever resolved; the rest is free text.
pub fn expression_source(comment: &str) -> Option<&str> {
    braced_span(comment).map(|(open, close)| comment[open + 1..close].trim())
}

fn find_self_tag(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    text.match_indices(SELF_TAG).map(|(at, _)| at).find(|&at| {
        let before = at.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(at + SELF_TAG.len()).copied();
        !before.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
            && !after.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
    })
}

/// Identity of a property inside a document: its section and key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyId {
    pub section: String,
    pub key: String,
}

impl PropertyId {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

/// One key/value entry of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    key: String,
    value: PropertyValue,
    annotation: Annotation,
    owner: Option<String>,
    inherited: bool,
    modified: bool,
    cloned: bool,
}

impl Property {
    /// Create a detached local property.
    pub fn new(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            annotation: Annotation::default(),
            owner: None,
            inherited: false,
            modified: false,
            cloned: false,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn derivation(&self) -> Option<&Derivation> {
        self.annotation.derivation.as_ref()
    }

    /// Name of the owning section, `None` while detached.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn id(&self) -> Option<PropertyId> {
        self.owner
            .as_ref()
            .map(|section| PropertyId::new(section.clone(), self.key.clone()))
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_cloned(&self) -> bool {
        self.cloned
    }

    /// Whether diff serialization writes this property: it is local, or it
    /// was changed after being inherited.
    pub fn is_diff_visible(&self) -> bool {
        !self.inherited || self.modified
    }

    /// Replace the value. The property is marked modified and stops being
    /// derived.
    pub fn set_value(&mut self, value: impl Into<PropertyValue>) {
        self.value = value.into();
        self.annotation.derivation = None;
        self.modified = true;
    }

    /// Replace the free-text comment, keeping the derivation.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.annotation.comment = comment;
    }

    /// Deep copy with no owner, flagged as cloned.
    pub fn clone_detached(&self) -> Self {
        Self {
            owner: None,
            cloned: true,
            ..self.clone()
        }
    }

    pub(crate) fn attach(&mut self, owner: &str) {
        self.owner = Some(owner.to_string());
    }

    pub(crate) fn mark_inherited(&mut self) {
        self.inherited = true;
        self.modified = false;
    }

    /// Store a recomputed value without touching the provenance flags.
    pub(crate) fn set_derived_value(&mut self, value: PropertyValue) {
        self.value = value;
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)?;
        if !self.annotation.is_empty() {
            write!(f, " {}", self.annotation)?;
        }
        Ok(())
    }
}
