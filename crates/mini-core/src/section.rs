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

//! Sections: named, ordered property stores with inheritance.

use crate::error::{MiniError, MiniResult};
use crate::expression::evaluate;
use crate::property::{Derivation, Property, PropertyId};
use crate::reference::{resolve_references, SectionLookup, SectionScope};
use crate::value::{infer_literal, PropertyValue, ValueKind};
use std::collections::HashSet;
use tracing::trace;

/// A named group of properties.
///
/// Properties are kept in declaration order in a single store. Each key is
/// present at most once, whatever its kind; [`Section::properties`] yields
/// them grouped by kind (booleans, numbers, then text).
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    parents: Vec<String>,
    properties: Vec<Property>,
}

/// Lookup that only knows the parent being merged.
struct ParentOnly<'a>(&'a Section);

impl SectionLookup for ParentOnly<'_> {
    fn find_section(&self, name: &str) -> Option<&Section> {
        (self.0.name() == name).then_some(self.0)
    }
}

impl Section {
    /// Create an empty section with no parents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Create a section inheriting from `parents` in order; later parents
    /// win on key conflicts.
    pub fn with_parents(name: impl Into<String>, parents: &[&Section]) -> MiniResult<Self> {
        let mut section = Self::new(name);
        for parent in parents {
            section.inherit(parent, true)?;
        }
        Ok(section)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the sections this one inherits from, in merge order.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// All properties, booleans first, then numbers, then text.
    pub fn properties(&self) -> impl Iterator<Item = &Property> + '_ {
        ValueKind::ALL
            .into_iter()
            .flat_map(move |kind| self.properties_of_kind(kind))
    }

    /// Properties of one kind, in declaration order.
    pub fn properties_of_kind(&self, kind: ValueKind) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter().filter(move |p| p.kind() == kind)
    }

    /// Properties holding exactly `value`.
    pub fn properties_with_value<'a>(
        &'a self,
        value: &'a PropertyValue,
    ) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.iter().filter(move |p| p.value() == value)
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key() == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn value(&self, key: &str) -> Option<&PropertyValue> {
        self.get(key).map(Property::value)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.value(key).and_then(PropertyValue::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(PropertyValue::as_number)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(PropertyValue::as_text)
    }

    pub fn id_of(&self, key: &str) -> Option<PropertyId> {
        self.contains_key(key)
            .then(|| PropertyId::new(self.name.clone(), key))
    }

    /// Declare a property. An existing property with the same key is
    /// replaced when `allow_overwrite` is set, otherwise this is a
    /// `DuplicateKey` error.
    pub fn insert(&mut self, mut property: Property, allow_overwrite: bool) -> MiniResult<()> {
        if let Some(at) = self.properties.iter().position(|p| p.key() == property.key()) {
            if !allow_overwrite {
                return Err(MiniError::duplicate_key(property.key()).with_section(&self.name));
            }
            self.properties.remove(at);
        }
        property.attach(&self.name);
        self.properties.push(property);
        Ok(())
    }

    /// Assign a value. An existing property is updated in place and marked
    /// modified; a missing key becomes a new local property.
    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        match self.get_mut(key) {
            Some(property) => property.set_value(value),
            None => {
                let mut property = Property::new(key, value);
                property.attach(&self.name);
                self.properties.push(property);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Property> {
        let at = self.properties.iter().position(|p| p.key() == key)?;
        Some(self.properties.remove(at))
    }

    /// Merge `parent` into this section.
    ///
    /// Derived values that reach into sections other than `parent` need
    /// [`Section::inherit_with`].
    pub fn inherit(&mut self, parent: &Section, allow_overwrite: bool) -> MiniResult<()> {
        self.inherit_with(parent, allow_overwrite, &ParentOnly(parent))
    }

    /// Merge `parent` into this section, resolving derived values against
    /// `others`.
    ///
    /// Every parent property is deep-copied, flagged inherited, and appended,
    /// so it overrides earlier declarations of the same key. Copies that carry
    /// a derivation are then recomputed for this section.
    pub fn inherit_with(
        &mut self,
        parent: &Section,
        allow_overwrite: bool,
        others: &dyn SectionLookup,
    ) -> MiniResult<()> {
        self.parents.push(parent.name.clone());

        let mut derived = Vec::new();
        for property in &parent.properties {
            let mut copy = property.clone_detached();
            copy.mark_inherited();
            copy.attach(&self.name);
            if copy.derivation().is_some() {
                derived.push(copy.key().to_string());
            }
            self.properties.push(copy);
        }
        self.validate(allow_overwrite)?;

        for key in derived {
            self.rederive(&key, parent.name(), others)?;
        }
        Ok(())
    }

    fn rederive(&mut self, key: &str, parent_name: &str, others: &dyn SectionLookup) -> MiniResult<()> {
        let Some(property) = self.get(key) else {
            return Ok(());
        };
        if !property.is_inherited() || property.is_modified() {
            return Ok(());
        }

        let value = match (property.derivation(), property.value()) {
            (Some(Derivation::SelfReference), PropertyValue::Text(text)) => {
                PropertyValue::Text(text.replace(parent_name, &self.name))
            }
            (Some(Derivation::Expression(raw)), _) => {
                let scope = SectionScope::new(self, others);
                let resolved = resolve_references(raw, property.annotation(), &scope)?;
                infer_literal(&evaluate(&resolved.text)?)
            }
            _ => return Ok(()),
        };

        trace!(section = %self.name, key, value = %value, "re-derived inherited property");
        if let Some(property) = self.get_mut(key) {
            property.set_derived_value(value);
        }
        Ok(())
    }

    /// Drop earlier declarations of repeated keys, keeping the last one.
    /// Without `allow_overwrite` a repeated key is a `DuplicateKey` error.
    pub fn validate(&mut self, allow_overwrite: bool) -> MiniResult<()> {
        let mut keep = vec![false; self.properties.len()];
        {
            let mut seen = HashSet::new();
            for (i, property) in self.properties.iter().enumerate().rev() {
                if seen.insert(property.key()) {
                    keep[i] = true;
                } else if !allow_overwrite {
                    return Err(MiniError::duplicate_key(property.key()).with_section(&self.name));
                }
            }
        }
        let mut flags = keep.into_iter();
        self.properties.retain(|_| flags.next().unwrap_or(false));
        Ok(())
    }
}
