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

//! Building records from documents and files.

use crate::error::{MapError, MapResult};
use crate::fields::Fields;
use mini_core::{Document, Section};
use std::path::Path;
use tracing::debug;

/// A record that can be built from one resolved section.
///
/// Field names correspond to property keys. Inherited and derived values are
/// already resolved by the time a section reaches `from_section`.
pub trait FromSection: Sized {
    /// Build the record from the section's properties.
    fn from_section(fields: &Fields<'_>) -> MapResult<Self>;
}

/// Build one record from a section that is already in memory.
pub fn from_section<T: FromSection>(section: &Section) -> MapResult<T> {
    T::from_section(&Fields::new(section))
}

/// Build one record from the named section of a loaded document.
pub fn from_document<T: FromSection>(doc: &Document, section: &str) -> MapResult<T> {
    let section = doc
        .section(section)
        .ok_or_else(|| MapError::SectionNotFound(section.to_string()))?;
    from_section(section)
}

/// Build one record per section of a loaded document, in document order.
pub fn all_from_document<T: FromSection>(doc: &Document) -> MapResult<Vec<T>> {
    doc.sections().iter().map(from_section::<T>).collect()
}

/// Load the file at `path` and build a record from the named section.
pub fn build_one<T: FromSection>(section: &str, path: impl AsRef<Path>) -> MapResult<T> {
    let path = path.as_ref();
    let doc = Document::load(path)?;
    debug!(path = %path.display(), section, "mapping section");
    from_document(&doc, section)
}

/// Load the file at `path` and build one record per section.
pub fn build_many<T: FromSection>(path: impl AsRef<Path>) -> MapResult<Vec<T>> {
    let path = path.as_ref();
    let doc = Document::load(path)?;
    debug!(path = %path.display(), sections = doc.sections().len(), "mapping all sections");
    all_from_document(&doc)
}
