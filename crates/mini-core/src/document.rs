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

//! The document: an ordered set of sections bound to an optional file.

use crate::error::{MiniError, MiniErrorKind, MiniResult};
use crate::parser::{build_sections, LoadOptions};
use crate::property::{Property, PropertyId};
use crate::reference::SectionLookup;
use crate::section::Section;
use crate::value::PropertyValue;
use crate::writer::{to_text, SerializeMode};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Lifecycle of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Bound to a source, or created blank, but nothing parsed yet.
    Empty,
    /// Sections have been built.
    Initialized,
}

/// A loaded MINI document.
#[derive(Debug, Clone)]
pub struct Document {
    source: Option<PathBuf>,
    sections: Vec<Section>,
    state: DocumentState,
    options: LoadOptions,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A blank in-memory document.
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            source: None,
            sections: Vec::new(),
            state: DocumentState::Empty,
            options,
        }
    }

    pub(crate) fn from_parts(source: Option<PathBuf>, sections: Vec<Section>, options: LoadOptions) -> Self {
        Self {
            source,
            sections,
            state: DocumentState::Initialized,
            options,
        }
    }

    /// Bind a document to an existing file without reading it.
    pub fn open(path: impl AsRef<Path>) -> MiniResult<Self> {
        Self::open_with_options(path, LoadOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: LoadOptions) -> MiniResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MiniError::source_not_found(path));
        }
        Ok(Self {
            source: Some(path.to_path_buf()),
            sections: Vec::new(),
            state: DocumentState::Empty,
            options,
        })
    }

    /// Open and initialize in one step.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mini_core::Document;
    ///
    /// let doc = Document::load("input.mini")?;
    /// for section in doc.sections() {
    ///     println!("{}", section.name());
    /// }
    /// # Ok::<(), mini_core::MiniError>(())
    /// ```
    pub fn load(path: impl AsRef<Path>) -> MiniResult<Self> {
        Self::load_with_options(path, LoadOptions::default())
    }

    pub fn load_with_options(path: impl AsRef<Path>, options: LoadOptions) -> MiniResult<Self> {
        let mut doc = Self::open_with_options(path, options)?;
        doc.initialize()?;
        Ok(doc)
    }

    /// Create a new, empty document file.
    ///
    /// An existing file is truncated when `overwrite` is set, otherwise this
    /// is a `DestinationExists` error.
    pub fn create(path: impl AsRef<Path>, overwrite: bool) -> MiniResult<Self> {
        let path = path.as_ref();
        open_for_write(path, overwrite)?;
        info!(path = %path.display(), "created document");
        Ok(Self::from_parts(
            Some(path.to_path_buf()),
            Vec::new(),
            LoadOptions::default(),
        ))
    }

    /// Parse the source file. Does nothing once initialized, and on a
    /// document with no source.
    pub fn initialize(&mut self) -> MiniResult<()> {
        if self.state == DocumentState::Initialized {
            return Ok(());
        }
        if self.source.is_some() {
            self.sections = self.read_source()?;
        }
        self.state = DocumentState::Initialized;
        Ok(())
    }

    /// Discard in-memory changes and parse the source file again.
    pub fn reload(&mut self) -> MiniResult<()> {
        self.sections = self.read_source()?;
        self.state = DocumentState::Initialized;
        Ok(())
    }

    fn read_source(&self) -> MiniResult<Vec<Section>> {
        let path = self.source.as_deref().ok_or_else(no_source)?;
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MiniError::source_not_found(path),
            _ => MiniError::io(&e, path),
        })?;
        let sections = build_sections(&text, &self.options).map_err(|e| e.with_path(path))?;
        debug!(path = %path.display(), sections = sections.len(), "loaded document");
        Ok(sections)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == DocumentState::Initialized
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Sections in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.iter().map(Section::name)
    }

    /// Append a section. Its name must be new to the document.
    pub fn add_section(&mut self, section: Section) -> MiniResult<()> {
        if self.section(section.name()).is_some() {
            return Err(MiniError::duplicate_section(section.name()));
        }
        self.sections.push(section);
        self.state = DocumentState::Initialized;
        Ok(())
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let at = self.sections.iter().position(|s| s.name() == name)?;
        Some(self.sections.remove(at))
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Property> {
        self.section(section).and_then(|s| s.get(key))
    }

    pub fn value(&self, section: &str, key: &str) -> Option<&PropertyValue> {
        self.get(section, key).map(Property::value)
    }

    pub fn property(&self, id: &PropertyId) -> Option<&Property> {
        self.get(&id.section, &id.key)
    }

    /// Assign a value in an existing section.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<PropertyValue>) -> MiniResult<()> {
        let target = self
            .section_mut(section)
            .ok_or_else(|| MiniError::unknown_section(section))?;
        target.set(key, value);
        Ok(())
    }

    /// Every property holding exactly `value`, in document order.
    pub fn properties_with_value<'a>(
        &'a self,
        value: &'a PropertyValue,
    ) -> impl Iterator<Item = &'a Property> + 'a {
        self.sections
            .iter()
            .flat_map(move |s| s.properties_with_value(value))
    }

    /// Run duplicate-key validation over every section.
    pub fn validate(&mut self) -> MiniResult<()> {
        let allow = self.options.allow_overwrite;
        for section in &mut self.sections {
            let name = section.name().to_string();
            section.validate(allow).map_err(|e| e.with_section(name))?;
        }
        Ok(())
    }

    pub fn to_text(&self, mode: SerializeMode) -> String {
        to_text(self, mode)
    }

    /// Write the document back to its source file.
    pub fn save(&self, mode: SerializeMode) -> MiniResult<()> {
        let path = self.source.as_deref().ok_or_else(no_source)?;
        self.save_as(path, mode, true)
    }

    /// Write the document to `path`.
    ///
    /// Without `overwrite`, an existing file is a `DestinationExists` error
    /// and is left untouched.
    pub fn save_as(&self, path: impl AsRef<Path>, mode: SerializeMode, overwrite: bool) -> MiniResult<()> {
        let path = path.as_ref();
        let file = open_for_write(path, overwrite)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.to_text(mode).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| MiniError::io(&e, path))?;
        info!(path = %path.display(), ?mode, "saved document");
        Ok(())
    }
}

fn no_source() -> MiniError {
    MiniError::new(MiniErrorKind::SourceNotFound, "document has no source file")
}

fn open_for_write(path: &Path, overwrite: bool) -> MiniResult<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => MiniError::destination_exists(path),
        _ => MiniError::io(&e, path),
    })
}

impl FromStr for Document {
    type Err = MiniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl SectionLookup for Document {
    fn find_section(&self, name: &str) -> Option<&Section> {
        self.section(name)
    }
}
