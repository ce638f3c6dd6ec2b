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

//! Resource limits applied while loading documents.

use crate::error::{MiniError, MiniResult};

/// Upper bounds on what a single load may consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum number of sections (default: 100k).
    pub max_sections: usize,
    /// Maximum number of declared properties in one section (default: 100k).
    pub max_properties_per_section: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_line_length: 1024 * 1024,    // 1MB
            max_sections: 100_000,
            max_properties_per_section: 100_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_line_length: usize::MAX,
            max_sections: usize::MAX,
            max_properties_per_section: usize::MAX,
        }
    }

    pub(crate) fn check_file_size(&self, len: usize) -> MiniResult<()> {
        if len > self.max_file_size {
            return Err(MiniError::limit(format!(
                "input is {} bytes, limit is {}",
                len, self.max_file_size
            )));
        }
        Ok(())
    }

    pub(crate) fn check_line_length(&self, len: usize, line: usize) -> MiniResult<()> {
        if len > self.max_line_length {
            return Err(MiniError::limit(format!(
                "line is {} bytes, limit is {}",
                len, self.max_line_length
            ))
            .with_line(line));
        }
        Ok(())
    }

    pub(crate) fn check_sections(&self, count: usize) -> MiniResult<()> {
        if count > self.max_sections {
            return Err(MiniError::limit(format!(
                "{} sections, limit is {}",
                count, self.max_sections
            )));
        }
        Ok(())
    }

    pub(crate) fn check_properties(&self, count: usize, section: &str) -> MiniResult<()> {
        if count > self.max_properties_per_section {
            return Err(MiniError::limit(format!(
                "{} properties, limit is {}",
                count, self.max_properties_per_section
            ))
            .with_section(section));
        }
        Ok(())
    }
}
