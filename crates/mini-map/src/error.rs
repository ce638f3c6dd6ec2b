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

//! Errors raised while mapping sections onto records.

use mini_core::MiniError;
use thiserror::Error;

/// Error type for record mapping.
#[derive(Error, Debug, Clone)]
pub enum MapError {
    /// The record declares a field the section does not hold.
    #[error("section '{section}' has no property '{field}'")]
    FieldNotFound {
        /// Section being mapped
        section: String,
        /// Missing property key
        field: String,
    },

    /// The property exists but cannot be converted to the field's type.
    #[error("property '{section}.{field}' is {found}, expected {expected}")]
    KindMismatch {
        /// Section being mapped
        section: String,
        /// Property key
        field: String,
        /// What the field accepts
        expected: &'static str,
        /// What the property holds
        found: String,
    },

    /// No section with the requested name.
    #[error("section '{0}' not found")]
    SectionNotFound(String),

    /// Loading the document failed.
    #[error(transparent)]
    Document(#[from] MiniError),
}

/// Result alias for mapping operations.
pub type MapResult<T> = Result<T, MapError>;
