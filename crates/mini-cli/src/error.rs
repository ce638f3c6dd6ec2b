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

//! Structured error types for the MINI CLI.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error and
//! exits with status 1.

use mini_core::MiniError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for MINI CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Loading, resolving or saving a document failed.
    #[error(transparent)]
    Document(#[from] MiniError),

    /// I/O on something other than a document (stdout).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path involved, `-` for stdout
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON rendering failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// A section named on the command line does not exist.
    #[error("section '{0}' not found")]
    SectionNotFound(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a JSON format error.
    pub fn json_format(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
