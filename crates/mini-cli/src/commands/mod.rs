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

//! CLI command implementations

mod resave;
mod set;
mod show;
mod validate;

pub use resave::resave;
pub use set::{parse_value, set};
pub use show::{document_json, show};
pub use validate::validate;

use crate::error::CliError;
use mini_core::SerializeMode;
use std::io::{self, Write};

/// Serialization mode selected by a `--diff` style flag.
pub fn serialize_mode(diff: bool) -> SerializeMode {
    if diff {
        SerializeMode::Diff
    } else {
        SerializeMode::Full
    }
}

/// Write `content` to stdout.
pub fn write_stdout(content: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| CliError::io_error("-", e))
}
