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

//! Resave command - load one file and write it to another

use super::serialize_mode;
use crate::error::CliError;
use colored::Colorize;
use mini_core::Document;
use tracing::debug;

/// Load `src` and save it to `dest`.
///
/// Without `force`, an existing `dest` is left untouched and the command
/// fails with `DestinationExists`.
///
/// # Examples
///
/// ```no_run
/// use mini_cli::commands::resave;
///
/// # fn main() -> Result<(), mini_cli::error::CliError> {
/// resave("units.mini", "units.full.mini", false, false)?;
/// resave("units.mini", "units.diff.mini", true, true)?;
/// # Ok(())
/// # }
/// ```
pub fn resave(src: &str, dest: &str, force: bool, diff: bool) -> Result<(), CliError> {
    let doc = Document::load(src)?;
    let mode = serialize_mode(diff);
    debug!(src, dest, ?mode, force, "resaving");
    doc.save_as(dest, mode, force)?;
    println!("{} {} -> {}", "✓".green().bold(), src, dest);
    Ok(())
}
