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

//! Validate command - load a file and summarize it

use crate::error::CliError;
use colored::Colorize;
use mini_core::Document;

/// Load `file` and print one line per section.
///
/// # Output
///
/// ```text
/// ✓ units.mini
///   Sections: 2
///   Properties: 7
///   Knight : Unit (4 properties, 3 inherited)
/// ```
pub fn validate(file: &str) -> Result<(), CliError> {
    let doc = match Document::load(file) {
        Ok(doc) => doc,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(e.into());
        }
    };

    let total: usize = doc.sections().iter().map(|s| s.len()).sum();
    println!("{} {}", "✓".green().bold(), file);
    println!("  Sections: {}", doc.sections().len());
    println!("  Properties: {}", total);
    for section in doc.sections() {
        let inherited = section.properties().filter(|p| p.is_inherited()).count();
        let header = if section.parents().is_empty() {
            section.name().to_string()
        } else {
            format!("{} : {}", section.name(), section.parents().join(", "))
        };
        println!(
            "  {} ({} properties, {} inherited)",
            header.bold(),
            section.len(),
            inherited
        );
    }
    Ok(())
}
