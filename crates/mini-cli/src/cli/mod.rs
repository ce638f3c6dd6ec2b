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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use mini_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Load a file and save it elsewhere
    ///
    /// All inheritance, references and expressions are resolved on load. The
    /// output is written in full unless `--diff` is given.
    Resave {
        /// Input file path
        #[arg(value_name = "SRC")]
        src: String,

        /// Output file path
        #[arg(value_name = "DEST")]
        dest: String,

        /// Overwrite DEST if it already exists
        #[arg(short, long)]
        force: bool,

        /// Write only what each section does not inherit unchanged
        #[arg(short, long)]
        diff: bool,
    },

    /// Load a file and report its sections
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Print the resolved document
    Show {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Print only this section
        #[arg(short, long, value_name = "NAME")]
        section: Option<String>,

        /// Print in diff form instead of full
        #[arg(short, long, conflicts_with = "json")]
        diff: bool,

        /// Print resolved values as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change one property and save the file in place
    ///
    /// VALUE is read as JSON (`true`, `2.5`, `"text"`) and falls back to the
    /// usual literal inference. The file is saved in diff form unless `--full`
    /// is given.
    Set {
        /// File to modify
        #[arg(value_name = "FILE")]
        file: String,

        /// Section holding the property
        #[arg(value_name = "SECTION")]
        section: String,

        /// Property key
        #[arg(value_name = "KEY")]
        key: String,

        /// New value
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,

        /// Save every property instead of the diff
        #[arg(long)]
        full: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if loading, resolving or saving the document fails, or
    /// if a named section does not exist.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Resave {
                src,
                dest,
                force,
                diff,
            } => commands::resave(&src, &dest, force, diff),
            Commands::Validate { file } => commands::validate(&file),
            Commands::Show {
                file,
                section,
                diff,
                json,
            } => commands::show(&file, section.as_deref(), diff, json),
            Commands::Set {
                file,
                section,
                key,
                value,
                full,
            } => commands::set(&file, &section, &key, &value, full),
        }
    }
}
