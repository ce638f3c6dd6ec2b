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

//! MINI CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **resave**: Load a file and write it elsewhere, in full or as a diff
//! - **validate**: Load a file and summarize its sections
//! - **show**: Print the resolved document as MINI text or JSON
//! - **set**: Change one property and save the file in place
//!
//! # Examples
//!
//! ```no_run
//! use mini_cli::commands::{resave, set};
//!
//! # fn main() -> Result<(), mini_cli::error::CliError> {
//! set("units.mini", "Knight", "hp", "20", false)?;
//! resave("units.mini", "units.full.mini", true, false)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
