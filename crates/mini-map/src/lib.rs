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

//! Map resolved MINI sections onto Rust records.
//!
//! A record implements [`FromSection`], by hand or through [`mini_record!`],
//! and reads its fields by property key. Values arrive fully resolved:
//! inheritance, references and expressions are applied by `mini-core`
//! before mapping starts.
//!
//! ```no_run
//! use mini_map::{build_many, build_one, mini_record};
//!
//! mini_record! {
//!     pub struct Creature {
//!         pub hp: f64,
//!         pub name: String,
//!     }
//! }
//!
//! let orc: Creature = build_one("Orc", "bestiary.mini")?;
//! let everyone: Vec<Creature> = build_many("bestiary.mini")?;
//! # Ok::<(), mini_map::MapError>(())
//! ```

#[macro_use]
mod macros;

mod builder;
mod error;
mod fields;

pub use builder::{all_from_document, build_many, build_one, from_document, from_section, FromSection};
pub use error::{MapError, MapResult};
pub use fields::{Fields, FromField, FromValue};
