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

//! Document model and engine for MINI files.
//!
//! A MINI file is a list of sections holding typed `key = value` properties:
//!
//! ```text
//! [Base]
//! hp = 10
//! name = $this            ; rebinds to each heir's name
//!
//! [Knight] : Base
//! armor = 5
//! dmg = ($hp + $armor) * 2
//! ```
//!
//! Loading a file builds every section in dependency order. Parents are
//! merged first (later parents win), then each property line has its `$`
//! references substituted, is evaluated by the left-to-right
//! [`expression`] evaluator when needed, and is typed as a boolean, number
//! or text. Documents can be mutated and written back in full or as a diff
//! against what they inherit.
//!
//! ```
//! use mini_core::{parse, SerializeMode};
//!
//! let doc = parse("[Base]\nhp = 10\n\n[Knight] : Base\ndmg = $hp * 3\n").unwrap();
//! assert_eq!(doc.section("Knight").unwrap().get_number("dmg"), Some(30.0));
//! assert!(doc.to_text(SerializeMode::Diff).contains("[Knight] : Base"));
//! ```

mod document;
mod error;
pub mod expression;
pub mod inheritance;
pub mod lex;
mod limits;
mod parser;
mod property;
pub mod reference;
mod section;
mod value;
pub mod writer;

pub use document::{Document, DocumentState};
pub use error::{Location, MiniError, MiniErrorKind, MiniResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_options, LoadOptions, LoadOptionsBuilder};
pub use property::{Annotation, Derivation, Property, PropertyId};
pub use reference::SectionLookup;
pub use section::Section;
pub use value::{format_number, infer_literal, parse_number, PropertyValue, ValueKind};
pub use writer::{DocumentWriter, SerializeMode};
